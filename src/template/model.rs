use crate::{
    foundation::core::Rgba8,
    foundation::error::{MemeError, MemeResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A declarative layout: background image plus ordered text fields.
///
/// Templates are read-only configuration. They are built once (from the built-in table in
/// [`crate::default_templates`] or from JSON) and reused across many compositions. The position of
/// each entry in [`Template::text_styles`] matches the position of the caller-supplied string it
/// renders.
pub struct Template {
    /// Stable identifier used for lookup.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// URL-friendly slug; defaults to the identifier when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    /// Background image reference and its nominal dimensions.
    pub image: ImageRef,
    /// Ordered text fields.
    pub text_styles: Vec<TextStyle>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Reference to the background image a template draws on.
pub struct ImageRef {
    /// Identifier passed to the image provider.
    pub id: String,
    /// Nominal width in pixels.
    pub width: u32,
    /// Nominal height in pixels.
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Placement and styling of one text field.
pub struct TextStyle {
    /// Left edge of the field box in pixels.
    pub x: f64,
    /// Top edge of the field box in pixels.
    pub y: f64,
    /// Box width in pixels, used both as the wrap width and for horizontal centering.
    pub width: f64,
    /// Font family, size and fill color.
    pub font: FontSpec,
    /// Optional outline drawn under the fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    /// Optional rotation about the field anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Font request for a text field.
pub struct FontSpec {
    /// Family name resolved through the font provider.
    pub family: String,
    /// Size in points (one point renders as one pixel).
    pub size: f32,
    /// Fill color.
    pub color: Rgba8,
}

/// Largest stroke radius a template may request; the outline costs one redraw per disc offset.
pub const MAX_STROKE_RADIUS: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Rounded outline approximated by offset redraws.
pub struct Stroke {
    /// Outline radius in pixels.
    #[serde(alias = "size")]
    pub radius: u32,
    /// Outline color.
    pub color: Rgba8,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Rotation of a field's glyphs about its anchor.
pub struct Rotation {
    /// Angle in degrees; positive values turn clockwise on screen.
    pub degrees: f64,
}

impl Rotation {
    /// Angle in radians.
    pub fn radians(self) -> f64 {
        self.degrees.to_radians()
    }
}

impl Template {
    /// Slug if set, otherwise the identifier.
    pub fn slug(&self) -> &str {
        self.slug.as_deref().unwrap_or(&self.id)
    }

    /// Number of text fields (and therefore of strings a composition expects).
    pub fn field_count(&self) -> usize {
        self.text_styles.len()
    }

    /// Validate every field; errors carry the offending field index.
    pub fn validate(&self) -> MemeResult<()> {
        if self.id.trim().is_empty() {
            return Err(MemeError::validation("template id must be non-empty"));
        }
        if self.image.id.trim().is_empty() {
            return Err(MemeError::validation(format!(
                "template '{}' image id must be non-empty",
                self.id
            )));
        }
        for (index, style) in self.text_styles.iter().enumerate() {
            style.validate().map_err(|e| e.at_field(index))?;
        }
        Ok(())
    }
}

impl TextStyle {
    /// Check the field invariants: finite geometry, `width > 0`, finite `size > 0`,
    /// stroke radius at most [`MAX_STROKE_RADIUS`], finite rotation.
    pub fn validate(&self) -> MemeResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(MemeError::validation("x/y must be finite"));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(MemeError::validation("width must be finite and > 0"));
        }
        if !self.font.size.is_finite() || self.font.size <= 0.0 {
            return Err(MemeError::validation("font size must be finite and > 0"));
        }
        if self.font.family.trim().is_empty() {
            return Err(MemeError::validation("font family must be non-empty"));
        }
        if let Some(stroke) = self.stroke
            && stroke.radius > MAX_STROKE_RADIUS
        {
            return Err(MemeError::validation(format!(
                "stroke radius {} exceeds {MAX_STROKE_RADIUS}",
                stroke.radius
            )));
        }
        if let Some(r) = self.rotation
            && !r.degrees.is_finite()
        {
            return Err(MemeError::validation("rotation degrees must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/model.rs"]
mod tests;
