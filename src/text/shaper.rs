use std::{borrow::Cow, collections::HashMap};

use crate::{
    assets::font::FontResource,
    foundation::error::{MemeError, MemeResult},
    text::wrap::{TextMeasure, wrap_lines},
};

#[derive(Clone, Debug, Default)]
/// Glyphs shaped with one face of the font file.
pub struct ShapedRun {
    /// Face index within the font file the glyph ids belong to.
    pub font_index: u32,
    /// Glyphs; `x` grows rightwards from the line start, `y` is relative to the baseline.
    pub glyphs: Vec<vello_cpu::Glyph>,
}

#[derive(Clone, Debug, Default)]
/// One wrapped line with glyphs positioned relative to its left baseline origin.
pub struct ShapedLine {
    /// Source text of the line.
    pub text: String,
    /// Advance width in pixels.
    pub width: f32,
    /// Glyph runs in visual order.
    pub runs: Vec<ShapedRun>,
}

impl ShapedLine {
    /// Total glyphs across all runs.
    pub fn glyph_count(&self) -> usize {
        self.runs.iter().map(|r| r.glyphs.len()).sum()
    }
}

#[derive(Clone, Debug)]
/// A field's text after wrapping and shaping; always holds at least one line.
pub struct TextBlock {
    lines: Vec<ShapedLine>,
    font_size: f32,
}

impl TextBlock {
    /// Wrapped lines in reading order.
    pub fn lines(&self) -> &[ShapedLine] {
        &self.lines
    }

    /// Number of lines (>= 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Font size in pixels the block was shaped at.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }
}

/// Owns Parley contexts and the fonts registered into them.
///
/// One shaper serves one composition. Each font resource gets its own font
/// collection, so faces that share an internal family name never shadow each other.
pub struct TextShaper {
    layout_ctx: parley::LayoutContext<()>,
    faces: HashMap<String, RegisteredFont>,
}

struct RegisteredFont {
    font_ctx: parley::FontContext,
    family_name: String,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextShaper")
            .field("fonts", &self.faces.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl TextShaper {
    /// Construct a shaper with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    /// Bind `font` at `size_px` for measuring and shaping.
    pub fn face(&mut self, font: &FontResource, size_px: f32) -> MemeResult<FaceShaper<'_>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(MemeError::validation("font size must be finite and > 0"));
        }
        if !self.faces.contains_key(font.family()) {
            let registered = register(font)?;
            self.faces.insert(font.family().to_string(), registered);
        }
        let registered = self
            .faces
            .get_mut(font.family())
            .ok_or_else(|| MemeError::font_not_found(font.family()))?;
        Ok(FaceShaper {
            layout_ctx: &mut self.layout_ctx,
            font: registered,
            size_px,
        })
    }
}

fn register(font: &FontResource) -> MemeResult<RegisteredFont> {
    let mut font_ctx = parley::FontContext::default();
    let families = font_ctx.collection.register_fonts(
        parley::fontique::Blob::from(font.bytes().to_vec()),
        None,
    );
    let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
        MemeError::validation(format!(
            "font '{}' registered no font families",
            font.family()
        ))
    })?;
    let family_name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| MemeError::validation("registered font family has no name"))?
        .to_string();
    Ok(RegisteredFont {
        font_ctx,
        family_name,
    })
}

/// A [`TextShaper`] bound to one font face and size.
pub struct FaceShaper<'s> {
    layout_ctx: &'s mut parley::LayoutContext<()>,
    font: &'s mut RegisteredFont,
    size_px: f32,
}

impl FaceShaper<'_> {
    fn layout(&mut self, text: &str) -> parley::Layout<()> {
        let font = &mut *self.font;
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut font.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(font.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Shape one line of text without wrapping.
    pub fn shape_line(&mut self, text: &str) -> ShapedLine {
        if text.is_empty() {
            return ShapedLine::default();
        }

        let layout = self.layout(text);
        let mut runs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let baseline = run.baseline();
                runs.push(ShapedRun {
                    font_index: run.run().font().index,
                    glyphs: run
                        .positioned_glyphs()
                        .map(|g| vello_cpu::Glyph {
                            id: u32::from(g.id),
                            x: g.x,
                            y: g.y - baseline,
                        })
                        .collect(),
                });
            }
        }

        ShapedLine {
            text: text.to_string(),
            width: layout.width(),
            runs,
        }
    }

    /// Wrap `text` to `max_width` and shape every resulting line.
    pub fn wrap(&mut self, text: &str, max_width: f32) -> TextBlock {
        let lines = wrap_lines(text, self, max_width)
            .iter()
            .map(|line| self.shape_line(line))
            .collect();
        TextBlock {
            lines,
            font_size: self.size_px,
        }
    }
}

impl TextMeasure for FaceShaper<'_> {
    fn advance(&mut self, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout(text).width()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;
