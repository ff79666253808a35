use std::sync::Arc;

use crate::{
    assets::{
        font::{FontProvider, FontResource},
        image::ImageProvider,
    },
    foundation::{
        core::{Point, Vec2},
        error::{MemeError, MemeResult},
    },
    layout::anchor::{anchor_point, line_origins},
    render::{canvas::Canvas, stroke::stroke_pass, transform::with_rotation},
    template::model::{Template, TextStyle},
    text::shaper::{TextBlock, TextShaper},
};

/// Draws a template's text fields onto a background, in template order.
///
/// Font and background lookups go through the injected providers; the compositor holds no
/// per-composition state and can serve concurrent compositions, each on its own canvas.
#[derive(Clone)]
pub struct Compositor {
    fonts: Arc<dyn FontProvider>,
    images: Arc<dyn ImageProvider>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor").finish_non_exhaustive()
    }
}

// Everything a field needs to be drawn, resolved before the canvas is touched.
struct FieldPlan<'t> {
    style: &'t TextStyle,
    font: Arc<FontResource>,
    block: TextBlock,
    anchor: Point,
    // Left baseline origin of each line relative to the anchor.
    line_offsets: Vec<Vec2>,
}

impl Compositor {
    /// Build a compositor over the given font and background providers.
    pub fn new(fonts: Arc<dyn FontProvider>, images: Arc<dyn ImageProvider>) -> Self {
        Self { fonts, images }
    }

    /// Compose `texts` onto a fresh copy of the template's background.
    ///
    /// `texts[i]` is drawn with `template.text_styles[i]`; the lengths must match
    /// ([`MemeError::TextCountMismatch`] otherwise). Any failure aborts the whole composition.
    #[tracing::instrument(skip(self, template, texts), fields(template = %template.id))]
    pub fn compose<S: AsRef<str>>(&self, template: &Template, texts: &[S]) -> MemeResult<Canvas> {
        check_text_count(template, texts.len())?;
        template.validate()?;

        let mut canvas = self.images.background(&template.image.id)?;
        if (canvas.width(), canvas.height()) != (template.image.width, template.image.height) {
            tracing::debug!(
                actual_width = canvas.width(),
                actual_height = canvas.height(),
                "background size differs from template; using background size"
            );
        }
        self.compose_onto(&mut canvas, template, texts)?;
        Ok(canvas)
    }

    /// Compose `texts` onto a caller-owned canvas.
    ///
    /// Fonts are resolved and text is wrapped for every field before the first pixel is
    /// written, so lookup failures leave `canvas` untouched.
    #[tracing::instrument(skip(self, canvas, template, texts), fields(template = %template.id))]
    pub fn compose_onto<S: AsRef<str>>(
        &self,
        canvas: &mut Canvas,
        template: &Template,
        texts: &[S],
    ) -> MemeResult<()> {
        check_text_count(template, texts.len())?;
        template.validate()?;

        let mut shaper = TextShaper::new();
        let mut plans = Vec::with_capacity(template.field_count());
        for (index, (style, text)) in template.text_styles.iter().zip(texts).enumerate() {
            let plan = self
                .plan_field(&mut shaper, style, text.as_ref())
                .map_err(|e| e.at_field(index))?;
            plans.push(plan);
        }

        for (index, plan) in plans.iter().enumerate() {
            canvas
                .draw_layer(|ctx| draw_field(ctx, plan))
                .map_err(|e| e.at_field(index))?;
            tracing::debug!(
                field = index,
                lines = plan.block.line_count(),
                anchor_x = plan.anchor.x,
                anchor_y = plan.anchor.y,
                "drew field"
            );
        }
        Ok(())
    }

    fn plan_field<'t>(
        &self,
        shaper: &mut TextShaper,
        style: &'t TextStyle,
        text: &str,
    ) -> MemeResult<FieldPlan<'t>> {
        let font = self.fonts.font(&style.font.family)?;
        let block = shaper
            .face(&font, style.font.size)?
            .wrap(text, style.width as f32);
        let anchor = anchor_point(style, block.line_count());

        let widths: Vec<f64> = block.lines().iter().map(|l| f64::from(l.width)).collect();
        let line_offsets = line_origins(Point::ZERO, f64::from(block.font_size()), &widths)
            .into_iter()
            .map(|p| p.to_vec2())
            .collect();

        Ok(FieldPlan {
            style,
            font,
            block,
            anchor,
            line_offsets,
        })
    }
}

fn check_text_count(template: &Template, actual: usize) -> MemeResult<()> {
    let expected = template.field_count();
    if expected != actual {
        return Err(MemeError::TextCountMismatch { expected, actual });
    }
    Ok(())
}

// Outline pass first, then the fill on top; each draw in its own rotation scope.
fn draw_field(ctx: &mut vello_cpu::RenderContext, plan: &FieldPlan<'_>) -> MemeResult<()> {
    let style = plan.style;
    if let Some(stroke) = style.stroke {
        ctx.set_paint(stroke.color.to_paint());
        stroke_pass(ctx, stroke.radius, style.rotation, plan.anchor, |ctx, at| {
            draw_block(ctx, plan, at);
            Ok(())
        })?;
    }

    ctx.set_paint(style.font.color.to_paint());
    with_rotation(ctx, style.rotation, plan.anchor, |ctx| {
        draw_block(ctx, plan, plan.anchor);
        Ok(())
    })
}

fn draw_block(ctx: &mut vello_cpu::RenderContext, plan: &FieldPlan<'_>, center: Point) {
    for (line, offset) in plan.block.lines().iter().zip(&plan.line_offsets) {
        let origin = center + *offset;
        let (ox, oy) = (origin.x as f32, origin.y as f32);
        for run in line.runs.iter().filter(|r| !r.glyphs.is_empty()) {
            let glyphs = run.glyphs.iter().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: ox + g.x,
                y: oy + g.y,
            });
            ctx.glyph_run(&plan.font.paint_font(run.font_index))
                .font_size(plan.block.font_size())
                .fill_glyphs(glyphs);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
