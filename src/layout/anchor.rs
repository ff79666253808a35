use crate::{foundation::core::Point, template::model::TextStyle};

/// Distance between consecutive baselines, as a multiple of the line height.
pub const LINE_SPACING: f64 = 1.5;

/// Center reference point of a field's wrapped block.
///
/// `x` is the middle of the field box. `y` moves down by half the font size per line so the
/// top of the block stays near `style.y`; line height is taken to be the font size.
pub fn anchor_point(style: &TextStyle, line_count: usize) -> Point {
    let size = f64::from(style.font.size);
    Point::new(
        style.x + style.width / 2.0,
        style.y + (size / 2.0) * line_count as f64,
    )
}

/// Height of a block of `line_count` lines: the last line adds no trailing spacing.
pub fn block_height(font_size: f64, line_count: usize) -> f64 {
    line_count as f64 * font_size * LINE_SPACING - (LINE_SPACING - 1.0) * font_size
}

/// Left baseline origin of each line when the block is centred on `center`.
///
/// `widths` are the advance widths of the lines in order.
pub fn line_origins(center: Point, font_size: f64, widths: &[f64]) -> Vec<Point> {
    let top = center.y - block_height(font_size, widths.len()) / 2.0;
    widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            Point::new(
                center.x - w / 2.0,
                top + font_size + i as f64 * font_size * LINE_SPACING,
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/anchor.rs"]
mod tests;
