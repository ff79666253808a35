//! Width-constrained line breaking.

/// Rendered width of a string for one font face at one size.
pub trait TextMeasure {
    /// Advance width of `text` in pixels.
    fn advance(&mut self, text: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: FnMut(&str) -> f32,
{
    fn advance(&mut self, text: &str) -> f32 {
        self(text)
    }
}

/// Break `text` into lines no wider than `max_width`, splitting only at whitespace.
///
/// - `\n` forces a break; every paragraph yields at least one line, so the result is never empty.
/// - Runs of whitespace between words are kept as written; leading and trailing whitespace of
///   each line is trimmed.
/// - A word wider than `max_width` is placed alone on its own line (no hyphenation or
///   truncation).
///
/// The output depends only on `(text, measure, max_width)`.
pub fn wrap_lines(text: &str, measure: &mut impl TextMeasure, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let before = lines.len();
        wrap_paragraph(paragraph, measure, max_width, &mut lines);
        if lines.len() == before {
            lines.push(String::new());
        }
    }
    lines
}

fn wrap_paragraph(
    paragraph: &str,
    measure: &mut impl TextMeasure,
    max_width: f32,
    out: &mut Vec<String>,
) {
    let mut current = String::new();
    for (word, gap) in words_with_gaps(paragraph) {
        let candidate = format!("{current}{word}");
        if measure.advance(&candidate) > max_width {
            if current.is_empty() {
                out.push(word.to_string());
                continue;
            }
            out.push(current.trim().to_string());
            current.clear();
        }
        current.push_str(word);
        current.push_str(gap);
    }
    let tail = current.trim();
    if !tail.is_empty() {
        out.push(tail.to_string());
    }
}

/// Split into `(word, following whitespace)` pairs, skipping leading whitespace.
fn words_with_gaps(s: &str) -> impl Iterator<Item = (&str, &str)> {
    let mut rest = s.trim_start();
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (word, after) = rest.split_at(word_end);
        let gap_end = after
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(after.len());
        let (gap, next) = after.split_at(gap_end);
        rest = next;
        Some((word, gap))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
