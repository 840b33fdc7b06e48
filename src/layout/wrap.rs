//! Greedy word wrapping and content-box geometry.

use crate::foundation::core::Rect;
use crate::foundation::math::unit;
use crate::layout::measure::{TextMeasure, TextStyle};

/// Greedy word wrap of `text` to `max_width` pixels.
///
/// Explicit `\n` are hard breaks. A single word wider than `max_width` gets a line of its own.
/// Empty lines are never emitted, so empty or whitespace-only text yields no lines.
pub fn wrap_text(
    text: &str,
    max_width: f64,
    style: &TextStyle,
    measure: &mut dyn TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measure.measure(&candidate, style) > max_width {
                lines.push(std::mem::replace(&mut current, word.to_owned()));
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Fixed geometry of a section content box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoxMetrics {
    /// Box width in pixels.
    pub box_width: f64,
    /// Vertical padding; the box adds `1.5 ×` this below the lines.
    pub vert_padding: f64,
    /// Horizontal padding; wrapping uses `box_width − 1.5 ×` this.
    pub horiz_padding: f64,
    /// Distance between text lines.
    pub line_height: f64,
}

impl Default for BoxMetrics {
    fn default() -> Self {
        Self {
            box_width: 900.0,
            vert_padding: 30.0,
            horiz_padding: 60.0,
            line_height: 44.0,
        }
    }
}

impl BoxMetrics {
    /// Width available to wrapped text.
    pub fn wrap_width(&self) -> f64 {
        self.box_width - 1.5 * self.horiz_padding
    }

    /// Box height for `lines` wrapped lines (0 when there are none).
    pub fn height_for(&self, lines: usize) -> f64 {
        if lines == 0 {
            0.0
        } else {
            lines as f64 * self.line_height + 1.5 * self.vert_padding
        }
    }
}

/// Wrapped lines and height of one content box.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentBox {
    /// Wrapped lines, top to bottom.
    pub lines: Vec<String>,
    /// Box height in pixels.
    pub height: f64,
}

/// Lay out `text` inside a box of the given metrics.
pub fn content_box(
    text: &str,
    metrics: &BoxMetrics,
    style: &TextStyle,
    measure: &mut dyn TextMeasure,
) -> ContentBox {
    let lines = wrap_text(text, metrics.wrap_width(), style, measure);
    let height = metrics.height_for(lines.len());
    ContentBox { lines, height }
}

/// Left-anchored reveal clip of a box at `(x, y)` with the given size.
pub fn reveal_clip(x: f64, y: f64, width: f64, height: f64, progress: f64) -> Rect {
    Rect::new(x, y, x + width * unit(progress), y + height)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
