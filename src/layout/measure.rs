use crate::foundation::core::Rgba8;
use crate::foundation::error::ReelResult;
use crate::layout::text::TextLayoutEngine;

/// Font weight used by the reel's text styles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    /// 400.
    #[default]
    Regular,
    /// 500.
    Medium,
    /// 700.
    Bold,
}

impl FontWeight {
    /// CSS-style numeric weight.
    pub fn value(self) -> f32 {
        match self {
            Self::Regular => 400.0,
            Self::Medium => 500.0,
            Self::Bold => 700.0,
        }
    }
}

/// Size, weight and colour of one run of text.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f64,
    /// Font weight.
    #[serde(default)]
    pub weight: FontWeight,
    /// Fill colour.
    pub color: Rgba8,
}

impl TextStyle {
    /// Style with the given size, weight and colour.
    pub const fn new(size: f64, weight: FontWeight, color: Rgba8) -> Self {
        Self {
            size,
            weight,
            color,
        }
    }
}

/// Measures the advance width of a single line of text.
pub trait TextMeasure {
    /// Width in pixels of `text` laid out on one line in `style`.
    fn measure(&mut self, text: &str, style: &TextStyle) -> f64;
}

/// Deterministic per-character width estimate, independent of any font file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproxMeasure {
    /// Average advance as a fraction of the font size.
    pub char_factor: f64,
    /// Extra factor applied to bold text.
    pub bold_factor: f64,
}

impl Default for ApproxMeasure {
    fn default() -> Self {
        Self {
            char_factor: 0.5,
            bold_factor: 1.1,
        }
    }
}

impl TextMeasure for ApproxMeasure {
    fn measure(&mut self, text: &str, style: &TextStyle) -> f64 {
        let weight = match style.weight {
            FontWeight::Bold => self.bold_factor,
            FontWeight::Regular | FontWeight::Medium => 1.0,
        };
        text.chars().count() as f64 * style.size * self.char_factor * weight
    }
}

/// Font-backed measurement through parley shaping.
///
/// Falls back to [`ApproxMeasure`] when no font is loaded or shaping fails.
pub struct ParleyMeasure {
    engine: Option<TextLayoutEngine>,
    fallback: ApproxMeasure,
}

impl ParleyMeasure {
    /// Measure with the given font bytes, or with the approximation when `None`.
    pub fn new(font: Option<&[u8]>) -> ReelResult<Self> {
        let engine = font.map(TextLayoutEngine::new).transpose()?;
        Ok(Self {
            engine,
            fallback: ApproxMeasure::default(),
        })
    }

    /// Whether a font is available for real shaping.
    pub fn has_font(&self) -> bool {
        self.engine.is_some()
    }
}

impl std::fmt::Debug for ParleyMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyMeasure")
            .field(
                "family",
                &self.engine.as_ref().map(TextLayoutEngine::family_name),
            )
            .finish()
    }
}

impl TextMeasure for ParleyMeasure {
    fn measure(&mut self, text: &str, style: &TextStyle) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let Some(engine) = self.engine.as_mut() else {
            return self.fallback.measure(text, style);
        };
        match engine.layout_plain(text, style) {
            Ok(layout) => f64::from(layout.width()),
            Err(e) => {
                tracing::warn!(error = %e, "text shaping failed, using approximate width");
                self.fallback.measure(text, style)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/measure.rs"]
mod tests;
