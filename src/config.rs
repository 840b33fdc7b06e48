//! Reel configuration: surface, timing and the authored look.
//!
//! Every section is `#[serde(default)]`, so a JSON file only needs the values it overrides.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::{Canvas, Fps, Rgba8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::measure::{FontWeight, TextStyle};
use crate::layout::wrap::BoxMetrics;

/// Output surface and frame rate.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Surface size in logical pixels.
    pub canvas: Canvas,
    /// Capture frame rate.
    pub fps: Fps,
    /// Clear colour of every frame.
    pub background: Rgba8,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::REEL,
            fps: Fps::default(),
            background: Rgba8::BLACK,
        }
    }
}

/// Sequencing constants.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Cross-fade length at every frame boundary, in seconds.
    pub crossfade: f64,
    /// Seconds from a sign's start until its exit begins.
    pub hold_duration: f64,
    /// Typewriter rate for intro lines, vibe and outro headline (seconds per char).
    pub type_per_char: f64,
    /// Typewriter rate for sign names (seconds per char).
    pub name_per_char: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            crossfade: 0.5,
            hold_duration: 19.0,
            type_per_char: 0.05,
            name_per_char: 0.1,
        }
    }
}

/// Orbiting icon ring shared by intro and outro.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Ring radius at scale 1.
    pub radius: f64,
    /// Icon edge length at scale 1.
    pub icon_size: f64,
    /// Opacity factor of non-highlighted icons.
    pub dim_factor: f64,
    /// Constant opacity factor of the outro ring.
    pub outro_alpha: f64,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            radius: 450.0,
            icon_size: 150.0,
            dim_factor: 0.4,
            outro_alpha: 0.3,
        }
    }
}

/// Brand colours.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Headlines, labels and box fill.
    pub gold: Rgba8,
    /// Body text on the background.
    pub text: Rgba8,
    /// Text drawn on gold boxes.
    pub box_text: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            gold: Rgba8::rgb(0xDA, 0xC4, 0x77),
            text: Rgba8::WHITE,
            box_text: Rgba8::BLACK,
        }
    }
}

/// Intro title card look.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IntroLook {
    /// Title font size.
    pub font_size: f64,
    /// Offset of the first line's middle from the surface centre.
    pub first_line_offset: f64,
    /// Distance between line middles.
    pub line_spacing: f64,
    /// Maximum width of the featured-names line (condensed when wider).
    pub names_max_width: f64,
}

impl Default for IntroLook {
    fn default() -> Self {
        Self {
            font_size: 42.0,
            first_line_offset: -120.0,
            line_spacing: 60.0,
            names_max_width: 600.0,
        }
    }
}

/// Sign card look.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SignLook {
    /// Sign icon edge length.
    pub icon_size: f64,
    /// Top of the icon.
    pub icon_y: f64,
    /// Gap between icon and name.
    pub icon_text_spacing: f64,
    /// Sign name font size (bold).
    pub name_size: f64,
    /// Top of the vibe block.
    pub vibe_y: f64,
    /// Vibe font size.
    pub vibe_size: f64,
    /// Vibe wrap width.
    pub vibe_max_width: f64,
    /// Vibe line height.
    pub vibe_line_height: f64,
    /// Top of the first section.
    pub sections_y: f64,
    /// Section label font size (bold).
    pub label_size: f64,
    /// Section content font size (medium).
    pub content_size: f64,
    /// Space reserved for a section label.
    pub title_height: f64,
    /// Gap between label and content box.
    pub title_margin: f64,
    /// Gap below a content box.
    pub section_margin: f64,
    /// Content box geometry.
    pub content_box: BoxMetrics,
    /// Decorative icon edge length.
    pub decor_size: f64,
    /// Horizontal spacing between decorative icons (negative overlaps).
    pub decor_spacing: f64,
    /// Distance of the decorative row's middle above the bottom edge.
    pub decor_bottom_margin: f64,
}

impl Default for SignLook {
    fn default() -> Self {
        Self {
            icon_size: 100.0,
            icon_y: 200.0,
            icon_text_spacing: 40.0,
            name_size: 48.0,
            vibe_y: 400.0,
            vibe_size: 36.0,
            vibe_max_width: 900.0,
            vibe_line_height: 50.0,
            sections_y: 550.0,
            label_size: 40.0,
            content_size: 32.0,
            title_height: 50.0,
            title_margin: 30.0,
            section_margin: 50.0,
            content_box: BoxMetrics::default(),
            decor_size: 400.0,
            decor_spacing: -100.0,
            decor_bottom_margin: 120.0,
        }
    }
}

/// Outro call-to-action look and copy.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutroLook {
    /// Typed headline.
    pub headline: String,
    /// Prefix of the headline kept on the first line.
    pub headline_break: String,
    /// Text inside the reveal box.
    pub cta: String,
    /// Headline font size (bold).
    pub headline_size: f64,
    /// Offset of the first headline line's middle from the surface centre.
    pub first_line_offset: f64,
    /// Distance between headline lines.
    pub line_spacing: f64,
    /// Offset of the reveal box top from the surface centre.
    pub box_offset: f64,
    /// CTA font size (medium).
    pub cta_size: f64,
    /// Horizontal padding on each side of the CTA text.
    pub box_horiz_padding: f64,
    /// Vertical padding above and below the CTA line.
    pub box_vert_padding: f64,
    /// CTA line height.
    pub box_line_height: f64,
}

impl Default for OutroLook {
    fn default() -> Self {
        Self {
            headline: "Want a personalised reading?".to_owned(),
            headline_break: "Want a personalised".to_owned(),
            cta: "Visit starryvibes.ai".to_owned(),
            headline_size: 42.0,
            first_line_offset: -107.0,
            line_spacing: 60.0,
            box_offset: 33.0,
            cta_size: 32.0,
            box_horiz_padding: 60.0,
            box_vert_padding: 30.0,
            box_line_height: 44.0,
        }
    }
}

/// Upper bound accepted for [`CaptureConfig::live_ceiling_secs`] (one day).
pub const MAX_LIVE_CEILING_SECS: f64 = 86_400.0;

/// Capture settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Wall-clock ceiling of a live recording, in seconds.
    pub live_ceiling_secs: f64,
    /// Capacity of the frame channel between the clock and the encoder thread.
    pub channel_capacity: usize,
    /// Encoder executable.
    pub ffmpeg: PathBuf,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            live_ceiling_secs: 200.0,
            channel_capacity: 8,
            ffmpeg: PathBuf::from("ffmpeg"),
        }
    }
}

/// Complete reel configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Surface and frame rate.
    pub surface: SurfaceConfig,
    /// Sequencing constants.
    pub timing: TimingConfig,
    /// Icon ring.
    pub ring: RingConfig,
    /// Colours.
    pub palette: Palette,
    /// Intro card.
    pub intro: IntroLook,
    /// Sign cards.
    pub sign: SignLook,
    /// Outro card.
    pub outro: OutroLook,
    /// Capture.
    pub capture: CaptureConfig,
}

impl ReelConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read config file \"{}\"", path.display()))?;
        let cfg: Self = serde_json::from_str(&json)
            .map_err(|e| ReelError::serde(format!("config JSON is malformed: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the renderer and composer cannot work with.
    pub fn validate(&self) -> ReelResult<()> {
        Fps::new(self.surface.fps.num, self.surface.fps.den)?;
        if self.surface.canvas.width == 0 || self.surface.canvas.height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        let t = &self.timing;
        for (name, v) in [
            ("timing.crossfade", t.crossfade),
            ("timing.hold_duration", t.hold_duration),
            ("timing.type_per_char", t.type_per_char),
            ("timing.name_per_char", t.name_per_char),
            ("capture.live_ceiling_secs", self.capture.live_ceiling_secs),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ReelError::validation(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        if self.capture.live_ceiling_secs > MAX_LIVE_CEILING_SECS {
            return Err(ReelError::validation(format!(
                "capture.live_ceiling_secs must be <= {MAX_LIVE_CEILING_SECS}, got {}",
                self.capture.live_ceiling_secs
            )));
        }
        if !(0.0..=1.0).contains(&self.ring.dim_factor) {
            return Err(ReelError::validation("ring.dim_factor must be in [0, 1]"));
        }
        if self.capture.channel_capacity == 0 {
            return Err(ReelError::validation("capture.channel_capacity must be > 0"));
        }
        Ok(())
    }

    /// Intro title style.
    pub fn intro_style(&self) -> TextStyle {
        TextStyle::new(self.intro.font_size, FontWeight::Bold, self.palette.gold)
    }

    /// Sign name style.
    pub fn name_style(&self) -> TextStyle {
        TextStyle::new(self.sign.name_size, FontWeight::Bold, self.palette.gold)
    }

    /// Vibe line style.
    pub fn vibe_style(&self) -> TextStyle {
        TextStyle::new(self.sign.vibe_size, FontWeight::Regular, self.palette.text)
    }

    /// Section label style.
    pub fn label_style(&self) -> TextStyle {
        TextStyle::new(self.sign.label_size, FontWeight::Bold, self.palette.gold)
    }

    /// Section content style.
    pub fn content_style(&self) -> TextStyle {
        TextStyle::new(
            self.sign.content_size,
            FontWeight::Medium,
            self.palette.box_text,
        )
    }

    /// Outro headline style.
    pub fn headline_style(&self) -> TextStyle {
        TextStyle::new(self.outro.headline_size, FontWeight::Bold, self.palette.gold)
    }

    /// Outro CTA style.
    pub fn cta_style(&self) -> TextStyle {
        TextStyle::new(self.outro.cta_size, FontWeight::Medium, self.palette.box_text)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
