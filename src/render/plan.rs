//! Backend-agnostic display list produced by the frame planners.

use crate::assets::store::{DecorIcon, ReelAssets};
use crate::config::ReelConfig;
use crate::content::sign::Sign;
use crate::foundation::core::{Point, Rect, Rgba8};
use crate::layout::measure::TextStyle;

/// Image slot referenced by a draw op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ImageRef {
    /// Zodiac sign icon.
    Sign(Sign),
    /// Decorative icon.
    Decor(DecorIcon),
}

/// Horizontal anchor of a text op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TextAlign {
    /// `pos.x` is the left edge.
    Left,
    /// `pos.x` is the centre.
    Center,
}

/// Vertical anchor of a text op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TextBaseline {
    /// `pos.y` is the top of the line box.
    Top,
    /// `pos.y` is the middle of the line box.
    Middle,
}

/// One display-list entry. Opacities are in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum DrawOp {
    /// Fill the whole surface.
    Clear(Rgba8),
    /// Solid rectangle.
    FillRect {
        /// Rectangle in surface pixels.
        rect: Rect,
        /// Fill colour.
        color: Rgba8,
        /// Opacity multiplier.
        opacity: f64,
    },
    /// Image stretched into `rect`, rotated about the rect centre.
    Image {
        /// Which image.
        image: ImageRef,
        /// Destination rectangle before rotation.
        rect: Rect,
        /// Clockwise rotation in degrees.
        rotation_deg: f64,
        /// Opacity multiplier.
        opacity: f64,
    },
    /// Single line of text.
    Text {
        /// Text to draw.
        text: String,
        /// Font size, weight and colour.
        style: TextStyle,
        /// Anchor point.
        pos: Point,
        /// Horizontal anchor.
        align: TextAlign,
        /// Vertical anchor.
        baseline: TextBaseline,
        /// Condense horizontally when the line is wider than this.
        max_width: Option<f64>,
        /// Opacity multiplier.
        opacity: f64,
    },
    /// Restrict following ops to `rect` until the matching [`DrawOp::PopClip`].
    PushClip(Rect),
    /// End the innermost clip.
    PopClip,
}

impl DrawOp {
    fn opacity_mut(&mut self) -> Option<&mut f64> {
        match self {
            Self::FillRect { opacity, .. }
            | Self::Image { opacity, .. }
            | Self::Text { opacity, .. } => Some(opacity),
            Self::Clear(_) | Self::PushClip(_) | Self::PopClip => None,
        }
    }
}

/// Ordered display list that fully repaints one frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FramePlan {
    /// Ops in paint order.
    pub ops: Vec<DrawOp>,
}

impl FramePlan {
    /// Plan starting with a full-surface clear.
    pub fn cleared(background: Rgba8) -> Self {
        Self {
            ops: vec![DrawOp::Clear(background)],
        }
    }

    /// Append one op.
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Multiply every op's opacity by the frame fade.
    pub fn faded(mut self, fade: f64) -> Self {
        let fade = crate::foundation::math::unit(fade);
        for op in &mut self.ops {
            if let Some(o) = op.opacity_mut() {
                *o *= fade;
            }
        }
        self
    }

    /// Image ops in paint order.
    pub fn images(&self) -> impl Iterator<Item = (ImageRef, Rect, f64)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Image {
                image,
                rect,
                opacity,
                ..
            } => Some((*image, *rect, *opacity)),
            _ => None,
        })
    }

    /// Text ops in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Read-only inputs shared by the frame planners.
#[derive(Clone, Copy, Debug)]
pub struct RenderCtx<'a> {
    /// Look and surface configuration.
    pub config: &'a ReelConfig,
    /// Loaded assets (only their availability matters to planners).
    pub assets: &'a ReelAssets,
}

impl RenderCtx<'_> {
    /// Surface centre.
    pub fn center(&self) -> Point {
        self.config.surface.canvas.center()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
