use crate::assets::store::ReelAssets;
use crate::config::RingConfig;
use crate::content::sign::Sign;
use crate::foundation::core::{Point, Rect};
use crate::render::plan::{DrawOp, FramePlan, ImageRef};

/// Per-icon opacity rule of a ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RingAlpha<'a> {
    /// Icons outside a non-empty set get the dim factor; an empty set highlights everything.
    Highlight(&'a [Sign]),
    /// The same factor for every icon.
    Constant(f64),
}

/// One placed ring icon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingIcon {
    /// Sign shown in this slot.
    pub sign: Sign,
    /// Icon centre.
    pub center: Point,
    /// Icon edge length.
    pub size: f64,
    /// Final icon opacity.
    pub opacity: f64,
}

impl RingIcon {
    /// Destination rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, (self.size, self.size))
    }
}

/// Opacity of one icon: `dim × group` when a highlight set exists and excludes it.
pub fn highlight_factor(sign: Sign, highlighted: &[Sign], dim: f64, group_opacity: f64) -> f64 {
    if highlighted.is_empty() || highlighted.contains(&sign) {
        group_opacity
    } else {
        dim * group_opacity
    }
}

/// Place the twelve canonical icons on the ring.
///
/// Icon `i` sits at `(360/12)·i + rotation` degrees on radius `radius·scale`; icons are
/// `icon_size·scale` wide and stay upright.
pub fn ring_layout(
    center: Point,
    ring: &RingConfig,
    scale: f64,
    rotation_deg: f64,
    group_opacity: f64,
    alpha: RingAlpha<'_>,
) -> Vec<RingIcon> {
    let step = 360.0 / Sign::ALL.len() as f64;
    Sign::ALL
        .iter()
        .enumerate()
        .map(|(i, &sign)| {
            let angle = (step * i as f64 + rotation_deg).to_radians();
            let r = ring.radius * scale;
            let opacity = match alpha {
                RingAlpha::Highlight(set) => {
                    highlight_factor(sign, set, ring.dim_factor, group_opacity)
                }
                RingAlpha::Constant(f) => f * group_opacity,
            };
            RingIcon {
                sign,
                center: Point::new(center.x + r * angle.cos(), center.y + r * angle.sin()),
                size: ring.icon_size * scale,
                opacity,
            }
        })
        .collect()
}

/// Emit image ops for every placed icon whose image is loaded.
pub(crate) fn push_ring(plan: &mut FramePlan, icons: &[RingIcon], assets: &ReelAssets) {
    for icon in icons {
        if assets.sign(icon.sign).is_none() {
            continue;
        }
        plan.push(DrawOp::Image {
            image: ImageRef::Sign(icon.sign),
            rect: icon.rect(),
            rotation_deg: 0.0,
            opacity: icon.opacity,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/ring.rs"]
mod tests;
