use crate::animation::state::IntroState;
use crate::content::sign::Sign;
use crate::foundation::core::Point;
use crate::render::plan::{DrawOp, FramePlan, RenderCtx, TextAlign, TextBaseline};
use crate::render::ring::{RingAlpha, push_ring, ring_layout};

/// Line index of the featured-names line, which is condensed to fit.
const NAMES_LINE: usize = 3;

/// Plan the intro title card: orbiting ring, then the typed title block.
pub fn plan_intro(state: &IntroState, highlighted: &[Sign], ctx: &RenderCtx<'_>) -> FramePlan {
    let cfg = ctx.config;
    let center = ctx.center();
    let mut plan = FramePlan::cleared(cfg.surface.background);

    let icons = ring_layout(
        center,
        &cfg.ring,
        state.scale,
        state.rotation,
        state.opacity,
        RingAlpha::Highlight(highlighted),
    );
    push_ring(&mut plan, &icons, ctx.assets);

    if state.show_text {
        let style = cfg.intro_style();
        let top = center.y + cfg.intro.first_line_offset;
        for (i, line) in state.lines.iter().enumerate() {
            let text = line.visible();
            if text.is_empty() {
                continue;
            }
            plan.push(DrawOp::Text {
                text: text.to_owned(),
                style,
                pos: Point::new(center.x, top + cfg.intro.line_spacing * i as f64),
                align: TextAlign::Center,
                baseline: TextBaseline::Middle,
                max_width: (i == NAMES_LINE).then_some(cfg.intro.names_max_width),
                opacity: state.text_opacity,
            });
        }
    }

    plan.faded(state.fade)
}

#[cfg(test)]
#[path = "../../tests/unit/render/intro.rs"]
mod tests;
