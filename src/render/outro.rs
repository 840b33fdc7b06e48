use crate::animation::state::OutroState;
use crate::foundation::core::{Point, Rect};
use crate::layout::measure::TextMeasure;
use crate::layout::wrap::reveal_clip;
use crate::render::plan::{DrawOp, FramePlan, RenderCtx, TextAlign, TextBaseline};
use crate::render::ring::{RingAlpha, push_ring, ring_layout};

/// Split the typed headline after the configured first-line prefix (by character count).
pub fn headline_lines<'a>(visible: &'a str, first_line: &str) -> (&'a str, Option<&'a str>) {
    let split = first_line.chars().count();
    match visible.char_indices().nth(split) {
        None => (visible, None),
        Some((byte, _)) => {
            let rest = visible[byte..].trim_start();
            (&visible[..byte], (!rest.is_empty()).then_some(rest))
        }
    }
}

/// Full reveal-box rectangle for the CTA text.
pub fn cta_box(ctx: &RenderCtx<'_>, measure: &mut dyn TextMeasure) -> Rect {
    let cfg = ctx.config;
    let look = &cfg.outro;
    let center = ctx.center();
    let text_w = measure.measure(&look.cta, &cfg.cta_style());
    let w = text_w + 2.0 * look.box_horiz_padding;
    let h = look.box_line_height + 2.0 * look.box_vert_padding;
    let y = center.y + look.box_offset;
    Rect::new(center.x - w / 2.0, y, center.x + w / 2.0, y + h)
}

/// Plan the outro: dimmed ring, typed two-line headline, left-to-right CTA box reveal.
pub fn plan_outro(
    state: &OutroState,
    ctx: &RenderCtx<'_>,
    measure: &mut dyn TextMeasure,
) -> FramePlan {
    let cfg = ctx.config;
    let look = &cfg.outro;
    let center = ctx.center();
    let mut plan = FramePlan::cleared(cfg.surface.background);

    let icons = ring_layout(
        center,
        &cfg.ring,
        1.0,
        state.rotation,
        state.opacity,
        RingAlpha::Constant(cfg.ring.outro_alpha),
    );
    push_ring(&mut plan, &icons, ctx.assets);

    let (first, second) = headline_lines(state.headline.visible(), &look.headline_break);
    let style = cfg.headline_style();
    let top = center.y + look.first_line_offset;
    for (i, line) in std::iter::once(first).chain(second).enumerate() {
        if line.is_empty() {
            continue;
        }
        plan.push(DrawOp::Text {
            text: line.to_owned(),
            style,
            pos: Point::new(center.x, top + look.line_spacing * i as f64),
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            max_width: None,
            opacity: state.opacity,
        });
    }

    if state.box_reveal > 0.0 {
        let rect = cta_box(ctx, measure);
        plan.push(DrawOp::PushClip(reveal_clip(
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
            state.box_reveal,
        )));
        plan.push(DrawOp::FillRect {
            rect,
            color: cfg.palette.gold,
            opacity: state.opacity,
        });
        plan.push(DrawOp::Text {
            text: look.cta.clone(),
            style: cfg.cta_style(),
            pos: rect.center(),
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            max_width: None,
            opacity: state.opacity,
        });
        plan.push(DrawOp::PopClip);
    }

    plan.faded(state.fade)
}

#[cfg(test)]
#[path = "../../tests/unit/render/outro.rs"]
mod tests;
