//! Sign card planner: icon + typed name, vibe, four masked sections, decorative row.

use crate::animation::state::{DecorState, SectionState, SignState};
use crate::assets::store::DecorIcon;
use crate::config::ReelConfig;
use crate::content::sign::Sign;
use crate::foundation::core::{Point, Rect};
use crate::layout::measure::TextMeasure;
use crate::layout::wrap::{content_box, reveal_clip, wrap_text};
use crate::render::plan::{DrawOp, FramePlan, ImageRef, RenderCtx, TextAlign, TextBaseline};

/// Geometry of one section at the current state.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionLayout {
    /// Top of the label before its fade-up offset.
    pub label_y: f64,
    /// Full content box.
    pub box_rect: Rect,
    /// Wrapped content lines.
    pub lines: Vec<String>,
    /// Revealed part of the box.
    pub clip: Rect,
}

/// Stack the four sections from the configured top using their wrapped box heights.
///
/// Heights always come from the full source text, so the layout does not jump while a
/// section is still hidden.
pub fn section_layouts(
    sections: &[SectionState],
    cfg: &ReelConfig,
    measure: &mut dyn TextMeasure,
) -> Vec<SectionLayout> {
    let look = &cfg.sign;
    let metrics = &look.content_box;
    let style = cfg.content_style();
    let cx = cfg.surface.canvas.center().x;
    let left = cx - metrics.box_width / 2.0;

    let mut y = look.sections_y;
    let mut out = Vec::with_capacity(sections.len());
    for section in sections {
        let cb = content_box(section.text(), metrics, &style, measure);
        let box_y = y + look.title_height + look.title_margin;
        out.push(SectionLayout {
            label_y: y,
            box_rect: Rect::new(left, box_y, left + metrics.box_width, box_y + cb.height),
            clip: reveal_clip(left, box_y, metrics.box_width, cb.height, section.mask),
            lines: cb.lines,
        });
        y = box_y + cb.height + look.section_margin;
    }
    out
}

fn push_icon_group(
    plan: &mut FramePlan,
    state: &SignState,
    icon: Sign,
    ctx: &RenderCtx<'_>,
    measure: &mut dyn TextMeasure,
) {
    let cfg = ctx.config;
    let look = &cfg.sign;
    let name_style = cfg.name_style();
    let name = state.name.visible();
    let text_w = if name.is_empty() {
        0.0
    } else {
        measure.measure(name, &name_style)
    };
    let total = look.icon_size
        + if name.is_empty() {
            0.0
        } else {
            look.icon_text_spacing + text_w
        };
    let x = ctx.center().x - total / 2.0 + state.icon_x;

    if ctx.assets.sign(icon).is_some() {
        plan.push(DrawOp::Image {
            image: ImageRef::Sign(icon),
            rect: Rect::new(x, look.icon_y, x + look.icon_size, look.icon_y + look.icon_size),
            rotation_deg: state.icon_rotation,
            opacity: state.icon_opacity,
        });
    }

    if state.show_name && !name.is_empty() {
        plan.push(DrawOp::Text {
            text: name.to_owned(),
            style: name_style,
            pos: Point::new(
                x + look.icon_size + look.icon_text_spacing,
                look.icon_y + look.icon_size / 2.0,
            ),
            align: TextAlign::Left,
            baseline: TextBaseline::Middle,
            max_width: None,
            opacity: state.icon_opacity,
        });
    }
}

fn push_vibe(
    plan: &mut FramePlan,
    state: &SignState,
    ctx: &RenderCtx<'_>,
    measure: &mut dyn TextMeasure,
) {
    let vibe = state.vibe.visible();
    if !state.show_vibe || vibe.is_empty() {
        return;
    }
    let cfg = ctx.config;
    let style = cfg.vibe_style();
    let cx = ctx.center().x;
    for (i, line) in wrap_text(vibe, cfg.sign.vibe_max_width, &style, measure)
        .into_iter()
        .enumerate()
    {
        plan.push(DrawOp::Text {
            text: line,
            style,
            pos: Point::new(cx, cfg.sign.vibe_y + cfg.sign.vibe_line_height * i as f64),
            align: TextAlign::Center,
            baseline: TextBaseline::Top,
            max_width: None,
            opacity: 1.0,
        });
    }
}

fn push_sections(
    plan: &mut FramePlan,
    state: &SignState,
    ctx: &RenderCtx<'_>,
    measure: &mut dyn TextMeasure,
) {
    let cfg = ctx.config;
    let metrics = &cfg.sign.content_box;
    let label_style = cfg.label_style();
    let content_style = cfg.content_style();
    let cx = ctx.center().x;

    let layouts = section_layouts(&state.sections, cfg, measure);
    for (section, layout) in state.sections.iter().zip(layouts) {
        if !section.show_label {
            continue;
        }
        plan.push(DrawOp::Text {
            text: section.title().to_owned(),
            style: label_style,
            pos: Point::new(cx, layout.label_y + section.label_y_offset),
            align: TextAlign::Center,
            baseline: TextBaseline::Top,
            max_width: None,
            opacity: section.label_opacity,
        });

        if !section.show_content || layout.lines.is_empty() || layout.clip.width() <= 0.0 {
            continue;
        }
        plan.push(DrawOp::PushClip(layout.clip));
        plan.push(DrawOp::FillRect {
            rect: layout.box_rect,
            color: cfg.palette.gold,
            opacity: 1.0,
        });
        for (i, line) in layout.lines.into_iter().enumerate() {
            plan.push(DrawOp::Text {
                text: line,
                style: content_style,
                pos: Point::new(
                    cx,
                    layout.box_rect.y0 + metrics.vert_padding + metrics.line_height * i as f64,
                ),
                align: TextAlign::Center,
                baseline: TextBaseline::Top,
                max_width: None,
                opacity: 1.0,
            });
        }
        plan.push(DrawOp::PopClip);
    }
}

fn push_decor(plan: &mut FramePlan, decor: &DecorState, ctx: &RenderCtx<'_>) {
    if ctx.assets.decor_count() == 0 {
        return;
    }
    let cfg = ctx.config;
    let look = &cfg.sign;
    let n = DecorIcon::ALL.len() as f64;
    let total = look.decor_size * n + look.decor_spacing * (n - 1.0);
    let start_x = ctx.center().x - total / 2.0;
    let mid_y = f64::from(cfg.surface.canvas.height) - look.decor_bottom_margin + decor.y_offset;

    for icon in DecorIcon::ALL {
        if ctx.assets.decor(icon).is_none() {
            continue;
        }
        let x = start_x + (look.decor_size + look.decor_spacing) * icon.index() as f64;
        let y = mid_y - look.decor_size / 2.0;
        plan.push(DrawOp::Image {
            image: ImageRef::Decor(icon),
            rect: Rect::new(x, y, x + look.decor_size, y + look.decor_size),
            rotation_deg: 0.0,
            opacity: decor.opacity,
        });
    }
}

/// Plan one sign card. `icon` is the resolved icon (the fallback for unknown names).
pub fn plan_sign(
    state: &SignState,
    decor: &DecorState,
    icon: Sign,
    ctx: &RenderCtx<'_>,
    measure: &mut dyn TextMeasure,
) -> FramePlan {
    let mut plan = FramePlan::cleared(ctx.config.surface.background);
    push_icon_group(&mut plan, state, icon, ctx, measure);
    push_vibe(&mut plan, state, ctx, measure);
    push_sections(&mut plan, state, ctx, measure);
    push_decor(&mut plan, decor, ctx);
    plan.faded(state.fade)
}

#[cfg(test)]
#[path = "../../tests/unit/render/sign.rs"]
mod tests;
