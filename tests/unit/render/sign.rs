use super::*;
use crate::animation::state::SectionKind;
use crate::assets::decode::PreparedImage;
use crate::assets::store::ReelAssets;
use crate::layout::measure::ApproxMeasure;

fn white() -> PreparedImage {
    PreparedImage::solid(1, 1, [255, 255, 255, 255])
}

fn card() -> SignState {
    let mut s = SignState::new(
        "LEO",
        "Vibe: radiant",
        [
            "Invest wisely.".to_owned(),
            "A long career paragraph that certainly needs more than one line to fit inside the box width we give it here".to_owned(),
            String::new(),
            "Breathe.".to_owned(),
        ],
    );
    s.icon_x = 0.0;
    s.icon_rotation = 0.0;
    s.icon_opacity = 1.0;
    s.show_name = true;
    s.name.shown = 3.0;
    s
}

#[test]
fn sections_stack_by_box_height() {
    let cfg = ReelConfig::default();
    let mut m = ApproxMeasure::default();
    let layouts = section_layouts(&card().sections, &cfg, &mut m);
    assert_eq!(layouts.len(), 4);
    assert_eq!(layouts[0].label_y, 550.0);
    assert_eq!(layouts[0].lines.len(), 1);
    assert_eq!(layouts[0].box_rect.height(), 89.0);
    assert_eq!(layouts[0].box_rect.y0, 550.0 + 50.0 + 30.0);
    // label + margin + box + bottom margin
    assert_eq!(layouts[1].label_y, 550.0 + 50.0 + 30.0 + 89.0 + 50.0);
    assert!(layouts[1].lines.len() > 1);
    // empty money text: zero-height box
    assert_eq!(layouts[2].box_rect.height(), 0.0);
    assert_eq!(
        layouts[3].label_y,
        layouts[2].label_y + 50.0 + 30.0 + 0.0 + 50.0
    );
}

#[test]
fn mask_width_tracks_progress() {
    let cfg = ReelConfig::default();
    let mut m = ApproxMeasure::default();
    let mut state = card();
    let mut last = -1.0;
    for i in 0..=4 {
        let p = f64::from(i) / 4.0;
        state.sections[0].mask = p;
        let l = section_layouts(&state.sections, &cfg, &mut m);
        assert!((l[0].clip.width() - 900.0 * p).abs() < 1e-9);
        assert_eq!(l[0].clip.x0, l[0].box_rect.x0);
        assert!(l[0].clip.width() > last);
        last = l[0].clip.width();
    }
}

#[test]
fn content_requires_label_gate_and_is_clipped() {
    let cfg = ReelConfig::default();
    let assets = ReelAssets::empty();
    let ctx = RenderCtx {
        config: &cfg,
        assets: &assets,
    };
    let mut m = ApproxMeasure::default();
    let mut state = card();
    let love = SectionKind::Love.index();
    state.sections[love].show_content = true;
    state.sections[love].mask = 1.0;

    let plan = plan_sign(&state, &DecorState::default(), Sign::Leo, &ctx, &mut m);
    assert!(!plan.texts().any(|t| t == "Invest wisely."));

    state.sections[love].show_label = true;
    state.sections[love].label_opacity = 1.0;
    let plan = plan_sign(&state, &DecorState::default(), Sign::Leo, &ctx, &mut m);
    let texts: Vec<_> = plan.texts().collect();
    assert!(texts.contains(&"LOVE"));
    assert!(texts.contains(&"Invest wisely."));

    let clip_at = plan
        .ops
        .iter()
        .position(|op| matches!(op, DrawOp::PushClip(_)))
        .unwrap();
    assert!(matches!(plan.ops[clip_at + 1], DrawOp::FillRect { .. }));
    assert!(plan.ops[clip_at..].iter().any(|op| *op == DrawOp::PopClip));
}

#[test]
fn typed_name_recentres_the_icon_group() {
    let cfg = ReelConfig::default();
    let assets = ReelAssets::empty().with_sign(Sign::Leo, white());
    let ctx = RenderCtx {
        config: &cfg,
        assets: &assets,
    };
    let mut m = ApproxMeasure::default();
    let mut state = card();

    state.name.shown = 0.0;
    let plan = plan_sign(&state, &DecorState::default(), Sign::Leo, &ctx, &mut m);
    let (_, rect, _) = plan.images().next().unwrap();
    assert!((rect.center().x - 540.0).abs() < 1e-9);

    state.name.shown = 3.0;
    let plan = plan_sign(&state, &DecorState::default(), Sign::Leo, &ctx, &mut m);
    let (_, rect, _) = plan.images().next().unwrap();
    assert!(rect.center().x < 540.0);
    assert!(plan.texts().any(|t| t == "LEO"));
}

#[test]
fn missing_icon_is_skipped_but_name_still_draws() {
    let cfg = ReelConfig::default();
    let assets = ReelAssets::empty();
    let ctx = RenderCtx {
        config: &cfg,
        assets: &assets,
    };
    let mut m = ApproxMeasure::default();
    let plan = plan_sign(&card(), &DecorState::default(), Sign::Leo, &ctx, &mut m);
    assert_eq!(plan.images().count(), 0);
    assert!(plan.texts().any(|t| t == "LEO"));
}

#[test]
fn decor_row_is_drawn_last_and_suppressed_without_images() {
    let cfg = ReelConfig::default();
    let mut m = ApproxMeasure::default();
    let decor = DecorState {
        y_offset: 0.0,
        opacity: 0.4,
    };

    let none = ReelAssets::empty();
    let ctx = RenderCtx {
        config: &cfg,
        assets: &none,
    };
    let plan = plan_sign(&card(), &decor, Sign::Leo, &ctx, &mut m);
    assert!(
        plan.images()
            .all(|(img, _, _)| !matches!(img, ImageRef::Decor(_)))
    );

    let some = DecorIcon::ALL
        .iter()
        .fold(ReelAssets::empty(), |a, d| a.with_decor(*d, white()));
    let ctx = RenderCtx {
        config: &cfg,
        assets: &some,
    };
    let plan = plan_sign(&card(), &decor, Sign::Leo, &ctx, &mut m);
    let decor_ops: Vec<_> = plan.images().collect();
    assert_eq!(decor_ops.len(), 4);
    // 4 × 400 − 3 × 100 = 1300 wide, centred.
    assert_eq!(decor_ops[0].1.x0, 540.0 - 650.0);
    assert_eq!(decor_ops[1].1.x0, 540.0 - 650.0 + 300.0);
    assert_eq!(decor_ops[0].1.center().y, 1920.0 - 120.0);
    assert!(decor_ops.iter().all(|(_, _, o)| *o == 0.4));
    assert!(matches!(
        plan.ops.last(),
        Some(DrawOp::Image {
            image: ImageRef::Decor(DecorIcon::CrystalBall),
            ..
        })
    ));
}
