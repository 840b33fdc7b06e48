use super::*;
use crate::assets::decode::PreparedImage;
use crate::assets::store::ReelAssets;
use crate::config::ReelConfig;
use crate::content::sign::Sign;
use crate::layout::measure::ApproxMeasure;

#[test]
fn headline_breaks_after_the_configured_prefix() {
    let first = "Want a personalised";
    assert_eq!(headline_lines("Want a", first), ("Want a", None));
    assert_eq!(
        headline_lines("Want a personalised", first),
        ("Want a personalised", None)
    );
    assert_eq!(
        headline_lines("Want a personalised rea", first),
        ("Want a personalised", Some("rea"))
    );
    assert_eq!(headline_lines("", first), ("", None));
}

#[test]
fn cta_box_is_text_plus_padding_and_centred() {
    let cfg = ReelConfig::default();
    let assets = ReelAssets::empty();
    let ctx = RenderCtx {
        config: &cfg,
        assets: &assets,
    };
    let mut m = ApproxMeasure::default();
    let text_w = m.measure("Visit starryvibes.ai", &cfg.cta_style());
    let rect = cta_box(&ctx, &mut m);
    assert!((rect.width() - (text_w + 120.0)).abs() < 1e-9);
    assert_eq!(rect.height(), 104.0);
    assert_eq!(rect.y0, 960.0 + 33.0);
    assert!((rect.center().x - 540.0).abs() < 1e-9);
}

#[test]
fn ring_uses_constant_alpha_and_box_is_revealed_left_to_right() {
    let cfg = ReelConfig::default();
    let assets = Sign::ALL.iter().fold(ReelAssets::empty(), |a, s| {
        a.with_sign(*s, PreparedImage::solid(1, 1, [255, 255, 255, 255]))
    });
    let ctx = RenderCtx {
        config: &cfg,
        assets: &assets,
    };
    let mut m = ApproxMeasure::default();
    let mut state = OutroState::new("Want a personalised reading?");
    state.opacity = 1.0;
    state.headline.shown = 100.0;
    state.box_reveal = 0.5;

    let plan = plan_outro(&state, &ctx, &mut m);
    assert!(plan.images().all(|(_, _, o)| (o - 0.3).abs() < 1e-12));
    let texts: Vec<_> = plan.texts().collect();
    assert_eq!(
        texts,
        vec!["Want a personalised", "reading?", "Visit starryvibes.ai"]
    );

    let full = cta_box(&ctx, &mut m);
    let clip = plan
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::PushClip(r) => Some(*r),
            _ => None,
        })
        .unwrap();
    assert_eq!(clip.x0, full.x0);
    assert!((clip.width() - full.width() * 0.5).abs() < 1e-9);
}

#[test]
fn hidden_box_emits_no_clip() {
    let cfg = ReelConfig::default();
    let assets = ReelAssets::empty();
    let ctx = RenderCtx {
        config: &cfg,
        assets: &assets,
    };
    let mut m = ApproxMeasure::default();
    let state = OutroState::new("Want a personalised reading?");
    let plan = plan_outro(&state, &ctx, &mut m);
    assert_eq!(plan.ops.len(), 1);
}
