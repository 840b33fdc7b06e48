use super::*;
use crate::assets::decode::PreparedImage;

#[test]
fn highlight_factor_dims_only_outside_a_non_empty_set() {
    let set = [Sign::Leo, Sign::Taurus];
    assert_eq!(highlight_factor(Sign::Leo, &set, 0.4, 0.5), 0.5);
    assert_eq!(highlight_factor(Sign::Aries, &set, 0.4, 0.5), 0.2);
    assert_eq!(highlight_factor(Sign::Aries, &[], 0.4, 0.5), 0.5);
}

#[test]
fn icons_are_evenly_spaced_and_scaled() {
    let ring = RingConfig::default();
    let icons = ring_layout(
        Point::new(540.0, 960.0),
        &ring,
        0.5,
        0.0,
        1.0,
        RingAlpha::Constant(1.0),
    );
    assert_eq!(icons.len(), 12);
    // Aries at 0 degrees: straight right of the centre.
    assert!((icons[0].center.x - (540.0 + 225.0)).abs() < 1e-9);
    assert!((icons[0].center.y - 960.0).abs() < 1e-9);
    // Cancer at 90 degrees: straight below.
    assert!((icons[3].center.x - 540.0).abs() < 1e-9);
    assert!((icons[3].center.y - (960.0 + 225.0)).abs() < 1e-9);
    assert_eq!(icons[5].size, 75.0);
}

#[test]
fn rotation_offsets_every_icon() {
    let ring = RingConfig::default();
    let icons = ring_layout(
        Point::ZERO,
        &ring,
        1.0,
        90.0,
        1.0,
        RingAlpha::Constant(0.3),
    );
    assert!(icons[0].center.x.abs() < 1e-9);
    assert!((icons[0].center.y - 450.0).abs() < 1e-9);
    assert!(icons.iter().all(|i| (i.opacity - 0.3).abs() < 1e-12));
}

#[test]
fn missing_icons_are_skipped_but_the_ring_continues() {
    let assets = ReelAssets::empty()
        .with_sign(Sign::Aries, PreparedImage::solid(1, 1, [255, 255, 255, 255]))
        .with_sign(Sign::Pisces, PreparedImage::solid(1, 1, [255, 255, 255, 255]));
    let icons = ring_layout(
        Point::ZERO,
        &RingConfig::default(),
        1.0,
        0.0,
        1.0,
        RingAlpha::Highlight(&[]),
    );
    let mut plan = FramePlan::default();
    push_ring(&mut plan, &icons, &assets);
    let drawn: Vec<_> = plan.images().map(|(img, _, _)| img).collect();
    assert_eq!(
        drawn,
        vec![ImageRef::Sign(Sign::Aries), ImageRef::Sign(Sign::Pisces)]
    );
}
