use super::*;

#[test]
fn defaults_match_the_authored_look() {
    let cfg = ReelConfig::default();
    assert_eq!(cfg.surface.canvas, Canvas::REEL);
    assert_eq!(cfg.surface.fps, Fps::new(30, 1).unwrap());
    assert_eq!(cfg.timing.crossfade, 0.5);
    assert_eq!(cfg.timing.hold_duration, 19.0);
    assert_eq!(cfg.ring.dim_factor, 0.4);
    assert_eq!(cfg.palette.gold.to_hex(), "#DAC477");
    assert_eq!(cfg.sign.content_box.wrap_width(), 810.0);
    assert_eq!(cfg.capture.live_ceiling_secs, 200.0);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_overrides_only_named_values() {
    let cfg: ReelConfig =
        serde_json::from_str(r##"{"timing":{"hold_duration":12},"palette":{"gold":"#FFCC00"}}"##)
            .unwrap();
    assert_eq!(cfg.timing.hold_duration, 12.0);
    assert_eq!(cfg.timing.crossfade, 0.5);
    assert_eq!(cfg.palette.gold, Rgba8::rgb(0xFF, 0xCC, 0x00));
    assert_eq!(cfg.ring.radius, 450.0);
}

#[test]
fn validate_rejects_negative_timing() {
    let mut cfg = ReelConfig::default();
    cfg.timing.crossfade = -0.1;
    assert!(matches!(cfg.validate(), Err(ReelError::Validation(_))));

    let mut cfg = ReelConfig::default();
    cfg.ring.dim_factor = 1.5;
    assert!(cfg.validate().is_err());
}

#[test]
fn styles_use_palette_and_weights() {
    let cfg = ReelConfig::default();
    assert_eq!(cfg.content_style().weight, FontWeight::Medium);
    assert_eq!(cfg.content_style().color, Rgba8::BLACK);
    assert_eq!(cfg.label_style().weight, FontWeight::Bold);
    assert_eq!(cfg.vibe_style().color, Rgba8::WHITE);
}

#[test]
fn validate_caps_the_live_ceiling() {
    let mut cfg = ReelConfig::default();
    cfg.capture.live_ceiling_secs = 1e20;
    assert!(matches!(cfg.validate(), Err(ReelError::Validation(_))));
    cfg.capture.live_ceiling_secs = MAX_LIVE_CEILING_SECS;
    cfg.validate().unwrap();
}
