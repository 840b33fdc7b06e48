use super::*;

#[test]
fn approx_measure_scales_with_chars_size_and_weight() {
    let mut m = ApproxMeasure::default();
    let regular = TextStyle::new(20.0, FontWeight::Regular, Rgba8::WHITE);
    let bold = TextStyle::new(20.0, FontWeight::Bold, Rgba8::WHITE);
    assert_eq!(m.measure("abcd", &regular), 40.0);
    assert!(m.measure("abcd", &bold) > 40.0);
    assert_eq!(m.measure("", &regular), 0.0);
    // chars, not bytes
    assert_eq!(m.measure("éé", &regular), 20.0);
}

#[test]
fn parley_measure_without_font_falls_back_to_approx() {
    let mut m = ParleyMeasure::new(None).unwrap();
    assert!(!m.has_font());
    let style = TextStyle::new(32.0, FontWeight::Medium, Rgba8::BLACK);
    let expected = ApproxMeasure::default().measure("Invest wisely.", &style);
    assert_eq!(m.measure("Invest wisely.", &style), expected);
}

#[test]
fn parley_measure_rejects_non_font_bytes() {
    assert!(ParleyMeasure::new(Some(b"not a font".as_slice())).is_err());
}

#[test]
fn font_weight_values() {
    assert_eq!(FontWeight::Bold.value(), 700.0);
    assert_eq!(FontWeight::default(), FontWeight::Regular);
}
