use super::*;

#[test]
fn canonical_order_starts_at_aries() {
    assert_eq!(Sign::ALL[0], Sign::Aries);
    assert_eq!(Sign::ALL[11], Sign::Pisces);
    assert_eq!(Sign::Leo.index(), 4);
    assert_eq!(Sign::Aquarius.index(), 10);
}

#[test]
fn lookup_ignores_case_and_whitespace() {
    assert_eq!(Sign::from_name("  sagittarius "), Some(Sign::Sagittarius));
    assert_eq!(Sign::from_name("TAURUS"), Some(Sign::Taurus));
    assert_eq!(Sign::from_name("Ophiuchus"), None);
}
