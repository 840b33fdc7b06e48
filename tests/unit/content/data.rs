use super::*;

fn entry(name: &str) -> SignEntry {
    SignEntry {
        name: name.to_owned(),
        vibe: "steady".to_owned(),
        love: "l".to_owned(),
        career: "c".to_owned(),
        money: "m".to_owned(),
        soul_message: "s".to_owned(),
    }
}

#[test]
fn parses_camel_case_soul_message() {
    let json = r#"{"date":"2026-02-17","zodiacs":[{"name":"Leo","vibe":"v","love":"l","career":"c","money":"m","soulMessage":"s"}]}"#;
    let data = ContentData::from_json_str(json).unwrap();
    assert_eq!(data.zodiacs[0].soul_message, "s");
    assert_eq!(data.display_date(), "17th Feb 2026");
}

#[test]
fn validate_requires_exactly_three_entries() {
    let data = ContentData {
        date: String::new(),
        zodiacs: vec![entry("Leo"), entry("Taurus")],
    };
    let err = data.validate().unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
    assert!(err.to_string().contains("found 2"));
}

#[test]
fn validate_rejects_whitespace_only_fields() {
    let mut bad = entry("Taurus");
    bad.money = "   ".to_owned();
    let data = ContentData {
        date: "today".to_owned(),
        zodiacs: vec![entry("Leo"), bad, entry("Aquarius")],
    };
    let err = data.validate().unwrap_err().to_string();
    assert!(err.contains("#2"));
    assert!(err.contains("\"money\""));
}

#[test]
fn missing_fields_surface_as_validation_errors() {
    let json = r#"{"zodiacs":[{"name":"Leo"},{"name":"Leo"},{"name":"Leo"}]}"#;
    let data = ContentData::from_json_str(json).unwrap();
    assert!(matches!(data.validate(), Err(ReelError::Validation(_))));
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        ContentData::from_json_str("{"),
        Err(ReelError::Serde(_))
    ));
}

#[test]
fn from_path_reports_missing_files() {
    let err = ContentData::from_path("target/definitely/missing.json").unwrap_err();
    assert!(err.to_string().contains("missing.json"));
}
