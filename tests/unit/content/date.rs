use super::*;

#[test]
fn iso_dates_get_ordinal_and_short_month() {
    assert_eq!(format_display_date("2026-02-17"), "17th Feb 2026");
    assert_eq!(format_display_date("2026-03-01"), "1st Mar 2026");
    assert_eq!(format_display_date("2026-03-02"), "2nd Mar 2026");
    assert_eq!(format_display_date("2026-03-03"), "3rd Mar 2026");
    assert_eq!(format_display_date("2026-03-11"), "11th Mar 2026");
    assert_eq!(format_display_date("2026-03-22"), "22nd Mar 2026");
    assert_eq!(format_display_date("2026-12-31"), "31st Dec 2026");
}

#[test]
fn non_iso_dates_are_verbatim() {
    assert_eq!(format_display_date("Tuesday"), "Tuesday");
    assert_eq!(format_display_date("2026-02-30"), "2026-02-30");
    assert_eq!(format_display_date("2026-2-7"), "2026-2-7");
    assert_eq!(format_display_date(""), "");
}

#[test]
fn leap_days_are_valid_only_in_leap_years() {
    assert_eq!(format_display_date("2028-02-29"), "29th Feb 2028");
    assert_eq!(format_display_date("2026-02-29"), "2026-02-29");
}
