const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn ordinal_suffix(day: u32) -> &'static str {
    if (4..=20).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn parse_iso(raw: &str) -> Option<(u32, u32, u32)> {
    let mut parts = raw.split('-');
    let (y, m, d) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return None;
    }
    if ![y, m, d].iter().all(|p| p.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    let (y, m, d) = (y.parse().ok()?, m.parse().ok()?, d.parse().ok()?);
    if !(1..=12).contains(&m) || d == 0 || d > days_in_month(y, m) {
        return None;
    }
    Some((y, m, d))
}

/// Display form of a content date: ISO `YYYY-MM-DD` becomes "17th Feb 2026",
/// anything else is shown verbatim.
pub fn format_display_date(raw: &str) -> String {
    let trimmed = raw.trim();
    match parse_iso(trimmed) {
        Some((y, m, d)) => format!(
            "{d}{} {} {y}",
            ordinal_suffix(d),
            MONTHS[(m - 1) as usize]
        ),
        None => raw.to_owned(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/date.rs"]
mod tests;
