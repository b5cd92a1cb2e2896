/// Calendar date parsed from the leading `YYYY-MM-DD` of an ISO-8601 string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CalendarDate {
    pub(crate) year: u32,
    pub(crate) month: u32,
    pub(crate) day: u32,
}

/// Parse `YYYY-MM-DD`, optionally followed by a `T` time component.
pub(crate) fn parse_iso_date(s: &str) -> Option<CalendarDate> {
    let s = s.trim();
    let date = s.split_once('T').map_or(s, |(d, _)| d);

    let mut parts = date.split('-');
    let (y, m, d) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return None;
    }
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if !(all_digits(y) && all_digits(m) && all_digits(d)) {
        return None;
    }

    let year: u32 = y.parse().ok()?;
    let month: u32 = m.parse().ok()?;
    let day: u32 = d.parse().ok()?;
    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return None;
    }
    Some(CalendarDate { year, month, day })
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        _ => 31,
    }
}

/// Format an ISO date as `DD.MM.YYYY` for the podium header.
///
/// Empty input formats to an empty string. Input that is not a calendar date is passed
/// through trimmed, so the header still shows what the user typed.
pub fn format_date(iso: &str) -> String {
    let trimmed = iso.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match parse_iso_date(trimmed) {
        Some(d) => format!("{:02}.{:02}.{:04}", d.day, d.month, d.year),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/date.rs"]
mod tests;
