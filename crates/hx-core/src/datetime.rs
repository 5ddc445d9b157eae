//! Appointment date parsing for the sort stage.
//!
//! Report exports mix US-style (`03/14/2024`), ISO (`2024-03-14`) and
//! two-digit-year (`3/14/24`) dates, sometimes followed by a time. Values
//! that match none of these are unparsable and sort after every dated row.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const TIME_FORMATS: &[&str] = &[
    "%H:%M:%S",
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
    "%I:%M:%S%p",
    "%I:%M%p",
];

/// Parses an appointment date into a comparable instant.
///
/// ```
/// use chrono::NaiveDate;
/// use hx_core::datetime::parse_appointment_date;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 3, 14)
///     .and_then(|date| date.and_hms_opt(0, 0, 0));
/// assert_eq!(parse_appointment_date("03/14/2024"), expected);
/// assert_eq!(parse_appointment_date("2024-03-14"), expected);
/// assert_eq!(parse_appointment_date("3/14/24"), expected);
/// assert_eq!(parse_appointment_date("not a date"), None);
/// ```
pub fn parse_appointment_date(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let separator = trimmed
        .char_indices()
        .find(|(_, ch)| *ch == 'T' || ch.is_whitespace());
    let (date_part, time_part) = match separator {
        Some((split, ch)) => (&trimmed[..split], trimmed[split + ch.len_utf8()..].trim()),
        None => (trimmed, ""),
    };
    let date = parse_date(date_part)?;
    if time_part.is_empty() {
        return date.and_hms_opt(0, 0, 0);
    }
    let time = parse_time(time_part)?;
    Some(date.and_time(time))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let separator = if value.contains('/') { '/' } else { '-' };
    let parts: Vec<&str> = value.split(separator).collect();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };
    if !parts
        .iter()
        .all(|part| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit()))
    {
        return None;
    }
    if first.len() == 4 {
        // YYYY-MM-DD or YYYY/MM/DD
        return NaiveDate::from_ymd_opt(
            first.parse().ok()?,
            second.parse().ok()?,
            third.parse().ok()?,
        );
    }
    if first.len() > 2 || second.len() > 2 {
        return None;
    }
    let year = match third.len() {
        4 => third.parse().ok()?,
        2 => expand_two_digit_year(third.parse().ok()?),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, first.parse().ok()?, second.parse().ok()?)
}

/// Same pivot as `%y`: 00-68 map to 2000-2068, 69-99 to 1969-1999.
fn expand_two_digit_year(year: i32) -> i32 {
    if year < 69 { 2000 + year } else { 1900 + year }
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}
