//! Calendar date validation

use chrono::NaiveDate;

use crate::value::{FieldValue, Verdict};

/// Earliest year accepted by [`valid_date`]
pub const MIN_YEAR: i32 = 1900;
/// Latest year accepted by [`valid_date`]
pub const MAX_YEAR: i32 = 2100;

const DELIMITERS: [char; 3] = ['-', '.', '/'];

/// Validates a `D-M-Y` date (or `M-D-Y` when `us_format` is set).
///
/// Any of `-`, `.` and `/` separate the parts, as does `delimiter` itself.
/// Two digit years fall in the 2000s. The date must exist on the calendar
/// and its year must lie in `MIN_YEAR..=MAX_YEAR`.
///
/// # Examples
/// ```
/// use rusty_forms_validation::{valid_date, FieldValue, Verdict};
///
/// assert_eq!(valid_date(&FieldValue::text("29-02-2000"), false, '-'), Verdict::Pass);
/// assert_eq!(valid_date(&FieldValue::text("29-02-1900"), false, '-'), Verdict::Fail);
/// ```
pub fn valid_date(value: &FieldValue, us_format: bool, delimiter: char) -> Verdict {
    if !value.is_present() {
        return Verdict::NotApplicable;
    }

    parse_date(&value.as_text(), us_format, delimiter).is_some().into()
}

/// Parse a date string into a calendar date, `None` on any violation.
pub fn parse_date(input: &str, us_format: bool, delimiter: char) -> Option<NaiveDate> {
    let normalized: String = input
        .chars()
        .map(|c| if DELIMITERS.contains(&c) { delimiter } else { c })
        .collect();

    let parts: Vec<&str> = normalized.split(delimiter).collect();
    let [first, second, year] = parts.as_slice() else {
        return None;
    };

    let (day, month) = if us_format {
        (*second, *first)
    } else {
        (*first, *second)
    };

    let day = parse_part(day, 2)?;
    let month = parse_part(month, 2)?;
    let year = match year.len() {
        2 => 2000 + parse_part(year, 2)?,
        4 => parse_part(year, 4)?,
        _ => return None,
    };

    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return None;
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&(year as i32)) {
        return None;
    }

    // Month lengths and leap years
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

fn parse_part(part: &str, max_len: usize) -> Option<u32> {
    if part.is_empty() || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    part.parse().ok()
}
