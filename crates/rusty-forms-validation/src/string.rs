//! String validation functions

use crate::patterns::PatternRegistry;
use crate::value::{FieldValue, Verdict};

/// Tests the value against a named pattern.
///
/// Not applicable when the value is empty; an unknown pattern name fails.
pub fn format(value: &FieldValue, pattern: &str, patterns: &PatternRegistry) -> Verdict {
    if !value.is_present() {
        return Verdict::NotApplicable;
    }

    patterns.is_match(pattern, &value.as_text()).into()
}

/// Length is at least `min` characters (inclusive)
pub fn longer_than(value: &FieldValue, min: f64) -> Verdict {
    if !value.is_present() {
        return Verdict::NotApplicable;
    }

    (char_len(value) >= min).into()
}

/// Length is at most `max` characters (inclusive)
pub fn shorter_than(value: &FieldValue, max: f64) -> Verdict {
    if !value.is_present() {
        return Verdict::NotApplicable;
    }

    (char_len(value) <= max).into()
}

fn char_len(value: &FieldValue) -> f64 {
    value.as_text().chars().count() as f64
}
