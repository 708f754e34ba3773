//! Field values, rule parameters and predicate verdicts

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coerce;

/// Current value of a form control as read by the host.
///
/// Hosts build text values through [`FieldValue::text`], which trims them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Checked state of a checkbox or radio button
    Checked(bool),
    /// Text of any other control, trimmed of surrounding whitespace
    Text(String),
    /// The control exposes no value at all
    #[default]
    Absent,
}

impl FieldValue {
    /// Build a text value, trimming leading and trailing whitespace
    pub fn text(value: impl AsRef<str>) -> Self {
        FieldValue::Text(value.as_ref().trim().to_string())
    }

    pub fn checked(checked: bool) -> Self {
        FieldValue::Checked(checked)
    }

    /// Whether something is here: non-empty text or a checked box.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Checked(checked) => *checked,
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Absent => false,
        }
    }

    /// String form used by pattern and length checks.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(text) => Cow::Borrowed(text.as_str()),
            FieldValue::Checked(true) => Cow::Borrowed("true"),
            FieldValue::Checked(false) => Cow::Borrowed("false"),
            FieldValue::Absent => Cow::Borrowed(""),
        }
    }

    /// Numeric form used by the number predicates.
    ///
    /// Absent values and empty text are not numbers.
    pub fn to_number(&self) -> f64 {
        match self {
            FieldValue::Checked(checked) => f64::from(u8::from(*checked)),
            FieldValue::Text(text) if text.is_empty() => f64::NAN,
            FieldValue::Text(text) => coerce::to_number(text),
            FieldValue::Absent => f64::NAN,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::text(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Checked(value)
    }
}

/// Largest magnitude below which every whole `f64` is an exact integer
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Extra argument bound to a rule, after the field value itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Param {
    /// Truthiness as a browser would see it
    pub fn is_truthy(&self) -> bool {
        match self {
            Param::Bool(b) => *b,
            Param::Number(n) => *n != 0.0 && !n.is_nan(),
            Param::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_number(&self) -> f64 {
        match self {
            Param::Bool(b) => f64::from(u8::from(*b)),
            Param::Number(n) => *n,
            Param::Text(s) => coerce::to_number(s),
        }
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Param::Text(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Bool(b) => write!(f, "{}", b),
            Param::Number(n) if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER => {
                write!(f, "{}", *n as i64)
            }
            Param::Number(n) => write!(f, "{}", n),
            Param::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Number(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Number(value as f64)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Number(f64::from(value))
    }
}

impl From<usize> for Param {
    fn from(value: usize) -> Self {
        Param::Number(value as f64)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

/// Outcome of a single predicate.
///
/// `NotApplicable` means the rule had nothing to look at (an empty value)
/// and must neither pass nor fail the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Pass,
    Fail,
    NotApplicable,
}

impl Verdict {
    pub fn is_fail(self) -> bool {
        self == Verdict::Fail
    }
}

impl From<bool> for Verdict {
    fn from(passed: bool) -> Self {
        if passed {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}
