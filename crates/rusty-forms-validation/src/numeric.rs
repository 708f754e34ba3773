//! Numeric validation functions

use std::fmt;
use std::str::FromStr;

use crate::coerce::{parse_float_prefix, parse_int_prefix};
use crate::value::{FieldValue, Param, Verdict};

/// Comparison applied by [`compare_numbers`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    /// Value is an exact multiple of the operand
    MultipleOf,
    NotEqual,
    #[default]
    Equal,
}

impl Operator {
    /// Parse an operator symbol; anything unrecognised means equality.
    pub fn parse(symbol: &str) -> Self {
        match symbol.trim() {
            ">" => Operator::Greater,
            ">=" => Operator::GreaterOrEqual,
            "<" => Operator::Less,
            "<=" => Operator::LessOrEqual,
            "%" => Operator::MultipleOf,
            "!=" => Operator::NotEqual,
            _ => Operator::Equal,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Greater => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::MultipleOf => "%",
            Operator::NotEqual => "!=",
            Operator::Equal => "==",
        }
    }

    fn apply(self, value: f64, operand: f64) -> bool {
        match self {
            Operator::Greater => value > operand,
            Operator::GreaterOrEqual => value >= operand,
            Operator::Less => value < operand,
            Operator::LessOrEqual => value <= operand,
            // x % 0 is NaN, which never equals zero
            Operator::MultipleOf => value % operand == 0.0,
            Operator::NotEqual => value != operand,
            Operator::Equal => value == operand,
        }
    }
}

impl FromStr for Operator {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Operator::parse(s))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Value is a whole number: it is numeric and its leading integer and
/// leading decimal readings agree (so `"1e3"` and `"2.5"` are rejected).
pub fn is_integer(value: &FieldValue, invert: bool) -> Verdict {
    if !value.is_present() {
        return Verdict::NotApplicable;
    }

    let integer = match value {
        FieldValue::Text(text) => {
            !value.to_number().is_nan()
                && matches!(
                    (parse_float_prefix(text), parse_int_prefix(text)),
                    (Some(float), Some(int)) if float == int
                )
        }
        // only `Checked(true)` is present, and it reads as 1
        FieldValue::Checked(_) => true,
        FieldValue::Absent => false,
    };

    (integer != invert).into()
}

/// Value converts to a number
pub fn is_number(value: &FieldValue, invert: bool) -> Verdict {
    if !value.is_present() {
        return Verdict::NotApplicable;
    }

    (!value.to_number().is_nan() != invert).into()
}

/// Compares the value against `required` with `operator`.
///
/// Both sides are coerced to numbers. If either is not a number the result
/// is `false`; an empty value is not a number, so this never answers
/// "not applicable".
pub fn compare_numbers(value: &FieldValue, required: &Param, operator: Operator) -> bool {
    let value = value.to_number();
    let operand = required.as_number();

    if value.is_nan() || operand.is_nan() {
        return false;
    }

    operator.apply(value, operand)
}

/// Value is at least `required`
pub fn greater_than(value: &FieldValue, required: &Param) -> bool {
    compare_numbers(value, required, Operator::GreaterOrEqual)
}

/// Value is at most `required`
pub fn less_than(value: &FieldValue, required: &Param) -> bool {
    compare_numbers(value, required, Operator::LessOrEqual)
}
