//! Presence validation

use crate::value::FieldValue;

/// Validates that a value is (or is not) present.
///
/// `expected = true` passes when something is here: a non-empty trimmed
/// text or a checked box. `expected = false` passes only for an empty value.
/// Always answers definitely; presence is never "not applicable".
pub fn present(value: &FieldValue, expected: bool) -> bool {
    value.is_present() == expected
}
