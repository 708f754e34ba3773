//! Cross-field equality

use std::collections::HashMap;

use crate::value::FieldValue;

/// Read-only access to the current value of other fields.
pub trait FieldLookup {
    /// Current value of the field with this identifier, `None` when it
    /// cannot be resolved.
    fn field_value(&self, id: &str) -> Option<FieldValue>;
}

/// Lookup that resolves nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFields;

impl FieldLookup for NoFields {
    fn field_value(&self, _id: &str) -> Option<FieldValue> {
        None
    }
}

impl FieldLookup for HashMap<String, FieldValue> {
    fn field_value(&self, id: &str) -> Option<FieldValue> {
        self.get(id).cloned()
    }
}

/// Value is strictly equal to the other field's current value.
///
/// An unresolvable field never matches.
pub fn matches_field(value: &FieldValue, other: Option<&FieldValue>) -> bool {
    other.map_or(false, |other| other == value)
}
