//! Outcome of a validation pass

use indexmap::IndexMap;
use serde::Serialize;

/// Outcome for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EvaluationResult {
    /// Every rule passed (or had nothing to check)
    Valid,
    /// A rule failed; carries that rule's message
    Invalid { message: String },
    /// No rule had anything to check, e.g. an optional field left empty
    NotApplicable,
}

impl EvaluationResult {
    pub fn is_invalid(&self) -> bool {
        matches!(self, EvaluationResult::Invalid { .. })
    }

    /// Valid and not-applicable fields both let the form through
    pub fn is_valid(&self) -> bool {
        !self.is_invalid()
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            EvaluationResult::Invalid { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Outcome of a whole pass, fields in model order.
///
/// Fields missing from the form are absent from the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormResult {
    valid: bool,
    fields: IndexMap<String, EvaluationResult>,
}

impl FormResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            fields: IndexMap::new(),
        }
    }

    pub(crate) fn record(&mut self, field: &str, result: EvaluationResult) {
        if result.is_invalid() {
            self.valid = false;
        }
        self.fields.insert(field.to_string(), result);
    }

    /// True iff no field is invalid
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn get(&self, field: &str) -> Option<&EvaluationResult> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Message of an invalid field
    pub fn error(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(EvaluationResult::message)
    }

    /// Invalid fields with their messages
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|(field, result)| result.message().map(|m| (field.as_str(), m)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EvaluationResult)> {
        self.fields.iter().map(|(field, result)| (field.as_str(), result))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
