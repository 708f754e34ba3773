// File: rusty-forms/src/model.rs
// Purpose: Declarative validation model as authored by the caller

use indexmap::IndexMap;
use rusty_forms_validation::Param;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Either a single item or a list of them.
///
/// Models written by hand often give one rule (or one parameter) without
/// wrapping it in a list; both shapes deserialize here and are flattened
/// into a list by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::One(item) => std::slice::from_ref(item).iter(),
            OneOrMany::Many(items) => items.iter(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append, turning a single item into a list when needed
    pub fn push(self, item: T) -> Self {
        let mut items = self.into_vec();
        items.push(item);
        OneOrMany::Many(items)
    }
}

/// Validation model: field identifier to field spec, in declared order.
///
/// # Example
/// ```
/// use rusty_forms::Model;
///
/// let model = Model::from_json(r#"{
///     "email": { "required": true, "rules": { "predicate": "format", "params": "email" } },
///     "age": { "rules": [{ "predicate": "greater_than", "params": 18, "error": "Too young" }] }
/// }"#).unwrap();
///
/// assert_eq!(model.ids().collect::<Vec<_>>(), vec!["email", "age"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model {
    fields: IndexMap<String, FieldSpec>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a model from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Add a field (builder style)
    pub fn field(mut self, id: impl Into<String>, spec: FieldSpec) -> Self {
        self.insert(id, spec);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, spec: FieldSpec) {
        self.fields.insert(id.into(), spec);
    }

    pub fn get(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(id, spec)| (id.as_str(), spec))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Rules attached to one field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Shorthand for a leading presence rule
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    #[serde(default, alias = "validate", skip_serializing_if = "Option::is_none")]
    pub rules: Option<OneOrMany<RuleSpec>>,

    /// Message for every rule of this field that has none of its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Predicate-keyed shorthand, e.g. `"minimum_length": 5`
    #[serde(flatten)]
    pub shorthand: IndexMap<String, OneOrMany<Param>>,
}

impl FieldSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn rule(mut self, rule: RuleSpec) -> Self {
        self.rules = Some(match self.rules.take() {
            Some(rules) => rules.push(rule),
            None => OneOrMany::One(rule),
        });
        self
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Predicate-keyed rule, as in `{"minimum_length": 5}`
    pub fn shorthand(mut self, predicate: impl Into<String>, param: impl Into<Param>) -> Self {
        self.shorthand
            .insert(predicate.into(), OneOrMany::One(param.into()));
        self
    }
}

/// One rule: predicate name, bound parameters and optional message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(alias = "rule", alias = "method")]
    pub predicate: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<OneOrMany<Param>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RuleSpec {
    pub fn new(predicate: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            params: None,
            error: None,
        }
    }

    /// Bind one more parameter
    pub fn param(mut self, param: impl Into<Param>) -> Self {
        let param = param.into();
        self.params = Some(match self.params.take() {
            Some(params) => params.push(param),
            None => OneOrMany::One(param),
        });
        self
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }
}
