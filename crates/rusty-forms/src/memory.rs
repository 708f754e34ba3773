// File: rusty-forms/src/memory.rs
// Purpose: In-memory form host (server-side validation, tests)

use std::cell::{Cell, RefCell};

use indexmap::IndexMap;
use rusty_forms_validation::FieldValue;

use crate::host::FormHost;
use crate::options::Options;

#[derive(Debug, Clone)]
struct Control {
    id: Option<String>,
    name: String,
    value: FieldValue,
}

/// Handle to a control of a [`MemoryForm`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryElement(usize);

impl MemoryElement {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Form held in memory.
///
/// Controls are addressed by id, or by name for groups. Rendered messages are
/// recorded per field so callers can read them back.
///
/// ```
/// use rusty_forms::MemoryForm;
///
/// // Submitted key/value pairs; repeated keys become a group
/// let form = MemoryForm::from_pairs([("email", "a@b.co"), ("tags", "rust"), ("tags", "wasm")]);
/// assert!(form.has_id("email"));
/// assert!(!form.has_id("tags"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryForm {
    controls: RefCell<Vec<Control>>,
    rendered: RefCell<IndexMap<String, String>>,
    list_clears: Cell<usize>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from submitted pairs. A name seen once becomes a control with
    /// that id; a repeated name becomes a group reachable by name only.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let pairs: Vec<(String, FieldValue)> = pairs
            .into_iter()
            .map(|(name, value)| (name.into(), FieldValue::text(value)))
            .collect();

        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for (name, _) in &pairs {
            *counts.entry(name.as_str()).or_default() += 1;
        }

        let controls = pairs
            .iter()
            .map(|(name, value)| Control {
                id: (counts[name.as_str()] == 1).then(|| name.clone()),
                name: name.clone(),
                value: value.clone(),
            })
            .collect();

        Self {
            controls: RefCell::new(controls),
            ..Self::default()
        }
    }

    /// Add a control with an id (its name is the id too)
    pub fn with_value(self, id: impl Into<String>, value: FieldValue) -> Self {
        let id = id.into();
        self.controls.borrow_mut().push(Control {
            id: Some(id.clone()),
            name: id,
            value,
        });
        self
    }

    pub fn with_text(self, id: impl Into<String>, text: impl AsRef<str>) -> Self {
        self.with_value(id, FieldValue::text(text))
    }

    pub fn with_checked(self, id: impl Into<String>, checked: bool) -> Self {
        self.with_value(id, FieldValue::Checked(checked))
    }

    /// Add controls sharing a name and no id, e.g. a radio group
    pub fn with_group<I>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = FieldValue>,
    {
        let name = name.into();
        self.controls
            .borrow_mut()
            .extend(values.into_iter().map(|value| Control {
                id: None,
                name: name.clone(),
                value,
            }));
        self
    }

    /// Change the value of the control with this id, adding it if missing
    pub fn set_value(&self, id: &str, value: FieldValue) {
        let mut controls = self.controls.borrow_mut();
        match controls.iter_mut().find(|c| c.id.as_deref() == Some(id)) {
            Some(control) => control.value = value,
            None => controls.push(Control {
                id: Some(id.to_string()),
                name: id.to_string(),
                value,
            }),
        }
    }

    pub fn set_text(&self, id: &str, text: impl AsRef<str>) {
        self.set_value(id, FieldValue::text(text));
    }

    /// Take a control off the form
    pub fn remove(&self, id: &str) {
        self.controls
            .borrow_mut()
            .retain(|c| c.id.as_deref() != Some(id));
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.resolve_element(id).is_some()
    }

    /// Message currently rendered for a field
    pub fn rendered_error(&self, field: &str) -> Option<String> {
        self.rendered.borrow().get(field).cloned()
    }

    pub fn rendered_errors(&self) -> Vec<(String, String)> {
        self.rendered
            .borrow()
            .iter()
            .map(|(field, message)| (field.clone(), message.clone()))
            .collect()
    }

    /// How many times the shared error list was emptied
    pub fn list_clears(&self) -> usize {
        self.list_clears.get()
    }
}

impl FormHost for MemoryForm {
    type Element = MemoryElement;

    fn resolve_element(&self, id: &str) -> Option<MemoryElement> {
        self.controls
            .borrow()
            .iter()
            .position(|c| c.id.as_deref() == Some(id))
            .map(MemoryElement)
    }

    fn resolve_elements_by_name(&self, name: &str) -> Vec<MemoryElement> {
        self.controls
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name == name)
            .map(|(index, _)| MemoryElement(index))
            .collect()
    }

    fn value(&self, element: &MemoryElement) -> FieldValue {
        self.controls
            .borrow()
            .get(element.0)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    fn render_error(
        &self,
        field: &str,
        _element: &MemoryElement,
        message: &str,
        _options: &Options,
    ) {
        self.rendered
            .borrow_mut()
            .insert(field.to_string(), message.to_string());
    }

    fn clear_error(&self, field: &str) {
        self.rendered.borrow_mut().shift_remove(field);
    }

    fn clear_error_list(&self) {
        self.rendered.borrow_mut().clear();
        self.list_clears.set(self.list_clears.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolution_by_id_then_name() {
        let form = MemoryForm::new()
            .with_text("email", " a@b.co ")
            .with_group("colour", [FieldValue::Checked(false), FieldValue::Checked(true)]);

        assert_eq!(form.resolve_field("email").len(), 1);
        assert_eq!(form.resolve_field("colour").len(), 2);
        assert!(form.resolve_field("missing").is_empty());

        let email = form.resolve_element("email").unwrap();
        assert_eq!(form.value(&email), FieldValue::text("a@b.co"));
    }

    #[test]
    fn test_from_pairs_groups_repeated_names() {
        let form = MemoryForm::from_pairs([("name", "Ada"), ("tag", "a"), ("tag", "b")]);
        assert!(form.has_id("name"));
        assert!(!form.has_id("tag"));
        assert_eq!(form.resolve_elements_by_name("tag").len(), 2);
    }

    #[test]
    fn test_set_value_adds_missing_control() {
        let form = MemoryForm::new();
        form.set_text("late", "value");
        assert!(form.has_id("late"));
        form.set_text("late", "changed");
        let late = form.resolve_element("late").unwrap();
        assert_eq!(form.value(&late), FieldValue::text("changed"));
        form.remove("late");
        assert!(!form.has_id("late"));
    }

    #[test]
    fn test_clearing_without_rendered_error_is_noop() {
        let form = MemoryForm::new().with_text("email", "");
        form.clear_error("email");
        form.clear_error("never-declared");
        assert!(form.rendered_errors().is_empty());
    }

    #[test]
    fn test_render_and_clear() {
        let form = MemoryForm::new().with_text("email", "");
        let element = form.resolve_element("email").unwrap();
        form.render_error("email", &element, "Bad", &Options::default());
        assert_eq!(form.rendered_error("email").as_deref(), Some("Bad"));
        form.clear_error("email");
        assert_eq!(form.rendered_error("email"), None);
    }
}
