// File: rusty-forms/src/host.rs
// Purpose: Boundary between the engine and whatever holds the form

use rusty_forms_validation::{FieldLookup, FieldValue};

use crate::options::Options;

/// The form as seen by the engine.
///
/// A host resolves field identifiers to element handles, reads their current
/// values and shows or removes rendered messages. Methods take `&self`:
/// hosts backed by a live document mutate through the document, in-memory
/// hosts use interior mutability.
pub trait FormHost {
    /// Handle to one form control
    type Element;

    /// Element with this identifier, if any
    fn resolve_element(&self, id: &str) -> Option<Self::Element>;

    /// Every element sharing this name (a radio group, repeated inputs)
    fn resolve_elements_by_name(&self, name: &str) -> Vec<Self::Element>;

    /// Current value: checked state for checkboxes and radios, trimmed text
    /// otherwise, `Absent` when the element has no value
    fn value(&self, element: &Self::Element) -> FieldValue;

    /// Show `message` for `field` next to `element`
    fn render_error(&self, field: &str, element: &Self::Element, message: &str, options: &Options);

    /// Remove the message rendered for `field`; nothing happens if there is none
    fn clear_error(&self, field: &str);

    /// Empty the shared error list, when messages are collected into one
    fn clear_error_list(&self) {}

    /// Resolve a field: by identifier first, then by name. Empty when the
    /// field is not on the form.
    fn resolve_field(&self, field: &str) -> Vec<Self::Element> {
        match self.resolve_element(field) {
            Some(element) => vec![element],
            None => self.resolve_elements_by_name(field),
        }
    }
}

/// Lets predicates read other fields through a host
pub struct HostLookup<'h, H: ?Sized>(pub &'h H);

impl<H: FormHost + ?Sized> FieldLookup for HostLookup<'_, H> {
    fn field_value(&self, id: &str) -> Option<FieldValue> {
        self.0
            .resolve_element(id)
            .map(|element| self.0.value(&element))
    }
}
