//! Form host backed by the live document

use rusty_forms::{FieldValue, FormHost, Options, Placement};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    console, Document, Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

/// Prefix of the id given to rendered messages
pub const ERROR_ID_PREFIX: &str = "error__";

/// A `<form>` element and the document it lives in
#[derive(Debug, Clone)]
pub struct DomForm {
    document: Document,
    form: HtmlFormElement,
    form_id: String,
}

impl DomForm {
    /// Look up the form by id in the current document
    pub fn find(form_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;

        let form = document
            .get_element_by_id(form_id)
            .ok_or_else(|| JsValue::from_str(&format!("form '{}' not found", form_id)))?
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| JsValue::from_str(&format!("'{}' is not a form", form_id)))?;

        Ok(Self {
            document,
            form,
            form_id: form_id.to_string(),
        })
    }

    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }

    fn list_id(&self) -> String {
        format!("{}list__{}", ERROR_ID_PREFIX, self.form_id)
    }

    fn message_element(
        &self,
        field: &str,
        message: &str,
        node: &str,
        class: &str,
    ) -> Result<Element, JsValue> {
        let element = self.document.create_element(node)?;
        element.set_class_name(class);
        element.set_id(&error_id(field));
        element.set_text_content(Some(message));
        Ok(element)
    }

    /// The shared list at the top of the form, created on first use
    fn error_list(&self, options: &Options) -> Result<Element, JsValue> {
        if let Some(list) = self.document.get_element_by_id(&self.list_id()) {
            return Ok(list);
        }

        let list = self.document.create_element("ul")?;
        list.set_id(&self.list_id());
        list.set_class_name(&options.list_class);
        self.form.insert_before(&list, self.form.first_child().as_ref())?;
        Ok(list)
    }

    fn try_render(
        &self,
        field: &str,
        element: &Element,
        message: &str,
        options: &Options,
    ) -> Result<(), JsValue> {
        if options.uses_list() {
            let list = self.error_list(options)?;
            let item = self.message_element(field, message, "li", &options.message_class)?;
            list.append_child(&item)?;
            return Ok(());
        }

        let Some(parent) = element.parent_node() else {
            return Ok(());
        };
        let message = self.message_element(
            field,
            message,
            &options.message_node,
            &options.message_class,
        )?;

        match options.placement {
            Placement::Before => {
                parent.insert_before(&message, parent.first_child().as_ref())?;
            }
            Placement::After | Placement::List => {
                parent.append_child(&message)?;
            }
        }
        Ok(())
    }
}

fn error_id(field: &str) -> String {
    format!("{}{}", ERROR_ID_PREFIX, field)
}

/// Checked state for checkboxes and radios, trimmed text for other controls
fn read_value(element: &Element) -> FieldValue {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return match input.type_().as_str() {
            "checkbox" | "radio" => FieldValue::Checked(input.checked()),
            _ => FieldValue::text(input.value()),
        };
    }
    if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        return FieldValue::text(area.value());
    }
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        return FieldValue::text(select.value());
    }
    FieldValue::Absent
}

impl FormHost for DomForm {
    type Element = Element;

    fn resolve_element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn resolve_elements_by_name(&self, name: &str) -> Vec<Element> {
        let selector = format!(
            "[name=\"{}\"]",
            name.replace('\\', "\\\\").replace('"', "\\\"")
        );

        match self.form.query_selector_all(&selector) {
            Ok(nodes) => (0..nodes.length())
                .filter_map(|index| nodes.item(index))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(err) => {
                console::warn_1(&err);
                Vec::new()
            }
        }
    }

    fn value(&self, element: &Element) -> FieldValue {
        read_value(element)
    }

    fn render_error(&self, field: &str, element: &Element, message: &str, options: &Options) {
        if let Err(err) = self.try_render(field, element, message, options) {
            console::warn_1(&err);
        }
    }

    fn clear_error(&self, field: &str) {
        if let Some(rendered) = self.document.get_element_by_id(&error_id(field)) {
            rendered.remove();
        }
    }

    fn clear_error_list(&self) {
        if let Some(list) = self.document.get_element_by_id(&self.list_id()) {
            list.remove();
        }
    }
}
