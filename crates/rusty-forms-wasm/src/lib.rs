//! rusty-forms WASM
//!
//! Browser bindings: attach a model to a `<form>`, validate on submit and
//! render messages into the document.

use std::cell::RefCell;
use std::rc::Rc;

use rusty_forms::validation::{self, FieldValue, PatternRegistry, Verdict};
use rusty_forms::{FormResult, Model, Options, Validator};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Event;

mod dom;

pub use dom::{DomForm, ERROR_ID_PREFIX};

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Validation error returned to JavaScript
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

fn config_error(message: String) -> JsValue {
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Validation attached to one form.
///
/// Submissions are intercepted and cancelled while the form is invalid. The
/// listener is removed when the object is freed.
#[wasm_bindgen]
pub struct FormValidation {
    validator: Rc<Validator>,
    form: DomForm,
    last: Rc<RefCell<Option<FormResult>>>,
    on_submit: Closure<dyn FnMut(Event)>,
}

#[wasm_bindgen]
impl FormValidation {
    /// # Arguments
    /// * `form_id` - id of the `<form>` element
    /// * `model` - field identifiers mapped to their rules
    /// * `options` - presentation options, `undefined` for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(form_id: &str, model: JsValue, options: JsValue) -> Result<FormValidation, JsValue> {
        let model: Model = serde_wasm_bindgen::from_value(model)
            .map_err(|e| config_error(format!("Invalid model: {}", e)))?;

        let options: Options = if options.is_undefined() || options.is_null() {
            Options::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| config_error(format!("Invalid options: {}", e)))?
        };

        let validator = Validator::new(&model, options).map_err(|e| config_error(e.to_string()))?;
        let validator = Rc::new(validator);
        let form = DomForm::find(form_id)?;
        let last = Rc::new(RefCell::new(None));

        let on_submit = {
            let validator = Rc::clone(&validator);
            let form = form.clone();
            let last = Rc::clone(&last);

            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let result = validator.validate(&form);
                if !result.is_valid() {
                    event.prevent_default();
                }
                *last.borrow_mut() = Some(result);
            })
        };

        form.form()
            .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;

        Ok(FormValidation {
            validator,
            form,
            last,
            on_submit,
        })
    }

    /// Run a validation pass now. Returns `{ valid, fields }`.
    pub fn validate(&self) -> Result<JsValue, JsValue> {
        let result = self.validator.validate(&self.form);
        let value = serde_wasm_bindgen::to_value(&result)?;
        *self.last.borrow_mut() = Some(result);
        Ok(value)
    }

    /// Validate one field and return its outcome, `undefined` if it is not on the form
    #[wasm_bindgen(js_name = validateField)]
    pub fn validate_field(&self, field: &str) -> Result<JsValue, JsValue> {
        match self.validator.validate_field(&self.form, field) {
            Some(outcome) => Ok(serde_wasm_bindgen::to_value(&outcome)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Outcome of the last pass; true before any pass has run
    #[wasm_bindgen(js_name = isValid)]
    pub fn is_valid(&self) -> bool {
        self.last
            .borrow()
            .as_ref()
            .map_or(true, FormResult::is_valid)
    }

    /// Errors of the last pass as `[{ field, message }]`
    pub fn errors(&self) -> Result<JsValue, JsValue> {
        let last = self.last.borrow();
        let errors: Vec<ValidationError> = last
            .iter()
            .flat_map(|result| result.errors())
            .map(|(field, message)| ValidationError {
                field: field.to_string(),
                message: message.to_string(),
            })
            .collect();

        Ok(serde_wasm_bindgen::to_value(&errors)?)
    }
}

impl Drop for FormValidation {
    fn drop(&mut self) {
        let _ = self
            .form
            .form()
            .remove_event_listener_with_callback("submit", self.on_submit.as_ref().unchecked_ref());
    }
}

fn verdict_to_js(verdict: Verdict) -> Option<bool> {
    match verdict {
        Verdict::Pass => Some(true),
        Verdict::Fail => Some(false),
        Verdict::NotApplicable => None,
    }
}

/// Quick check against a built-in pattern (`undefined` for empty input)
#[wasm_bindgen(js_name = testFormat)]
pub fn test_format_js(value: &str, pattern: &str) -> Option<bool> {
    let patterns = PatternRegistry::default();
    verdict_to_js(validation::format(&FieldValue::text(value), pattern, &patterns))
}

/// Quick calendar check of a `DD/MM/YYYY` date (`undefined` for empty input)
#[wasm_bindgen(js_name = isValidDate)]
pub fn is_valid_date_js(value: &str) -> Option<bool> {
    verdict_to_js(validation::valid_date(&FieldValue::text(value), false, '/'))
}
