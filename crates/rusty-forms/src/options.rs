//! Validator options
//!
//! Presentation settings are passed through to the form host untouched; the
//! engine itself only reads `display`, `message` and whether errors are
//! collected into a list.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Message used when neither the rule nor the field supplies one
pub const DEFAULT_MESSAGE: &str = "The given value is invalid.";

/// Where rendered messages go relative to the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// First child of the field's parent
    Before,
    /// Last child of the field's parent
    #[default]
    After,
    /// One shared list at the top of the form
    List,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Render messages at all (results are produced either way)
    #[serde(alias = "error_display")]
    pub display: bool,

    /// Default error message
    #[serde(alias = "error_message")]
    pub message: String,

    /// Element wrapping each message
    #[serde(alias = "error_node")]
    pub message_node: String,

    /// Class applied to each message element
    #[serde(alias = "error_class")]
    pub message_class: String,

    #[serde(alias = "error_placement")]
    pub placement: Placement,

    /// Collect every message into one list
    pub list: bool,

    /// Class applied to the list container
    pub list_class: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            display: true,
            message: DEFAULT_MESSAGE.to_string(),
            message_node: "div".to_string(),
            message_class: "form_error".to_string(),
            placement: Placement::After,
            list: false,
            list_class: "form_errors".to_string(),
        }
    }
}

impl Options {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether messages are collected into one list container
    pub fn uses_list(&self) -> bool {
        self.list || self.placement == Placement::List
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}
