//! # rusty-forms
//!
//! Declarative form validation. A [`Model`] maps field identifiers to rules;
//! a [`Validator`] normalizes those rules once and evaluates them against any
//! [`FormHost`] on every submission.
//!
//! ## Quick Start
//!
//! ```rust
//! use rusty_forms::{FieldSpec, MemoryForm, Model, Options, RuleSpec, Validator};
//!
//! let model = Model::new()
//!     .field("username", FieldSpec::new()
//!         .required()
//!         .error("Pick a username")
//!         .rule(RuleSpec::new("longer_than").param(3).error("At least 3 characters")))
//!     .field("password", FieldSpec::new().required())
//!     .field("confirm", FieldSpec::new()
//!         .rule(RuleSpec::new("match").param("password").error("Passwords differ")));
//!
//! let validator = Validator::new(&model, Options::default()).unwrap();
//!
//! let form = MemoryForm::from_pairs([
//!     ("username", "al"),
//!     ("password", "hunter2"),
//!     ("confirm", "hunter3"),
//! ]);
//!
//! let result = validator.validate(&form);
//! assert!(!result.is_valid());
//! assert_eq!(result.error("username"), Some("At least 3 characters"));
//! assert_eq!(result.error("confirm"), Some("Passwords differ"));
//! ```
//!
//! ## Architecture
//!
//! - **`model`** - The declarative schema as the caller writes it
//! - **`normalize`** - Canonical rule lists (required first, params always a list)
//! - **`validator`** - Field and form evaluation, short-circuiting per field
//! - **`host`** - The boundary to whatever holds the form (DOM, submitted data)
//! - **`rusty-forms-validation`** - The predicates themselves

pub mod error;
pub mod host;
pub mod memory;
pub mod model;
pub mod normalize;
pub mod options;
pub mod result;
pub mod validator;

pub use error::ConfigError;
pub use host::{FormHost, HostLookup};
pub use memory::{MemoryElement, MemoryForm};
pub use model::{FieldSpec, Model, OneOrMany, RuleSpec};
pub use normalize::{normalize, Rule};
pub use options::{Options, Placement, DEFAULT_MESSAGE};
pub use result::{EvaluationResult, FormResult};
pub use validator::{Validator, ValidatorBuilder};

// Re-export the predicate library
pub use rusty_forms_validation as validation;
pub use rusty_forms_validation::{FieldValue, Param, PatternRegistry, PredicateLibrary, Verdict};
