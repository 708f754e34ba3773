// File: rusty-forms/src/validator.rs
// Purpose: Field and form evaluation of a normalized model against a host

use regex::Regex;
use rusty_forms_validation::{
    FieldValue, Param, PatternRegistry, PredicateContext, PredicateLibrary, Verdict,
};

use crate::error::{ConfigError, Result};
use crate::host::{FormHost, HostLookup};
use crate::model::Model;
use crate::normalize::{normalize, Rule};
use crate::options::Options;
use crate::result::{EvaluationResult, FormResult};

/// Validator for one model.
///
/// The model is normalized and checked once, when the validator is built.
/// Each call to [`Validator::validate`] is an independent pass over the host's
/// current values; nothing is carried over between passes.
///
/// # Example
/// ```
/// use rusty_forms::{MemoryForm, Model, Options, Validator};
///
/// let model = Model::from_json(r#"{
///     "email": { "required": true, "rules": [{ "predicate": "format", "params": "email" }] }
/// }"#).unwrap();
/// let validator = Validator::new(&model, Options::default()).unwrap();
///
/// let form = MemoryForm::new().with_text("email", "not-an-email");
/// let result = validator.validate(&form);
/// assert!(!result.is_valid());
/// assert_eq!(result.error("email"), Some("The given value is invalid."));
///
/// form.set_text("email", "a@b.co");
/// assert!(validator.validate(&form).is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    fields: Vec<FieldRules>,
    library: PredicateLibrary,
    patterns: PatternRegistry,
    options: Options,
}

#[derive(Debug, Clone)]
struct FieldRules {
    id: String,
    rules: Vec<Rule>,
}

/// How one value fared against a field's rules
enum Walk<'r> {
    Failed(&'r Rule),
    Passed,
    NotApplicable,
}

impl Validator {
    /// Build a validator with the built-in predicates and patterns
    pub fn new(model: &Model, options: Options) -> Result<Self> {
        Self::builder(model).options(options).build()
    }

    pub fn builder(model: &Model) -> ValidatorBuilder<'_> {
        ValidatorBuilder::new(model)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Normalized rules of a field
    pub fn rules(&self, field: &str) -> Option<&[Rule]> {
        self.fields
            .iter()
            .find(|f| f.id == field)
            .map(|f| f.rules.as_slice())
    }

    /// Run a full validation pass.
    ///
    /// Every field of the model is evaluated, in model order, even after one
    /// has failed. Fields that are not on the form are left out of the result.
    pub fn validate<H: FormHost + ?Sized>(&self, host: &H) -> FormResult {
        let _span = tracing::info_span!("validate", fields = self.fields.len()).entered();

        if self.options.uses_list() {
            host.clear_error_list();
        }

        let mut result = FormResult::new();
        for field in &self.fields {
            if let Some(outcome) = self.evaluate_field(host, field) {
                result.record(&field.id, outcome);
            }
        }

        tracing::debug!(valid = result.is_valid(), "validation pass finished");
        result
    }

    /// Evaluate a single field; `None` if it is not in the model or not on the form.
    pub fn validate_field<H: FormHost + ?Sized>(
        &self,
        host: &H,
        field: &str,
    ) -> Option<EvaluationResult> {
        let field = self.fields.iter().find(|f| f.id == field)?;
        self.evaluate_field(host, field)
    }

    fn evaluate_field<H: FormHost + ?Sized>(
        &self,
        host: &H,
        field: &FieldRules,
    ) -> Option<EvaluationResult> {
        host.clear_error(&field.id);

        let elements = host.resolve_field(&field.id);
        if elements.is_empty() {
            tracing::debug!(field = %field.id, "field not on the form, skipping");
            return None;
        }

        let lookup = HostLookup(host);
        let ctx = PredicateContext::new(&self.patterns, &lookup);

        // A field without rules has nothing that could fail
        let mut applicable = field.rules.is_empty();

        for element in &elements {
            let value = host.value(element);
            match self.walk_rules(&field.id, &field.rules, &value, &ctx) {
                Walk::Failed(rule) => {
                    tracing::debug!(
                        field = %field.id,
                        predicate = %rule.predicate,
                        "field invalid"
                    );
                    self.show_error(host, &field.id, element, &rule.error);
                    return Some(EvaluationResult::Invalid {
                        message: rule.error.clone(),
                    });
                }
                Walk::Passed => applicable = true,
                Walk::NotApplicable => {}
            }
        }

        let outcome = if applicable {
            EvaluationResult::Valid
        } else {
            EvaluationResult::NotApplicable
        };
        tracing::debug!(field = %field.id, ?outcome, "field evaluated");
        Some(outcome)
    }

    /// Apply rules in order, stopping at the first failure.
    fn walk_rules<'r>(
        &self,
        field: &str,
        rules: &'r [Rule],
        value: &FieldValue,
        ctx: &PredicateContext<'_>,
    ) -> Walk<'r> {
        let mut passed = false;

        for rule in rules {
            match self
                .library
                .evaluate(&rule.predicate, value, &rule.params, ctx)
            {
                Some(Verdict::Fail) => return Walk::Failed(rule),
                Some(Verdict::Pass) => passed = true,
                Some(Verdict::NotApplicable) => {
                    tracing::trace!(field, predicate = %rule.predicate, "rule not applicable");
                }
                None => {
                    // Unreachable for validators built through `build`
                    tracing::warn!(
                        field,
                        predicate = %rule.predicate,
                        "unknown predicate, skipping remaining rules"
                    );
                    break;
                }
            }
        }

        if passed {
            Walk::Passed
        } else {
            Walk::NotApplicable
        }
    }

    fn show_error<H: FormHost + ?Sized>(
        &self,
        host: &H,
        field: &str,
        element: &H::Element,
        message: &str,
    ) {
        if self.options.display && !message.is_empty() {
            host.render_error(field, element, message, &self.options);
        }
    }
}

/// Configures and builds a [`Validator`]
pub struct ValidatorBuilder<'m> {
    model: &'m Model,
    options: Options,
    patterns: PatternRegistry,
    library: PredicateLibrary,
    error: Option<ConfigError>,
}

impl<'m> ValidatorBuilder<'m> {
    fn new(model: &'m Model) -> Self {
        Self {
            model,
            options: Options::default(),
            patterns: PatternRegistry::default(),
            library: PredicateLibrary::default(),
            error: None,
        }
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Replace the whole pattern registry
    pub fn patterns(mut self, patterns: PatternRegistry) -> Self {
        self.patterns = patterns;
        self
    }

    /// Add or replace one pattern
    pub fn pattern(mut self, name: impl Into<String>, regex: Regex) -> Self {
        self.patterns.insert(name, regex);
        self
    }

    /// Add or replace one pattern from source; a compile error surfaces from `build`
    pub fn pattern_str(mut self, name: impl Into<String>, pattern: &str) -> Self {
        let name = name.into();
        match Regex::new(pattern) {
            Ok(regex) => self.patterns.insert(name, regex),
            Err(source) => {
                self.error
                    .get_or_insert(ConfigError::Pattern { name, source });
            }
        }
        self
    }

    /// Replace the whole predicate library
    pub fn library(mut self, library: PredicateLibrary) -> Self {
        self.library = library;
        self
    }

    /// Add or replace one predicate
    pub fn predicate<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&FieldValue, &[Param], &PredicateContext<'_>) -> Verdict + Send + Sync + 'static,
    {
        self.library.register(name, predicate);
        self
    }

    /// Normalize the model and check every rule against the library
    pub fn build(self) -> Result<Validator> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let mut fields = Vec::with_capacity(self.model.len());
        for (id, spec) in self.model.iter() {
            let rules = normalize(spec, &self.options.message);

            if let Some(rule) = rules
                .iter()
                .find(|rule| !self.library.contains(&rule.predicate))
            {
                return Err(ConfigError::UnknownPredicate {
                    field: id.to_string(),
                    predicate: rule.predicate.clone(),
                });
            }

            fields.push(FieldRules {
                id: id.to_string(),
                rules,
            });
        }

        Ok(Validator {
            fields,
            library: self.library,
            patterns: self.patterns,
            options: self.options,
        })
    }
}
