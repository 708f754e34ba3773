// File: rusty-forms-validation/src/library.rs
// Purpose: Registry mapping predicate names to predicate functions

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::date::valid_date;
use crate::matching::{matches_field, FieldLookup};
use crate::numeric::{compare_numbers, greater_than, is_integer, is_number, less_than, Operator};
use crate::patterns::PatternRegistry;
use crate::presence::present;
use crate::string::{format, longer_than, shorter_than};
use crate::value::{FieldValue, Param, Verdict};

/// What a predicate can see besides the value and its parameters.
pub struct PredicateContext<'a> {
    patterns: &'a PatternRegistry,
    fields: &'a dyn FieldLookup,
}

impl<'a> PredicateContext<'a> {
    pub fn new(patterns: &'a PatternRegistry, fields: &'a dyn FieldLookup) -> Self {
        Self { patterns, fields }
    }

    pub fn patterns(&self) -> &PatternRegistry {
        self.patterns
    }

    /// Read-only view of the other fields of the form
    pub fn fields(&self) -> &dyn FieldLookup {
        self.fields
    }
}

/// A predicate bound into the library
pub type Predicate =
    Arc<dyn Fn(&FieldValue, &[Param], &PredicateContext<'_>) -> Verdict + Send + Sync>;

/// Named predicates available to validation rules.
///
/// `PredicateLibrary::default()` holds the built-ins; custom predicates are
/// added with [`PredicateLibrary::register`].
///
/// # Example
/// ```
/// use rusty_forms_validation::{
///     FieldValue, NoFields, PatternRegistry, PredicateContext, PredicateLibrary, Verdict,
/// };
///
/// let mut library = PredicateLibrary::default();
/// library.register("even_length", |value, _params, _ctx| {
///     (value.as_text().len() % 2 == 0).into()
/// });
///
/// let patterns = PatternRegistry::default();
/// let ctx = PredicateContext::new(&patterns, &NoFields);
/// let verdict = library.evaluate("even_length", &FieldValue::text("ab"), &[], &ctx);
/// assert_eq!(verdict, Some(Verdict::Pass));
/// ```
#[derive(Clone)]
pub struct PredicateLibrary {
    predicates: HashMap<String, Predicate>,
}

impl PredicateLibrary {
    /// Library with no predicates
    pub fn empty() -> Self {
        Self {
            predicates: HashMap::new(),
        }
    }

    /// Library with every built-in predicate
    pub fn builtin() -> Self {
        let mut library = Self::empty();

        library.register("present", present_rule);
        library.register("format", format_rule);
        library.register("test", format_rule);
        library.register("valid_date", valid_date_rule);
        library.register("longer_than", longer_than_rule);
        library.register("minimum_length", longer_than_rule);
        library.register("shorter_than", shorter_than_rule);
        library.register("maximum_length", shorter_than_rule);
        library.register("is_integer", is_integer_rule);
        library.register("is_number", is_number_rule);
        library.register("compare_numbers", compare_numbers_rule);
        library.register("greater_than", greater_than_rule);
        library.register("less_than", less_than_rule);
        library.register("match", match_rule);

        library
    }

    /// Add or replace a predicate
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&FieldValue, &[Param], &PredicateContext<'_>) -> Verdict + Send + Sync + 'static,
    {
        self.predicates.insert(name.into(), Arc::new(predicate));
    }

    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }

    /// Run the named predicate; `None` if no predicate has that name.
    pub fn evaluate(
        &self,
        name: &str,
        value: &FieldValue,
        params: &[Param],
        ctx: &PredicateContext<'_>,
    ) -> Option<Verdict> {
        self.get(name).map(|predicate| (**predicate)(value, params, ctx))
    }
}

impl Default for PredicateLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for PredicateLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("PredicateLibrary")
            .field("predicates", &names)
            .finish()
    }
}

fn flag(params: &[Param], index: usize) -> bool {
    params.get(index).map_or(false, Param::is_truthy)
}

fn numeric_param(rule: &str, params: &[Param]) -> f64 {
    let n = params.first().map_or(f64::NAN, Param::as_number);
    if n.is_nan() {
        tracing::warn!(rule, ?params, "rule expects a numeric parameter");
    }
    n
}

fn present_rule(value: &FieldValue, params: &[Param], _ctx: &PredicateContext<'_>) -> Verdict {
    let expected = params.first().map_or(true, Param::is_truthy);
    present(value, expected).into()
}

fn format_rule(value: &FieldValue, params: &[Param], ctx: &PredicateContext<'_>) -> Verdict {
    let Some(pattern) = params.first() else {
        tracing::warn!("format rule without a pattern name");
        return format(value, "", ctx.patterns());
    };
    format(value, &pattern.as_text(), ctx.patterns())
}

fn valid_date_rule(value: &FieldValue, params: &[Param], _ctx: &PredicateContext<'_>) -> Verdict {
    let delimiter = params
        .get(1)
        .and_then(|p| p.as_text().chars().next())
        .unwrap_or('-');
    valid_date(value, flag(params, 0), delimiter)
}

fn longer_than_rule(value: &FieldValue, params: &[Param], _ctx: &PredicateContext<'_>) -> Verdict {
    longer_than(value, numeric_param("longer_than", params))
}

fn shorter_than_rule(value: &FieldValue, params: &[Param], _ctx: &PredicateContext<'_>) -> Verdict {
    shorter_than(value, numeric_param("shorter_than", params))
}

fn is_integer_rule(value: &FieldValue, params: &[Param], _ctx: &PredicateContext<'_>) -> Verdict {
    is_integer(value, flag(params, 0))
}

fn is_number_rule(value: &FieldValue, params: &[Param], _ctx: &PredicateContext<'_>) -> Verdict {
    is_number(value, flag(params, 0))
}

fn compare_numbers_rule(
    value: &FieldValue,
    params: &[Param],
    _ctx: &PredicateContext<'_>,
) -> Verdict {
    let Some(required) = params.first() else {
        tracing::warn!("compare_numbers rule without an operand");
        return Verdict::Fail;
    };
    let operator = params
        .get(1)
        .map(|p| Operator::parse(&p.as_text()))
        .unwrap_or_default();
    compare_numbers(value, required, operator).into()
}

fn greater_than_rule(value: &FieldValue, params: &[Param], _ctx: &PredicateContext<'_>) -> Verdict {
    match params.first() {
        Some(required) => greater_than(value, required).into(),
        None => {
            tracing::warn!("greater_than rule without an operand");
            Verdict::Fail
        }
    }
}

fn less_than_rule(value: &FieldValue, params: &[Param], _ctx: &PredicateContext<'_>) -> Verdict {
    match params.first() {
        Some(required) => less_than(value, required).into(),
        None => {
            tracing::warn!("less_than rule without an operand");
            Verdict::Fail
        }
    }
}

fn match_rule(value: &FieldValue, params: &[Param], ctx: &PredicateContext<'_>) -> Verdict {
    let other = params
        .first()
        .and_then(|id| ctx.fields().field_value(&id.as_text()));
    matches_field(value, other.as_ref()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::NoFields;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn run(name: &str, value: &str, params: &[Param]) -> Option<Verdict> {
        let patterns = PatternRegistry::default();
        let ctx = PredicateContext::new(&patterns, &NoFields);
        PredicateLibrary::default().evaluate(name, &FieldValue::text(value), params, &ctx)
    }

    #[test]
    fn test_builtin_names() {
        let library = PredicateLibrary::builtin();
        for name in [
            "present",
            "format",
            "valid_date",
            "longer_than",
            "shorter_than",
            "is_integer",
            "is_number",
            "compare_numbers",
            "greater_than",
            "less_than",
            "match",
        ] {
            assert!(library.contains(name), "missing {name}");
        }
        assert!(!library.contains("telepathy"));
    }

    #[test]
    fn test_unknown_predicate() {
        assert_eq!(run("telepathy", "x", &[]), None);
    }

    #[test]
    fn test_present_defaults_to_expecting_a_value() {
        assert_eq!(run("present", "x", &[]), Some(Verdict::Pass));
        assert_eq!(run("present", "", &[]), Some(Verdict::Fail));
        assert_eq!(run("present", "", &[Param::Bool(true)]), Some(Verdict::Fail));
        assert_eq!(run("present", "", &[Param::Bool(false)]), Some(Verdict::Pass));
    }

    #[test]
    fn test_aliases_behave_like_their_targets() {
        assert_eq!(run("test", "a@b.co", &["email".into()]), Some(Verdict::Pass));
        assert_eq!(run("minimum_length", "abc", &[4.into()]), Some(Verdict::Fail));
        assert_eq!(run("maximum_length", "abc", &[4.into()]), Some(Verdict::Pass));
    }

    #[test]
    fn test_compare_numbers_params() {
        assert_eq!(run("compare_numbers", "10", &[5.into(), ">".into()]), Some(Verdict::Pass));
        assert_eq!(run("compare_numbers", "10", &[10.into()]), Some(Verdict::Pass));
        assert_eq!(run("compare_numbers", "10", &[]), Some(Verdict::Fail));
        assert_eq!(run("greater_than", "", &[0.into()]), Some(Verdict::Fail));
    }

    #[test]
    fn test_malformed_length_param_fails() {
        assert_eq!(run("longer_than", "abc", &["many".into()]), Some(Verdict::Fail));
        assert_eq!(run("longer_than", "abc", &[]), Some(Verdict::Fail));
    }

    #[test]
    fn test_valid_date_params() {
        assert_eq!(
            run("valid_date", "02/29/2000", &[true.into(), "/".into()]),
            Some(Verdict::Pass)
        );
        assert_eq!(run("valid_date", "29-02-2000", &[]), Some(Verdict::Pass));
    }

    #[test]
    fn test_match_reads_other_field() {
        let patterns = PatternRegistry::default();
        let fields = HashMap::from([("confirm_field".to_string(), FieldValue::text("secret123"))]);
        let ctx = PredicateContext::new(&patterns, &fields);
        let library = PredicateLibrary::default();

        let verdict = |value: &str| {
            library.evaluate("match", &FieldValue::text(value), &["confirm_field".into()], &ctx)
        };
        assert_eq!(verdict("secret123"), Some(Verdict::Pass));
        assert_eq!(verdict("secret124"), Some(Verdict::Fail));

        let missing = library.evaluate("match", &"secret123".into(), &["nowhere".into()], &ctx);
        assert_eq!(missing, Some(Verdict::Fail));
    }

    #[test]
    fn test_register_custom_predicate() {
        let mut library = PredicateLibrary::empty();
        library.register(
            "never",
            |_value: &FieldValue, _params: &[Param], _ctx: &PredicateContext<'_>| Verdict::Fail,
        );
        let patterns = PatternRegistry::empty();
        let ctx = PredicateContext::new(&patterns, &NoFields);
        assert_eq!(library.evaluate("never", &"x".into(), &[], &ctx), Some(Verdict::Fail));
        assert_eq!(format!("{library:?}"), r#"PredicateLibrary { predicates: ["never"] }"#);
    }
}
