//! Integration tests for the rusty-forms validator
//!
//! Tests are organized by feature area and cover:
//! - End-to-end passes over an in-memory form
//! - Structural absence (fields missing from the form)
//! - Short-circuiting and rule order
//! - Not-applicable outcomes for optional fields
//! - Error rendering and clearing
//! - Configuration errors raised at build time

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use rstest::rstest;
use rusty_forms::{
    ConfigError, EvaluationResult, FieldSpec, FieldValue, MemoryForm, Model, Options, Placement,
    RuleSpec, Validator, Verdict, DEFAULT_MESSAGE,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .try_init();
}

fn email_model() -> Model {
    Model::from_json(
        r#"{ "email": { "required": true, "rules": [{ "predicate": "format", "params": "email" }] } }"#,
    )
    .unwrap()
}

// ============================================================================
// END TO END
// ============================================================================

#[rstest]
#[case("not-an-email", false)]
#[case("a@b.co", true)]
#[case("", false)]
fn test_email_end_to_end(#[case] input: &str, #[case] expected_valid: bool) {
    init_tracing();
    let validator = Validator::new(&email_model(), Options::default()).unwrap();
    let form = MemoryForm::new().with_text("email", input);

    let result = validator.validate(&form);

    assert_eq!(result.is_valid(), expected_valid);
    if expected_valid {
        assert_eq!(result.get("email"), Some(&EvaluationResult::Valid));
        assert_eq!(form.rendered_error("email"), None);
    } else {
        assert_eq!(result.error("email"), Some(DEFAULT_MESSAGE));
        assert_eq!(form.rendered_error("email").as_deref(), Some(DEFAULT_MESSAGE));
    }
}

#[test]
fn test_every_field_is_evaluated_after_a_failure() {
    let model = Model::from_json(
        r#"{
            "first": { "required": true, "error": "First is required" },
            "second": { "required": true, "error": "Second is required" },
            "third": { "required": true }
        }"#,
    )
    .unwrap();
    let validator = Validator::new(&model, Options::default()).unwrap();
    let form = MemoryForm::new()
        .with_text("first", "")
        .with_text("second", "")
        .with_text("third", "here");

    let result = validator.validate(&form);

    assert!(!result.is_valid());
    assert_eq!(
        result.errors().collect::<Vec<_>>(),
        vec![("first", "First is required"), ("second", "Second is required")]
    );
    assert_eq!(result.get("third"), Some(&EvaluationResult::Valid));
    assert_eq!(form.rendered_errors().len(), 2);
}

#[test]
fn test_result_follows_model_order() {
    let model = Model::from_json(r#"{ "zeta": {}, "alpha": {}, "mid": {} }"#).unwrap();
    let validator = Validator::new(&model, Options::default()).unwrap();
    let form = MemoryForm::from_pairs([("alpha", "a"), ("mid", "m"), ("zeta", "z")]);

    let result = validator.validate(&form);
    let order: Vec<&str> = result.iter().map(|(field, _)| field).collect();
    assert_eq!(order, vec!["zeta", "alpha", "mid"]);
}

// ============================================================================
// STRUCTURAL ABSENCE
// ============================================================================

#[test]
fn test_missing_field_is_excluded() {
    let model = Model::new()
        .field("ghost", FieldSpec::new().required())
        .field("email", FieldSpec::new().required());
    let validator = Validator::new(&model, Options::default()).unwrap();

    let form = MemoryForm::new().with_text("email", "a@b.co");
    let result = validator.validate(&form);
    assert!(!result.contains("ghost"));
    assert!(result.is_valid());
    assert_eq!(result.len(), 1);

    form.set_text("email", "");
    let result = validator.validate(&form);
    assert!(!result.contains("ghost"));
    assert!(!result.is_valid());
}

#[test]
fn test_validate_field_on_missing_field() {
    let validator = Validator::new(&email_model(), Options::default()).unwrap();
    let form = MemoryForm::new();
    assert_eq!(validator.validate_field(&form, "email"), None);
    assert_eq!(validator.validate_field(&form, "not-in-model"), None);
}

// ============================================================================
// SHORT CIRCUIT AND ORDER
// ============================================================================

#[test]
fn test_rules_after_a_failure_never_run() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let model = Model::new().field(
        "code",
        FieldSpec::new()
            .rule(RuleSpec::new("longer_than").param(10).error("Too short"))
            .rule(RuleSpec::new("counted")),
    );
    let validator = Validator::builder(&model)
        .predicate("counted", move |_value, _params, _ctx| {
            counter.fetch_add(1, Ordering::SeqCst);
            Verdict::Pass
        })
        .build()
        .unwrap();

    let form = MemoryForm::new().with_text("code", "abc");
    let result = validator.validate(&form);
    assert_eq!(result.error("code"), Some("Too short"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    form.set_text("code", "abcdefghijkl");
    assert!(validator.validate(&form).is_valid());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_required_runs_before_declared_rules() {
    let model = Model::from_json(
        r#"{ "name": {
            "rules": [{ "predicate": "shorter_than", "params": 3, "error": "Too long" }],
            "required": true,
            "error": "Name please"
        } }"#,
    )
    .unwrap();
    let validator = Validator::new(&model, Options::default()).unwrap();

    let rules = validator.rules("name").unwrap();
    assert_eq!(rules[0].predicate, "present");

    let form = MemoryForm::new().with_text("name", "");
    assert_eq!(validator.validate(&form).error("name"), Some("Name please"));
}

// ============================================================================
// NOT APPLICABLE
// ============================================================================

#[rstest]
#[case(r#"{ "predicate": "format", "params": "email" }"#)]
#[case(r#"{ "predicate": "longer_than", "params": 5 }"#)]
#[case(r#"{ "predicate": "shorter_than", "params": 5 }"#)]
#[case(r#"{ "predicate": "valid_date" }"#)]
#[case(r#"{ "predicate": "is_integer" }"#)]
fn test_optional_empty_field_is_not_applicable(#[case] rule: &str) {
    let model = Model::from_json(&format!(r#"{{ "field": {{ "rules": [{rule}] }} }}"#)).unwrap();
    let validator = Validator::new(&model, Options::default()).unwrap();
    let form = MemoryForm::new().with_text("field", "   ");

    let result = validator.validate(&form);
    assert!(result.is_valid());
    assert_eq!(result.get("field"), Some(&EvaluationResult::NotApplicable));
    assert!(result.get("field").unwrap().is_valid());
}

#[test]
fn test_numeric_comparison_fails_on_empty_value() {
    let model = Model::new().field(
        "age",
        FieldSpec::new().rule(RuleSpec::new("greater_than").param(18)),
    );
    let validator = Validator::new(&model, Options::default()).unwrap();
    let form = MemoryForm::new().with_text("age", "");

    assert!(!validator.validate(&form).is_valid());
}

#[test]
fn test_field_without_rules_is_valid() {
    let model = Model::new().field("notes", FieldSpec::new());
    let validator = Validator::new(&model, Options::default()).unwrap();
    let form = MemoryForm::new().with_text("notes", "");

    assert_eq!(
        validator.validate(&form).get("notes"),
        Some(&EvaluationResult::Valid)
    );
}

// ============================================================================
// CROSS-FIELD AND MULTI-ELEMENT FIELDS
// ============================================================================

#[rstest]
#[case("secret123", true)]
#[case("secret124", false)]
fn test_match_reads_the_other_field(#[case] password: &str, #[case] expected_valid: bool) {
    let model = Model::new().field(
        "password",
        FieldSpec::new().rule(RuleSpec::new("match").param("confirm_field")),
    );
    let validator = Validator::new(&model, Options::default()).unwrap();
    let form = MemoryForm::new()
        .with_text("password", password)
        .with_text("confirm_field", "secret123");

    assert_eq!(validator.validate(&form).is_valid(), expected_valid);
}

#[test]
fn test_match_against_missing_field_fails() {
    let model = Model::new().field(
        "password",
        FieldSpec::new().rule(RuleSpec::new("match").param("confirm_field")),
    );
    let validator = Validator::new(&model, Options::default()).unwrap();
    let form = MemoryForm::new().with_text("password", "secret123");

    assert!(!validator.validate(&form).is_valid());
}

#[test]
fn test_group_is_valid_only_when_every_element_is() {
    let model = Model::new().field("terms", FieldSpec::new().required().error("Tick every box"));
    let validator = Validator::new(&model, Options::default()).unwrap();

    let all_ticked = MemoryForm::new().with_group("terms", vec![FieldValue::Checked(true); 3]);
    assert!(validator.validate(&all_ticked).is_valid());

    let one_missing = MemoryForm::new().with_group(
        "terms",
        [FieldValue::Checked(true), FieldValue::Checked(false), FieldValue::Checked(true)],
    );
    let result = validator.validate(&one_missing);
    assert_eq!(result.error("terms"), Some("Tick every box"));
}

#[test]
fn test_checkbox_required() {
    let model = Model::from_json(r#"{ "agree": { "required": true } }"#).unwrap();
    let validator = Validator::new(&model, Options::default()).unwrap();

    assert!(!validator.validate(&MemoryForm::new().with_checked("agree", false)).is_valid());
    assert!(validator.validate(&MemoryForm::new().with_checked("agree", true)).is_valid());
}

// ============================================================================
// RENDERING
// ============================================================================

#[test]
fn test_previous_errors_cleared_on_each_pass() {
    let validator = Validator::new(&email_model(), Options::default()).unwrap();
    let form = MemoryForm::new().with_text("email", "nope");

    validator.validate(&form);
    assert!(form.rendered_error("email").is_some());

    form.set_text("email", "a@b.co");
    validator.validate(&form);
    assert_eq!(form.rendered_error("email"), None);
}

#[test]
fn test_display_off_still_reports_errors() {
    let options = Options::default().with_display(false);
    let validator = Validator::new(&email_model(), options).unwrap();
    let form = MemoryForm::new().with_text("email", "nope");

    let result = validator.validate(&form);
    assert_eq!(result.error("email"), Some(DEFAULT_MESSAGE));
    assert!(form.rendered_errors().is_empty());
}

#[test]
fn test_list_mode_clears_list_every_pass() {
    let options = Options::default().with_placement(Placement::List);
    let validator = Validator::new(&email_model(), options).unwrap();
    let form = MemoryForm::new().with_text("email", "nope");

    validator.validate(&form);
    validator.validate(&form);
    assert_eq!(form.list_clears(), 2);

    let plain = Validator::new(&email_model(), Options::default()).unwrap();
    let form = MemoryForm::new().with_text("email", "nope");
    plain.validate(&form);
    assert_eq!(form.list_clears(), 0);
}

#[test]
fn test_custom_global_message() {
    let options = Options::from_json(r#"{ "message": "Check this field" }"#).unwrap();
    let validator = Validator::new(&email_model(), options).unwrap();
    let form = MemoryForm::new().with_text("email", "");

    assert_eq!(validator.validate(&form).error("email"), Some("Check this field"));
}

// ============================================================================
// SHORTHAND MODELS
// ============================================================================

#[test]
fn test_predicate_keyed_shorthand() {
    let model = Model::from_json(
        r#"{ "username": { "error": "3 to 8 letters", "minimum_length": 3, "maximum_length": 8, "test": "text" } }"#,
    )
    .unwrap();
    let validator = Validator::new(&model, Options::default()).unwrap();

    let cases = [("abc", true), ("ab", false), ("abcdefghi", false), ("abc1", false)];
    for (input, expected_valid) in cases {
        let form = MemoryForm::new().with_text("username", input);
        assert_eq!(validator.validate(&form).is_valid(), expected_valid, "{input}");
    }
}

#[test]
fn test_model_from_value_keeps_declared_order() {
    let value: serde_json::Value = serde_json::from_str(
        r#"{ "zeta": { "zz_first": true, "aa_second": true }, "alpha": {} }"#,
    )
    .unwrap();
    let model = Model::from_value(value).unwrap();
    assert_eq!(model.ids().collect::<Vec<_>>(), vec!["zeta", "alpha"]);

    let invoked = Arc::new(Mutex::new(Vec::new()));
    let first = Arc::clone(&invoked);
    let second = Arc::clone(&invoked);
    let validator = Validator::builder(&model)
        .predicate("zz_first", move |_value, _params, _ctx| {
            first.lock().unwrap().push("zz_first");
            Verdict::Fail
        })
        .predicate("aa_second", move |_value, _params, _ctx| {
            second.lock().unwrap().push("aa_second");
            Verdict::Pass
        })
        .build()
        .unwrap();

    let form = MemoryForm::new().with_text("zeta", "z").with_text("alpha", "a");
    let result = validator.validate(&form);

    assert!(!result.is_valid());
    assert_eq!(*invoked.lock().unwrap(), vec!["zz_first"]);
    let fields: Vec<&str> = result.iter().map(|(field, _)| field).collect();
    assert_eq!(fields, vec!["zeta", "alpha"]);
}

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

#[test]
fn test_unknown_predicate_fails_at_build_time() {
    let model =
        Model::from_json(r#"{ "email": { "rules": { "predicate": "telepathy" } } }"#).unwrap();
    let error = Validator::new(&model, Options::default()).unwrap_err();

    match error {
        ConfigError::UnknownPredicate { field, predicate } => {
            assert_eq!(field, "email");
            assert_eq!(predicate, "telepathy");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_custom_pattern_fails_at_build_time() {
    let error = Validator::builder(&email_model())
        .pattern_str("broken", "([a-z")
        .build()
        .unwrap_err();
    assert!(matches!(error, ConfigError::Pattern { ref name, .. } if name == "broken"));
}

#[test]
fn test_custom_pattern_is_used_by_format() {
    let model = Model::new().field(
        "postcode",
        FieldSpec::new().rule(RuleSpec::new("format").param("postcode")),
    );
    let validator = Validator::builder(&model)
        .pattern_str("postcode", r"^\d{5}$")
        .build()
        .unwrap();

    assert!(validator.validate(&MemoryForm::new().with_text("postcode", "12345")).is_valid());
    assert!(!validator.validate(&MemoryForm::new().with_text("postcode", "1234")).is_valid());
}

#[test]
fn test_unknown_pattern_name_is_a_plain_failure() {
    let model = Model::new().field(
        "postcode",
        FieldSpec::new().rule(RuleSpec::new("format").param("postcode")),
    );
    let validator = Validator::new(&model, Options::default()).unwrap();
    assert!(!validator.validate(&MemoryForm::new().with_text("postcode", "12345")).is_valid());
}
