// File: rusty-forms/src/normalize.rs
// Purpose: Turn a field spec into its canonical, ordered rule list

use rusty_forms_validation::Param;

use crate::model::FieldSpec;

/// Predicate behind the `required` shorthand
pub const REQUIRED_PREDICATE: &str = "present";

/// Canonical rule: always a parameter list, always a resolved message
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub predicate: String,
    pub params: Vec<Param>,
    pub error: String,
}

/// Normalize a field's declared rules.
///
/// `required` becomes a leading `present(true)` rule, declared rules follow in
/// order, predicate-keyed shorthand entries come last. Messages resolve as
/// rule message, then field message, then `default_message`; empty messages
/// count as missing.
pub fn normalize(spec: &FieldSpec, default_message: &str) -> Vec<Rule> {
    let field_error = non_empty(spec.error.as_deref()).unwrap_or(default_message);
    let mut rules = Vec::new();

    if spec.required {
        rules.push(Rule {
            predicate: REQUIRED_PREDICATE.to_string(),
            params: vec![Param::Bool(true)],
            error: field_error.to_string(),
        });
    }

    if let Some(declared) = &spec.rules {
        rules.extend(declared.iter().map(|rule| Rule {
            predicate: rule.predicate.clone(),
            params: rule
                .params
                .as_ref()
                .map(|params| params.iter().cloned().collect())
                .unwrap_or_default(),
            error: non_empty(rule.error.as_deref())
                .unwrap_or(field_error)
                .to_string(),
        }));
    }

    rules.extend(spec.shorthand.iter().map(|(predicate, params)| Rule {
        predicate: predicate.clone(),
        params: params.iter().cloned().collect(),
        error: field_error.to_string(),
    }));

    rules
}

fn non_empty(message: Option<&str>) -> Option<&str> {
    message.filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RuleSpec;
    use crate::options::DEFAULT_MESSAGE;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_required_is_first() {
        let spec = FieldSpec::new()
            .rule(RuleSpec::new("format").param("email"))
            .required();

        let rules = normalize(&spec, DEFAULT_MESSAGE);
        assert_eq!(rules[0].predicate, "present");
        assert_eq!(rules[0].params, vec![Param::Bool(true)]);
        assert_eq!(rules[1].predicate, "format");
        assert_eq!(rules[1].params, vec![Param::from("email")]);
    }

    #[test]
    fn test_message_precedence() {
        let spec = FieldSpec::new()
            .required()
            .error("Field message")
            .rule(RuleSpec::new("longer_than").param(3).error("Rule message"))
            .rule(RuleSpec::new("shorter_than").param(10))
            .rule(RuleSpec::new("is_number").error(""));

        let errors: Vec<String> = normalize(&spec, DEFAULT_MESSAGE)
            .into_iter()
            .map(|rule| rule.error)
            .collect();

        assert_eq!(
            errors,
            vec!["Field message", "Rule message", "Field message", "Field message"]
        );
    }

    #[test]
    fn test_global_default_message() {
        let spec = FieldSpec::new().required();
        let rules = normalize(&spec, "Global");
        assert_eq!(rules[0].error, "Global");
    }

    #[test]
    fn test_params_always_a_list() {
        let spec = FieldSpec::new()
            .rule(RuleSpec::new("is_integer"))
            .rule(RuleSpec::new("compare_numbers").param(5).param("%"));

        let rules = normalize(&spec, DEFAULT_MESSAGE);
        assert_eq!(rules[0].params, Vec::<Param>::new());
        assert_eq!(rules[1].params, vec![Param::Number(5.0), Param::from("%")]);
    }

    #[test]
    fn test_shorthand_follows_declared_rules() {
        let spec = FieldSpec::new()
            .shorthand("minimum_length", 2)
            .rule(RuleSpec::new("format").param("text"));

        let predicates: Vec<String> = normalize(&spec, DEFAULT_MESSAGE)
            .into_iter()
            .map(|rule| rule.predicate)
            .collect();
        assert_eq!(predicates, vec!["format", "minimum_length"]);
    }

    #[test]
    fn test_empty_spec_has_no_rules() {
        assert!(normalize(&FieldSpec::new(), DEFAULT_MESSAGE).is_empty());
    }
}
