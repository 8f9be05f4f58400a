//! Declarative field rules
//!
//! Rules are plain data: a tagged variant plus the message shown when it
//! fails. Each field carries an ordered list and the first failing rule
//! decides the field's error.

use super::field::FieldName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pattern used by [`Rule::EmailFormat`]
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// A single validation check with a fixed failure message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// Fails when the trimmed value is empty
    Required { message: String },
    /// Fails when the value has fewer than `min` characters
    MinLength { min: usize, message: String },
    /// Fails unless every pattern in `all_of` matches the raw value
    Pattern { all_of: Vec<String>, message: String },
    /// Fails when the value is not a number, or is below `min`
    NumericMin { min: f64, message: String },
    /// Fails when the value does not look like an email address
    EmailFormat { message: String },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::MinLength {
            min,
            message: message.into(),
        }
    }

    pub fn pattern<I, S>(all_of: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Pattern {
            all_of: all_of.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    pub fn numeric_min(min: f64, message: impl Into<String>) -> Self {
        Self::NumericMin {
            min,
            message: message.into(),
        }
    }

    pub fn email_format(message: impl Into<String>) -> Self {
        Self::EmailFormat {
            message: message.into(),
        }
    }

    /// The message reported when this rule fails
    pub fn message(&self) -> &str {
        match self {
            Self::Required { message }
            | Self::MinLength { message, .. }
            | Self::Pattern { message, .. }
            | Self::NumericMin { message, .. }
            | Self::EmailFormat { message } => message,
        }
    }

    /// Short name of the rule kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Required { .. } => "required",
            Self::MinLength { .. } => "min_length",
            Self::Pattern { .. } => "pattern",
            Self::NumericMin { .. } => "numeric_min",
            Self::EmailFormat { .. } => "email_format",
        }
    }
}

/// Ordered rules for every field of the form
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleSet {
    rules: BTreeMap<FieldName, Vec<Rule>>,
}

impl RuleSet {
    /// An empty rule set; every field is valid
    pub fn new() -> Self {
        Self::default()
    }

    /// The rules of the user registration form
    pub fn registration() -> Self {
        Self::new()
            .with_rules(
                FieldName::Name,
                vec![
                    Rule::required("Name is required"),
                    Rule::min_length(3, "Name must be at least 3 characters"),
                ],
            )
            .with_rules(
                FieldName::Email,
                vec![
                    Rule::required("Email is required"),
                    Rule::email_format("Invalid email address"),
                ],
            )
            .with_rules(
                FieldName::Age,
                vec![
                    Rule::required("Age is required"),
                    Rule::numeric_min(18.0, "You must be at least 18 years old"),
                ],
            )
            .with_rules(
                FieldName::Password,
                vec![
                    Rule::required("Password is required"),
                    Rule::min_length(5, "Password must be at least 5 characters"),
                    Rule::pattern(
                        ["[A-Za-z]", "[0-9]"],
                        "Password must contain both letters and numbers",
                    ),
                ],
            )
    }

    /// Replace the rules of a field
    pub fn with_rules(mut self, field: FieldName, rules: Vec<Rule>) -> Self {
        self.rules.insert(field, rules);
        self
    }

    /// Ordered rules of a field (empty when none are declared)
    pub fn rules(&self, field: FieldName) -> &[Rule] {
        self.rules.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_registration_declares_rules_for_every_field() {
        let set = RuleSet::registration();
        for field in FieldName::ALL {
            assert!(!set.rules(field).is_empty(), "no rules for {field}");
            assert_eq!(set.rules(field)[0].kind(), "required");
        }
    }

    #[test]
    fn test_registration_password_rule_order() {
        let set = RuleSet::registration();
        let kinds: Vec<&str> = set
            .rules(FieldName::Password)
            .iter()
            .map(Rule::kind)
            .collect();
        assert_eq!(kinds, vec!["required", "min_length", "pattern"]);
    }

    #[test]
    fn test_registration_messages() {
        let set = RuleSet::registration();
        let messages: Vec<&str> = set.rules(FieldName::Age).iter().map(Rule::message).collect();
        assert_eq!(
            messages,
            vec!["Age is required", "You must be at least 18 years old"]
        );
    }

    #[test]
    fn test_empty_rule_set_has_no_rules() {
        let set = RuleSet::new();
        assert!(set.rules(FieldName::Email).is_empty());
    }

    #[test]
    fn test_with_rules_replaces_existing() {
        let set = RuleSet::registration()
            .with_rules(FieldName::Name, vec![Rule::required("Who are you?")]);
        assert_eq!(set.rules(FieldName::Name).len(), 1);
        assert_eq!(set.rules(FieldName::Name)[0].message(), "Who are you?");
    }

    #[test]
    fn test_rule_serializes_with_kind_tag() {
        let rule = Rule::min_length(3, "too short");
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "min_length", "min": 3, "message": "too short"})
        );
    }

    #[test]
    fn test_rule_set_deserializes_from_json() {
        let json = r#"{
            "rules": {
                "age": [
                    {"kind": "required", "message": "Age is required"},
                    {"kind": "numeric_min", "min": 21.0, "message": "Too young"}
                ]
            }
        }"#;
        let set: RuleSet = serde_json::from_str(json).unwrap();
        assert_eq!(
            set.rules(FieldName::Age),
            &[
                Rule::required("Age is required"),
                Rule::numeric_min(21.0, "Too young"),
            ]
        );
        assert!(set.rules(FieldName::Name).is_empty());
    }
}
