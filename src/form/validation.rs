//! Validation engine
//!
//! Evaluates a [`RuleSet`] against [`FormValues`] and produces one error
//! message per failing field.

use super::field::{FieldName, FormValues};
use super::rules::{Rule, RuleSet, EMAIL_PATTERN};
use crate::error::{FormError, Result};
use regex::Regex;
use std::collections::BTreeMap;

/// Per-field error messages. A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    errors: BTreeMap<FieldName, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the error of a field, replacing any previous one
    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Error message of a field, if it has one
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with an error
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over `(field, message)` pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Keep only the errors whose field satisfies `keep`
    pub fn restricted_to(&self, keep: impl Fn(FieldName) -> bool) -> Self {
        Self {
            errors: self
                .errors
                .iter()
                .filter(|(field, _)| keep(**field))
                .map(|(field, msg)| (*field, msg.clone()))
                .collect(),
        }
    }
}

/// A rule whose patterns have been compiled
#[derive(Debug, Clone)]
enum CompiledRule {
    Required,
    MinLength(usize),
    Pattern(Vec<Regex>),
    NumericMin(f64),
    EmailFormat(Regex),
}

impl CompiledRule {
    fn compile(field: FieldName, rule: &Rule) -> Result<Self> {
        let compiled = match rule {
            Rule::Required { .. } => Self::Required,
            Rule::MinLength { min, .. } => Self::MinLength(*min),
            Rule::Pattern { all_of, .. } => Self::Pattern(
                all_of
                    .iter()
                    .map(|pattern| compile_pattern(field, pattern))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Rule::NumericMin { min, .. } => Self::NumericMin(*min),
            Rule::EmailFormat { .. } => Self::EmailFormat(compile_pattern(field, EMAIL_PATTERN)?),
        };
        Ok(compiled)
    }

    /// Whether `value` satisfies this rule
    fn passes(&self, value: &str) -> bool {
        match self {
            Self::Required => !value.trim().is_empty(),
            Self::MinLength(min) => value.chars().count() >= *min,
            Self::Pattern(patterns) => patterns.iter().all(|re| re.is_match(value)),
            Self::NumericMin(min) => parse_number(value).is_some_and(|n| n >= *min),
            Self::EmailFormat(re) => re.is_match(value.trim()),
        }
    }
}

fn compile_pattern(field: FieldName, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| FormError::InvalidPattern {
        field: field.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}

/// Parse user-typed text as a finite number.
///
/// Returns `None` for anything that is not a number, so free text in a
/// numeric field fails its rule instead of erroring.
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Evaluates field rules against form values
#[derive(Debug, Clone)]
pub struct Validator {
    rules: RuleSet,
    compiled: BTreeMap<FieldName, Vec<CompiledRule>>,
}

impl Validator {
    /// Build a validator, compiling every pattern of the rule set up front
    pub fn new(rules: RuleSet) -> Result<Self> {
        let mut compiled = BTreeMap::new();
        for field in FieldName::ALL {
            let field_rules = rules
                .rules(field)
                .iter()
                .map(|rule| CompiledRule::compile(field, rule))
                .collect::<Result<Vec<_>>>()?;
            compiled.insert(field, field_rules);
        }
        Ok(Self { rules, compiled })
    }

    /// Validator for the user registration form
    pub fn registration() -> Result<Self> {
        Self::new(RuleSet::registration())
    }

    /// Message of the first failing rule of `field`, if any
    pub fn validate_field(&self, field: FieldName, value: &str) -> Option<&str> {
        let compiled = self.compiled.get(&field)?;
        let (rule, _) = self
            .rules
            .rules(field)
            .iter()
            .zip(compiled)
            .find(|(_, check)| !check.passes(value))?;
        tracing::trace!(field = %field, rule = rule.kind(), "rule failed");
        Some(rule.message())
    }

    /// Validate every field of the form
    pub fn validate(&self, values: &FormValues) -> ErrorMap {
        let mut errors = ErrorMap::new();
        for field in FieldName::ALL {
            if let Some(message) = self.validate_field(field, values.get(field)) {
                errors.insert(field, message);
            }
        }
        errors
    }
}
