//! Form state: values, touched fields and the current error map

use super::field::{FieldName, FormValues};
use super::validation::{ErrorMap, Validator};
use std::collections::BTreeSet;

/// Values typed by the user together with validation bookkeeping.
///
/// The error map is recomputed in full after every edit and cleared on
/// [`FormState::reset`]. Only errors of touched fields are exposed through
/// [`FormState::visible_errors`].
#[derive(Debug, Clone)]
pub struct FormState {
    values: FormValues,
    touched: BTreeSet<FieldName>,
    errors: ErrorMap,
    validator: Validator,
}

impl FormState {
    pub fn new(validator: Validator) -> Self {
        let values = FormValues::new();
        let errors = validator.validate(&values);
        Self {
            values,
            touched: BTreeSet::new(),
            errors,
            validator,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, field: FieldName) -> &str {
        self.values.get(field)
    }

    /// Overwrite a field. Does not mark it touched.
    pub fn set_value(&mut self, field: FieldName, value: impl Into<String>) {
        self.values.set(field, value);
        self.revalidate();
    }

    /// Append a typed character to a field
    pub fn push_char(&mut self, field: FieldName, c: char) {
        self.values.push_char(field, c);
        self.revalidate();
    }

    /// Remove the last character of a field
    pub fn pop_char(&mut self, field: FieldName) {
        self.values.pop_char(field);
        self.revalidate();
    }

    /// Mark a field as interacted with
    pub fn touch(&mut self, field: FieldName) {
        self.touched.insert(field);
    }

    /// Mark every field as interacted with
    pub fn touch_all(&mut self) {
        self.touched.extend(FieldName::ALL);
    }

    pub fn is_touched(&self, field: FieldName) -> bool {
        self.touched.contains(&field)
    }

    pub fn touched(&self) -> &BTreeSet<FieldName> {
        &self.touched
    }

    /// Recompute the full error map from the current values
    pub fn revalidate(&mut self) -> &ErrorMap {
        self.errors = self.validator.validate(&self.values);
        &self.errors
    }

    /// Every current error, touched or not
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Errors of touched fields only
    pub fn visible_errors(&self) -> ErrorMap {
        self.errors
            .restricted_to(|field| self.touched.contains(&field))
    }

    /// Record an error the rule set does not produce itself
    pub fn insert_error(&mut self, field: FieldName, message: impl Into<String>) {
        self.errors.insert(field, message);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Restore default values, forget touched fields and clear errors
    pub fn reset(&mut self) {
        self.values = FormValues::new();
        self.touched.clear();
        self.errors = ErrorMap::new();
    }
}
