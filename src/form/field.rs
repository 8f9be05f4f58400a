//! Form field names and value storage

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The fields of the registration form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Name,
    Email,
    Age,
    Password,
}

impl FieldName {
    /// Every field, in declaration order
    pub const ALL: [FieldName; 4] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::Age,
        FieldName::Password,
    ];

    /// Name used on the wire and in input attributes
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Age => "age",
            Self::Password => "password",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Age => "Age",
            Self::Password => "Password",
        }
    }

    /// Whether the value should be masked when displayed
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Password)
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Age,
            Self::Age => Self::Password,
            Self::Password => Self::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Name => Self::Password,
            Self::Email => Self::Name,
            Self::Age => Self::Email,
            Self::Password => Self::Age,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-typed values for every field.
///
/// Values are kept exactly as typed, including the age, so an empty
/// input and `"0"` stay distinguishable until the wire boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<FieldName, String>,
}

impl FormValues {
    /// Create values with every field set to the empty string
    pub fn new() -> Self {
        Self {
            values: FieldName::ALL
                .iter()
                .map(|field| (*field, String::new()))
                .collect(),
        }
    }

    /// Get the current value of a field
    pub fn get(&self, field: FieldName) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Overwrite the value of a field
    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Append a character to a field
    pub fn push_char(&mut self, field: FieldName, c: char) {
        self.values.entry(field).or_default().push(c);
    }

    /// Remove the last character from a field
    pub fn pop_char(&mut self, field: FieldName) {
        if let Some(value) = self.values.get_mut(&field) {
            value.pop();
        }
    }

    /// Whether every field still holds its default value
    pub fn is_empty(&self) -> bool {
        self.values.values().all(String::is_empty)
    }

    /// Iterate over `(field, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

impl Default for FormValues {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_values_have_every_field_empty() {
        let values = FormValues::new();
        for field in FieldName::ALL {
            assert_eq!(values.get(field), "");
        }
        assert!(values.is_empty());
        assert_eq!(values.iter().count(), 4);
    }

    #[test]
    fn test_set_and_get() {
        let mut values = FormValues::new();
        values.set(FieldName::Age, "0");
        assert_eq!(values.get(FieldName::Age), "0");
        assert!(!values.is_empty());
    }

    #[test]
    fn test_push_and_pop_char() {
        let mut values = FormValues::new();
        values.push_char(FieldName::Name, 'M');
        values.push_char(FieldName::Name, 'a');
        assert_eq!(values.get(FieldName::Name), "Ma");
        values.pop_char(FieldName::Name);
        assert_eq!(values.get(FieldName::Name), "M");
        values.pop_char(FieldName::Email);
        assert_eq!(values.get(FieldName::Email), "");
    }

    #[test]
    fn test_iteration_follows_declaration_order() {
        let values = FormValues::new();
        let order: Vec<FieldName> = values.iter().map(|(field, _)| field).collect();
        assert_eq!(order, FieldName::ALL.to_vec());
    }

    #[test]
    fn test_next_and_prev_wrap() {
        assert_eq!(FieldName::Password.next(), FieldName::Name);
        assert_eq!(FieldName::Name.prev(), FieldName::Password);
        for field in FieldName::ALL {
            assert_eq!(field.next().prev(), field);
        }
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(FieldName::Name.as_str(), "name");
        assert_eq!(FieldName::Password.to_string(), "password");
        let json = serde_json::to_string(&FieldName::Email).unwrap();
        assert_eq!(json, "\"email\"");
    }

    #[test]
    fn test_only_password_is_secret() {
        let secret: Vec<FieldName> = FieldName::ALL
            .into_iter()
            .filter(FieldName::is_secret)
            .collect();
        assert_eq!(secret, vec![FieldName::Password]);
    }
}
