//! Trait abstraction for the registration transport to enable mocking in tests

use crate::form::{parse_number, FieldName, FormValues};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used when a transport failure carries no text of its own
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// A failed submission, with a message ready to show to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message to display, falling back to a generic one when blank
    pub fn message(&self) -> &str {
        if self.message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE
        } else {
            &self.message
        }
    }
}

/// Body sent to the registration endpoint.
///
/// The age is typed text inside the form and only becomes a number here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationPayload {
    pub name: String,
    pub email: String,
    pub age: serde_json::Number,
    pub password: String,
}

impl RegistrationPayload {
    /// Build a payload from form values.
    ///
    /// Returns `None` when the age is not a number.
    pub fn from_values(values: &FormValues) -> Option<Self> {
        let age = to_json_number(parse_number(values.get(FieldName::Age))?)?;
        Some(Self {
            name: values.get(FieldName::Name).to_string(),
            email: values.get(FieldName::Email).to_string(),
            age,
            password: values.get(FieldName::Password).to_string(),
        })
    }
}

/// Integral values become JSON integers so `"25"` goes out as `25`
fn to_json_number(n: f64) -> Option<serde_json::Number> {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Some(serde_json::Number::from(n as i64))
    } else {
        serde_json::Number::from_f64(n)
    }
}

/// Sends a registration somewhere, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Submit a registration. Any failure, whatever its cause, is a
    /// [`TransportError`].
    async fn submit(&self, payload: RegistrationPayload) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(age: &str) -> FormValues {
        let mut values = FormValues::new();
        values.set(FieldName::Name, "Maxime");
        values.set(FieldName::Email, "maxime@example.com");
        values.set(FieldName::Age, age);
        values.set(FieldName::Password, "abc123");
        values
    }

    #[test]
    fn test_payload_serializes_age_as_number() {
        let payload = RegistrationPayload::from_values(&values("25")).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Maxime",
                "email": "maxime@example.com",
                "age": 25,
                "password": "abc123",
            })
        );
    }

    #[test]
    fn test_payload_keeps_fractional_age() {
        let payload = RegistrationPayload::from_values(&values(" 18.5 ")).unwrap();
        assert_eq!(payload.age.as_f64(), Some(18.5));
    }

    #[test]
    fn test_payload_requires_numeric_age() {
        assert!(RegistrationPayload::from_values(&values("abc")).is_none());
        assert!(RegistrationPayload::from_values(&values("")).is_none());
    }

    #[test]
    fn test_payload_does_not_trim_text_fields() {
        let mut v = values("30");
        v.set(FieldName::Password, " abc123 ");
        let payload = RegistrationPayload::from_values(&v).unwrap();
        assert_eq!(payload.password, " abc123 ");
    }

    #[test]
    fn test_transport_error_message() {
        let err = TransportError::new("API Error: Internal Server Error");
        assert_eq!(err.message(), "API Error: Internal Server Error");
        assert_eq!(err.to_string(), "API Error: Internal Server Error");
    }

    #[test]
    fn test_blank_transport_error_falls_back() {
        assert_eq!(TransportError::new("").message(), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(TransportError::new("  ").message(), UNKNOWN_ERROR_MESSAGE);
    }
}
