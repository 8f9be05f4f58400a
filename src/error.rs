//! Error types for the registration form.

use thiserror::Error;

/// Errors raised while assembling the form machinery.
///
/// Field validation failures are not errors in this sense: they are
/// reported through [`crate::form::ErrorMap`] and never abort anything.
#[derive(Debug, Error)]
pub enum FormError {
    /// A pattern rule holds an expression that does not compile.
    #[error("invalid pattern {pattern:?} for field {field}: {source}")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The HTTP transport could not be built.
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
