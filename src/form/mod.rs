//! Form domain layer
//!
//! Field rules, the validation engine, form state and the submission
//! controller that ties them to a [`crate::transport::Transport`].

mod controller;
mod field;
mod form_state;
mod rules;
mod validation;

pub use controller::{SubmissionController, SubmissionPhase, SubmitAttempt};
pub use field::{FieldName, FormValues};
pub use form_state::FormState;
pub use rules::{Rule, RuleSet, EMAIL_PATTERN};
pub use validation::{parse_number, ErrorMap, Validator};
