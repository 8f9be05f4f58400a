//! Signup form - user registration with declarative validation
//!
//! The crate holds the core of a registration form: field rules, a
//! validation engine, form state and a submission controller that sends
//! valid registrations through a [`transport::Transport`]. Rendering is
//! left to whoever drives the controller; the `signup-form` binary is a
//! terminal front end.
//!
//! ```no_run
//! use signup_form::form::{FieldName, SubmissionController, SubmissionPhase};
//! use signup_form::transport::HttpTransport;
//! use std::time::Duration;
//!
//! # async fn run() -> signup_form::Result<()> {
//! let transport = HttpTransport::new("http://localhost:5173/api/users", Duration::from_secs(30))?;
//! let mut controller = SubmissionController::registration()?;
//! controller.set_value(FieldName::Name, "Maxime");
//! controller.set_value(FieldName::Email, "maxime@example.com");
//! controller.set_value(FieldName::Age, "25");
//! controller.set_value(FieldName::Password, "abc123");
//!
//! if let SubmissionPhase::Error(message) = controller.submit(&transport).await {
//!     eprintln!("Registration failed. {message}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
pub mod form;
pub mod transport;

pub use error::{FormError, Result};
