//! Transport module for submitting registrations

mod client;
mod traits;

pub use client::HttpTransport;
pub use traits::{RegistrationPayload, Transport, TransportError, UNKNOWN_ERROR_MESSAGE};

#[cfg(test)]
pub use traits::MockTransport;
