//! Error types for the access crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `GateError`: failures and policy outcomes of gate operations
//!
//! Provider failures arrive as [`ProviderError`](crate::provider::ProviderError)
//! and are folded into `GateError` at the gate boundary.

use std::fmt;

/// Errors from access gate operations.
///
/// None of these are fatal to the host. `MalformedToken` and `DomainDenied`
/// are reported to the user as banners and never escape
/// [`AccessGate::handle_credential`](crate::gate::AccessGate::handle_credential)
/// as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// An operation was invoked before the identity provider was initialized.
    NotInitialized { operation: &'static str },
    /// The identity provider's client library could not be loaded or initialized.
    ProviderLoad { reason: String },
    /// The identity provider rejected a request after initialization.
    ProviderCall {
        operation: &'static str,
        reason: String,
    },
    /// The delivered credential could not be decoded.
    MalformedToken { reason: String },
    /// The signed-in email's domain is not on the allow-list.
    DomainDenied { domain: Option<String> },
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized { operation } => {
                write!(f, "'{operation}' called before the gate was initialized")
            }
            Self::ProviderLoad { reason } => {
                write!(f, "identity provider failed to load: {reason}")
            }
            Self::ProviderCall { operation, reason } => {
                write!(f, "identity provider rejected '{operation}': {reason}")
            }
            Self::MalformedToken { reason } => {
                write!(f, "credential rejected: {reason}")
            }
            Self::DomainDenied { domain } => match domain {
                Some(domain) => write!(f, "email domain '{domain}' is not allowed"),
                None => write!(f, "email address has no domain to check"),
            },
        }
    }
}

impl std::error::Error for GateError {}
