//! Error types for the identity crate.
//!
//! Every variant describes a malformed token. Callers that only care about
//! the distinction "usable or not" can treat the whole enum as one failure.

use std::fmt;

/// Errors from decoding a compact sign-in token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// The token has fewer than two dot-separated segments.
    MissingPayload { segments: usize },
    /// A segment is not valid base64url.
    InvalidEncoding {
        segment: &'static str,
        reason: String,
    },
    /// The payload decoded but is not a usable claims object.
    InvalidClaims { reason: String },
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPayload { segments } => {
                write!(
                    f,
                    "malformed token: expected at least 2 segments, found {segments}"
                )
            }
            Self::InvalidEncoding { segment, reason } => {
                write!(f, "malformed token: {segment} is not base64url: {reason}")
            }
            Self::InvalidClaims { reason } => {
                write!(f, "malformed token: invalid claims: {reason}")
            }
        }
    }
}

impl std::error::Error for CredentialError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_payload_display() {
        let err = CredentialError::MissingPayload { segments: 1 };
        assert!(err.to_string().contains("malformed token"));
        assert!(err.to_string().contains("found 1"));
    }

    #[test]
    fn invalid_encoding_display_names_segment() {
        let err = CredentialError::InvalidEncoding {
            segment: "payload",
            reason: "Invalid symbol 33, offset 0.".to_string(),
        };
        assert!(err.to_string().contains("payload"));
        assert!(err.to_string().contains("Invalid symbol"));
    }

    #[test]
    fn invalid_claims_display() {
        let err = CredentialError::InvalidClaims {
            reason: "missing field `sub`".to_string(),
        };
        assert!(err.to_string().contains("invalid claims"));
        assert!(err.to_string().contains("sub"));
    }
}
