//! Identity claims and compact token decoding for meetgate.
//!
//! This crate provides:
//! - `IdentityClaims`: the user identity asserted by a sign-in token
//! - `decode_claims`: extraction of claims from a compact `header.payload.signature` token
//! - `CredentialError`: the ways a delivered token can be malformed
//!
//! # Trust Model
//!
//! Tokens reach this crate through the identity provider's client library,
//! which has already validated them. Nothing here checks the signature
//! segment; it is carried along only for diagnostics.
//!
//! # Example
//!
//! ```
//! use base64::Engine;
//! use base64::engine::general_purpose::URL_SAFE_NO_PAD;
//! use meetgate_identity::decode_claims;
//!
//! let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
//! let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"123","email":"a@acme.com","name":"A"}"#);
//! let token = format!("{header}.{payload}.c2ln");
//!
//! let claims = decode_claims(&token).unwrap();
//! assert_eq!(claims.subject(), "123");
//! assert_eq!(claims.email_domain(), Some("acme.com"));
//! ```

pub mod claims;
pub mod error;
pub mod token;

pub use claims::IdentityClaims;
pub use error::CredentialError;
pub use token::{TokenHeader, TokenSegments, decode_claims, decode_header, split_segments};
