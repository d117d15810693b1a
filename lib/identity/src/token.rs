//! Compact token decoding.
//!
//! A compact token is `base64url(header).base64url(payload).signature`. The
//! payload carries the identity claims. Decoding is purely structural; the
//! signature is never checked.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::claims::IdentityClaims;
use crate::error::CredentialError;

/// The raw dot-separated segments of a compact token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSegments<'a> {
    /// Encoded header segment.
    pub header: &'a str,
    /// Encoded payload segment.
    pub payload: &'a str,
    /// Signature segment, when the token has one.
    pub signature: Option<&'a str>,
}

/// Header fields worth logging when a token arrives.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Signing algorithm.
    #[serde(default)]
    pub alg: Option<String>,
    /// Key ID used to sign the token.
    #[serde(default)]
    pub kid: Option<String>,
    /// Token type.
    #[serde(default)]
    pub typ: Option<String>,
}

/// Splits a token into its segments.
///
/// Segments beyond the third are ignored.
///
/// # Errors
///
/// Returns `CredentialError::MissingPayload` if the token has no payload segment.
pub fn split_segments(token: &str) -> Result<TokenSegments<'_>, CredentialError> {
    let mut parts = token.split('.');
    let header = parts.next().unwrap_or_default();
    let payload = parts
        .next()
        .ok_or(CredentialError::MissingPayload { segments: 1 })?;
    let signature = parts.next();

    Ok(TokenSegments {
        header,
        payload,
        signature,
    })
}

/// Decodes the identity claims from a token's payload segment.
///
/// # Errors
///
/// Returns an error if the token has no payload segment, if the payload is
/// not base64url, or if it does not parse as a claims object.
pub fn decode_claims(token: &str) -> Result<IdentityClaims, CredentialError> {
    let segments = split_segments(token)?;
    let payload = decode_segment("payload", segments.payload)?;

    let claims: IdentityClaims =
        serde_json::from_slice(&payload).map_err(|e| CredentialError::InvalidClaims {
            reason: e.to_string(),
        })?;

    trace!(subject = claims.subject(), "decoded token claims");
    Ok(claims)
}

/// Decodes a token's header segment.
///
/// # Errors
///
/// Returns an error if the header is not base64url or not a JSON object.
pub fn decode_header(token: &str) -> Result<TokenHeader, CredentialError> {
    let segments = split_segments(token)?;
    let header = decode_segment("header", segments.header)?;

    serde_json::from_slice(&header).map_err(|e| CredentialError::InvalidClaims {
        reason: format!("header: {e}"),
    })
}

fn decode_segment(name: &'static str, segment: &str) -> Result<Vec<u8>, CredentialError> {
    // Some encoders pad segments even though the format forbids it
    URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| CredentialError::InvalidEncoding {
            segment: name,
            reason: e.to_string(),
        })
}
