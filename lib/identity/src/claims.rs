//! Identity claims asserted by a sign-in token.
//!
//! Claims keep the provider's own names (`sub`, `email`, `name`, `picture`,
//! `email_verified`) so a decoded record serializes back to the same shape.
//! Claims the gate does not use (`iss`, `aud`, `exp`, ...) are ignored.

use serde::{Deserialize, Serialize};

/// The identity of a signed-in user, as decoded from a token payload.
///
/// Only the subject is required. Every other claim is optional because
/// providers omit them depending on the scopes a user consented to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject identifier, unique per user per provider.
    sub: String,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    picture: Option<String>,
    /// Whether the provider verified the email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email_verified: Option<bool>,
}

impl IdentityClaims {
    /// Creates claims carrying only a subject.
    #[must_use]
    pub fn new(subject: String) -> Self {
        Self {
            sub: subject,
            email: None,
            name: None,
            picture: None,
            email_verified: None,
        }
    }

    /// Sets the email claim.
    #[must_use]
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_picture(mut self, picture: Option<String>) -> Self {
        self.picture = picture;
        self
    }

    /// Sets the email-verified flag.
    #[must_use]
    pub fn with_email_verified(mut self, verified: Option<bool>) -> Self {
        self.email_verified = verified;
        self
    }

    /// Returns the subject identifier.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Returns the email address, if present.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the display name, if present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the avatar URL, if present.
    #[must_use]
    pub fn picture(&self) -> Option<&str> {
        self.picture.as_deref()
    }

    /// Returns the email-verified flag, if the provider sent one.
    #[must_use]
    pub fn email_verified(&self) -> Option<bool> {
        self.email_verified
    }

    /// Returns the part of the email address after the `@`.
    ///
    /// For an address with several `@` signs only the text between the first
    /// and the second one is returned. Returns `None` when there is no email
    /// or it has no `@`.
    #[must_use]
    pub fn email_domain(&self) -> Option<&str> {
        self.email.as_deref()?.split('@').nth(1)
    }
}
