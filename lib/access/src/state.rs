//! Gate lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an access gate.
///
/// ```text
/// Uninitialized -> Ready -> Authenticating -> Authenticated
///                                          -> Denied -> Ready
/// Authenticated -> SignedOut -> Ready
/// ```
///
/// `Authenticating`, `Denied` and `SignedOut` are transient: the gate passes
/// through them while handling a single event and never rests in them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// The identity provider has not been set up.
    Uninitialized,
    /// Waiting for a user to sign in.
    Ready,
    /// A credential is being decoded and checked.
    Authenticating,
    /// A user is signed in and allowed through.
    Authenticated,
    /// A user signed in from a domain that is not allowed.
    Denied,
    /// A user signed out.
    SignedOut,
}

impl GateState {
    /// Returns true once the identity provider has been set up.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        !matches!(self, Self::Uninitialized)
    }

    /// Returns the state's name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
            Self::Authenticating => "authenticating",
            Self::Authenticated => "authenticated",
            Self::Denied => "denied",
            Self::SignedOut => "signed_out",
        }
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
