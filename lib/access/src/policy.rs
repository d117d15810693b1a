//! Email domain allow-list.
//!
//! Access is granted when the allow-list is empty or when the signed-in
//! email's domain is one of its entries. Matching is exact and
//! case-sensitive: `Acme.com` does not match `acme.com`.

use meetgate_identity::IdentityClaims;
use serde::{Deserialize, Serialize};

/// Outcome of checking a user against the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum PolicyDecision {
    /// The user may enter.
    Granted,
    /// The user's domain is not allowed. `domain` is `None` when the email
    /// is missing or has no `@`.
    Denied { domain: Option<String> },
}

impl PolicyDecision {
    /// Returns true if access was granted.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// A set of email domains allowed through the gate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DomainPolicy {
    allowed: Vec<String>,
}

impl DomainPolicy {
    /// Creates a policy from a list of domains. Duplicates are dropped.
    #[must_use]
    pub fn new(domains: &[String]) -> Self {
        let mut allowed: Vec<String> = Vec::with_capacity(domains.len());
        for domain in domains {
            if !allowed.contains(domain) {
                allowed.push(domain.clone());
            }
        }
        Self { allowed }
    }

    /// Creates a policy that lets every domain through.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Returns true if no domain restriction is configured.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Returns the allowed domains in configuration order.
    #[must_use]
    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed
    }

    /// Returns true if a user with this email domain may enter.
    #[must_use]
    pub fn permits(&self, domain: Option<&str>) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        domain.is_some_and(|domain| self.allowed.iter().any(|a| a == domain))
    }

    /// Checks decoded claims against the allow-list.
    #[must_use]
    pub fn evaluate(&self, claims: &IdentityClaims) -> PolicyDecision {
        let domain = claims.email_domain();
        if self.permits(domain) {
            PolicyDecision::Granted
        } else {
            PolicyDecision::Denied {
                domain: domain.map(str::to_string),
            }
        }
    }

    /// Returns the message shown to a user whose domain was denied.
    #[must_use]
    pub fn denial_message(&self) -> String {
        format!(
            "Access denied. Only users from {} are allowed.",
            self.allowed.join(", ")
        )
    }
}
