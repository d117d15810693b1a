//! Gate configuration.
//!
//! This module provides the constructor-time options for an
//! [`AccessGate`](crate::gate::AccessGate): which provider client to use,
//! which email domains may sign in, and whether signing in is mandatory.

use serde::{Deserialize, Serialize};

/// Configuration for an access gate.
///
/// Configuration is immutable once the gate is constructed. Fields with
/// defaults can be omitted when loading from a file or the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// The OAuth2 client ID registered with the identity provider.
    client_id: String,
    /// Email domains allowed to sign in. Empty means any domain.
    #[serde(default)]
    allowed_domains: Vec<String>,
    /// Whether the gated UI stays hidden until a user signs in.
    /// Default: true
    #[serde(default = "default_require_auth")]
    require_auth: bool,
    /// Where the host may send the user after signing in. Not acted on by the gate.
    #[serde(default)]
    redirect_after_auth: Option<String>,
    /// Element the provider renders its sign-in button into.
    /// Default: "google-signin-button"
    #[serde(default = "default_button_target")]
    button_target: String,
}

fn default_require_auth() -> bool {
    true
}

fn default_button_target() -> String {
    "google-signin-button".to_string()
}

impl GateConfig {
    /// Creates a configuration with defaults for optional fields.
    ///
    /// The default gate requires authentication and allows every domain.
    #[must_use]
    pub fn new(client_id: String) -> Self {
        Self {
            client_id,
            allowed_domains: Vec::new(),
            require_auth: default_require_auth(),
            redirect_after_auth: None,
            button_target: default_button_target(),
        }
    }

    /// Creates a configuration builder for more customization.
    #[must_use]
    pub fn builder(client_id: String) -> GateConfigBuilder {
        GateConfigBuilder::new(client_id)
    }

    /// Returns the OAuth2 client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the allowed email domains.
    #[must_use]
    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    /// Returns true if signing in is mandatory.
    #[must_use]
    pub fn require_auth(&self) -> bool {
        self.require_auth
    }

    /// Returns the post-sign-in redirect target, if configured.
    #[must_use]
    pub fn redirect_after_auth(&self) -> Option<&str> {
        self.redirect_after_auth.as_deref()
    }

    /// Returns the element ID the sign-in button renders into.
    #[must_use]
    pub fn button_target(&self) -> &str {
        &self.button_target
    }
}

/// Builder for `GateConfig`.
#[derive(Debug)]
pub struct GateConfigBuilder {
    client_id: String,
    allowed_domains: Vec<String>,
    require_auth: bool,
    redirect_after_auth: Option<String>,
    button_target: String,
}

impl GateConfigBuilder {
    /// Creates a new builder with the required client ID.
    #[must_use]
    pub fn new(client_id: String) -> Self {
        Self {
            client_id,
            allowed_domains: Vec::new(),
            require_auth: default_require_auth(),
            redirect_after_auth: None,
            button_target: default_button_target(),
        }
    }

    /// Replaces the allowed domains.
    #[must_use]
    pub fn allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Vec::new();
        for domain in domains {
            self = self.allow_domain(domain);
        }
        self
    }

    /// Adds a domain to the allow-list.
    #[must_use]
    pub fn allow_domain(mut self, domain: String) -> Self {
        if !self.allowed_domains.contains(&domain) {
            self.allowed_domains.push(domain);
        }
        self
    }

    /// Sets whether signing in is mandatory.
    #[must_use]
    pub fn require_auth(mut self, require: bool) -> Self {
        self.require_auth = require;
        self
    }

    /// Sets the post-sign-in redirect target.
    #[must_use]
    pub fn redirect_after_auth(mut self, target: Option<String>) -> Self {
        self.redirect_after_auth = target;
        self
    }

    /// Sets the element ID the sign-in button renders into.
    #[must_use]
    pub fn button_target(mut self, target: String) -> Self {
        self.button_target = target;
        self
    }

    /// Builds the `GateConfig`.
    #[must_use]
    pub fn build(self) -> GateConfig {
        GateConfig {
            client_id: self.client_id,
            allowed_domains: self.allowed_domains,
            require_auth: self.require_auth,
            redirect_after_auth: self.redirect_after_auth,
            button_target: self.button_target,
        }
    }
}
