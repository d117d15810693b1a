//! Sign-in gate for the meetgate conference UI.
//!
//! This crate provides:
//! - The access gate state machine (`AccessGate`, `GateState`)
//! - The email domain allow-list (`DomainPolicy`)
//! - The identity provider seam (`IdentityProvider`, `CredentialCallback`)
//! - The host UI seam (`UiSurface`, `Banner`)
//! - Sign-in state notifications (`AuthChange`)
//! - The start-up sequence and event loop (`launch`, `drive`)
//!
//! # Flow
//!
//! The provider delivers a compact token through its callback. The gate
//! decodes the claims, checks the email domain, switches the visible
//! surface and broadcasts the change to subscribers. A gate holds at most
//! one session and never persists it.
//!
//! # Example
//!
//! ```
//! use meetgate_access::{DomainPolicy, GateConfig};
//! use meetgate_identity::IdentityClaims;
//!
//! let config = GateConfig::builder("client-id".to_string())
//!     .allow_domain("acme.com".to_string())
//!     .build();
//! let policy = DomainPolicy::new(config.allowed_domains());
//!
//! let alice = IdentityClaims::new("1".to_string()).with_email(Some("alice@acme.com".to_string()));
//! let mallory = IdentityClaims::new("2".to_string()).with_email(Some("m@evil.test".to_string()));
//!
//! assert!(policy.evaluate(&alice).is_granted());
//! assert!(!policy.evaluate(&mallory).is_granted());
//! ```

pub mod config;
pub mod error;
pub mod gate;
pub mod launch;
pub mod notify;
pub mod policy;
pub mod provider;
pub mod runtime;
pub mod state;
pub mod surface;

#[cfg(test)]
mod testing;

// Re-export main types at crate root
pub use config::{GateConfig, GateConfigBuilder};
pub use error::GateError;
pub use gate::{AUTHENTICATION_FAILED_MESSAGE, AccessGate, AuthOutcome};
pub use launch::{LaunchOutcome, launch};
pub use notify::{AuthChange, Notifier};
pub use policy::{DomainPolicy, PolicyDecision};
pub use provider::{
    ButtonOptions, ButtonShape, ButtonSize, ButtonText, ButtonTheme, CredentialCallback,
    CredentialResponse, IdentityProvider, LogoAlignment, ProviderError, ProviderSettings,
};
pub use runtime::{DriveSummary, GateCommand, apply_command, drive};
pub use state::GateState;
pub use surface::{BANNER_DURATION, Banner, BannerKind, Surface, UiSurface};
