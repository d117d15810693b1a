//! Page start-up sequence.
//!
//! On page load the host:
//! 1. Initializes the identity provider
//! 2. Shows the sign-in UI or the conference, depending on the policy
//! 3. Renders the sign-in button if the sign-in UI is visible
//!
//! If the provider cannot be loaded the conference is opened without
//! authentication rather than leaving the user on a dead sign-in page.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::gate::AccessGate;
use crate::provider::IdentityProvider;
use crate::surface::{Surface, UiSurface};

/// How the start-up sequence ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LaunchOutcome {
    /// The provider is ready and the policy decided the visible surface.
    Gated { surface: Surface },
    /// The provider failed to load; the conference is open without sign-in.
    Fallback { reason: String },
}

/// Runs the start-up sequence for a freshly constructed gate.
pub async fn launch<P: IdentityProvider, S: UiSurface>(
    gate: &mut AccessGate<P, S>,
) -> LaunchOutcome {
    if let Err(e) = gate.initialize().await {
        error!(error = %e, "failed to initialize identity provider");
        gate.open_without_auth();
        return LaunchOutcome::Fallback {
            reason: e.to_string(),
        };
    }

    let surface = match gate.require_auth() {
        Ok(surface) => surface,
        Err(e) => {
            error!(error = %e, "failed to apply authentication requirement");
            gate.open_without_auth();
            return LaunchOutcome::Fallback {
                reason: e.to_string(),
            };
        }
    };

    if surface == Surface::SignIn {
        let target = gate.config().button_target().to_string();
        if let Err(e) = gate.show_sign_in_button(&target) {
            warn!(
                error = %e,
                element = %target,
                "could not render sign-in button"
            );
        }
    }

    info!(?surface, "gate launched");
    LaunchOutcome::Gated { surface }
}
