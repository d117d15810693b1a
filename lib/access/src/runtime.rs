//! Event loop driving a gate.
//!
//! The loop serializes three event sources for one gate:
//! 1. Credentials delivered by the identity provider
//! 2. Commands from the host page (sign out, re-check, one-tap)
//! 3. The current banner's dismissal deadline
//!
//! Each event is handled to completion before the next is taken, after which
//! the loop yields so subscribers can drain their notifications. The loop
//! returns once the provider and the host have both closed their channels
//! and no banner is waiting to be dismissed.

use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task;
use tokio::time::{self, Instant};
use tracing::{debug, error, info};

use crate::error::GateError;
use crate::gate::{AccessGate, AuthOutcome};
use crate::provider::{CredentialResponse, IdentityProvider};
use crate::surface::UiSurface;

/// A request from the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateCommand {
    /// Sign the current user out.
    SignOut,
    /// Re-apply the authentication requirement to the visible surface.
    RequireAuth,
    /// Show the provider's one-tap account chooser.
    PromptOneTap,
}

/// Counts of what a loop run handled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveSummary {
    /// Credentials delivered by the provider.
    pub credentials: u32,
    /// Credentials that produced a session.
    pub authenticated: u32,
    /// Credentials rejected as malformed or denied.
    pub rejected: u32,
    /// Host commands applied.
    pub commands: u32,
    /// Banners hidden after their display window.
    pub banners_dismissed: u32,
}

enum LoopEvent {
    Credential(Option<CredentialResponse>),
    Command(Option<GateCommand>),
    BannerExpired,
}

/// Applies one host command to the gate.
///
/// # Errors
///
/// Returns `GateError::NotInitialized` if the gate is not initialized.
pub fn apply_command<P: IdentityProvider, S: UiSurface>(
    gate: &mut AccessGate<P, S>,
    command: GateCommand,
) -> Result<(), Report<GateError>> {
    debug!(?command, "applying host command");
    match command {
        GateCommand::SignOut => gate.sign_out(),
        GateCommand::RequireAuth => gate.require_auth().map(|_| ()),
        GateCommand::PromptOneTap => gate.show_one_tap(),
    }
}

/// Runs the gate's event loop until both channels are closed and the
/// current banner, if any, has been dismissed.
///
/// # Errors
///
/// Returns `GateError::NotInitialized` if the gate has not been initialized.
pub async fn drive<P: IdentityProvider, S: UiSurface>(
    gate: &mut AccessGate<P, S>,
    commands: &mut mpsc::Receiver<GateCommand>,
) -> Result<DriveSummary, Report<GateError>> {
    if !gate.state().is_initialized() {
        let err: Report<GateError> = GateError::NotInitialized { operation: "drive" }.into();
        error!(error = %err, "refusing to run an uninitialized gate");
        return Err(err);
    }

    let mut summary = DriveSummary::default();
    let mut provider_open = true;
    let mut host_open = true;

    loop {
        let deadline = gate.banner_deadline();
        if !provider_open && !host_open && deadline.is_none() {
            break;
        }
        let expiry = time::sleep_until(deadline.unwrap_or_else(Instant::now));
        let event = tokio::select! {
            credential = gate.next_credential(), if provider_open => {
                LoopEvent::Credential(credential)
            }
            command = commands.recv(), if host_open => LoopEvent::Command(command),
            () = expiry, if deadline.is_some() => LoopEvent::BannerExpired,
            else => break,
        };

        match event {
            LoopEvent::Credential(Some(response)) => {
                summary.credentials += 1;
                match gate.handle_credential(&response.credential)? {
                    AuthOutcome::Authenticated => summary.authenticated += 1,
                    AuthOutcome::Rejected(_) => summary.rejected += 1,
                }
            }
            LoopEvent::Credential(None) => {
                debug!("identity provider closed its callback");
                provider_open = false;
            }
            LoopEvent::Command(Some(command)) => {
                summary.commands += 1;
                apply_command(gate, command)?;
            }
            LoopEvent::Command(None) => {
                debug!("host closed its command channel");
                host_open = false;
            }
            LoopEvent::BannerExpired => {
                if gate.dismiss_expired_banner(Instant::now()) {
                    summary.banners_dismissed += 1;
                }
            }
        }

        // Let subscribers on the same thread keep up with the broadcast.
        task::yield_now().await;
    }

    info!(
        credentials = summary.credentials,
        authenticated = summary.authenticated,
        rejected = summary.rejected,
        "gate event loop finished"
    );
    Ok(summary)
}
