//! The access gate state machine.
//!
//! An [`AccessGate`] owns the single in-memory session of a page. It decodes
//! credentials delivered by the identity provider, checks them against the
//! domain allow-list, decides which surface is visible and broadcasts every
//! sign-in state change.
//!
//! All operations run to completion on the host's event loop. Only
//! [`AccessGate::initialize`] suspends.

use meetgate_identity::{IdentityClaims, decode_claims, decode_header};
use rootcause::prelude::Report;
use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::config::GateConfig;
use crate::error::GateError;
use crate::notify::{AuthChange, Notifier};
use crate::policy::{DomainPolicy, PolicyDecision};
use crate::provider::{
    ButtonOptions, CredentialResponse, IdentityProvider, ProviderSettings, credential_channel,
};
use crate::state::GateState;
use crate::surface::{Banner, BannerKind, Surface, UiSurface};

/// Banner text for a credential that could not be decoded.
pub const AUTHENTICATION_FAILED_MESSAGE: &str = "Authentication failed. Please try again.";

/// Result of handling one delivered credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The user is signed in and the gated UI is visible.
    Authenticated,
    /// The credential did not produce a session. The error is either
    /// `GateError::MalformedToken` or `GateError::DomainDenied`.
    Rejected(GateError),
}

impl AuthOutcome {
    /// Returns true if the credential produced a session.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

/// A sign-in gate in front of the conference UI.
pub struct AccessGate<P: IdentityProvider, S: UiSurface> {
    config: GateConfig,
    policy: DomainPolicy,
    provider: P,
    surface: S,
    state: GateState,
    session: Option<IdentityClaims>,
    visible: Option<Surface>,
    banner: Option<Banner>,
    notifier: Notifier,
    credentials: Option<mpsc::UnboundedReceiver<CredentialResponse>>,
}

impl<P: IdentityProvider, S: UiSurface> AccessGate<P, S> {
    /// Creates an uninitialized gate.
    #[must_use]
    pub fn new(config: GateConfig, provider: P, surface: S) -> Self {
        let policy = DomainPolicy::new(config.allowed_domains());
        Self {
            config,
            policy,
            provider,
            surface,
            state: GateState::Uninitialized,
            session: None,
            visible: None,
            banner: None,
            notifier: Notifier::new(),
            credentials: None,
        }
    }

    /// Sets up the identity provider and starts listening for credentials.
    ///
    /// Calling this again after it succeeded does nothing.
    ///
    /// # Errors
    ///
    /// Returns `GateError::ProviderLoad` if the provider cannot be set up.
    /// The gate stays uninitialized; the host should either surface the
    /// error or call [`open_without_auth`](Self::open_without_auth).
    #[instrument(skip_all)]
    pub async fn initialize(&mut self) -> Result<(), Report<GateError>> {
        if self.state.is_initialized() {
            debug!("gate already initialized");
            return Ok(());
        }

        let (callback, receiver) = credential_channel();
        let settings = ProviderSettings::for_client(self.config.client_id());

        self.provider
            .initialize(&settings, callback)
            .await
            .map_err(|e| GateError::ProviderLoad {
                reason: e.to_string(),
            })?;

        self.credentials = Some(receiver);
        self.transition(GateState::Ready);
        info!(
            client_id = self.config.client_id(),
            "identity provider initialized"
        );
        Ok(())
    }

    /// Waits for the provider to deliver the next credential.
    ///
    /// Returns `None` once the provider has dropped every callback handle, or
    /// immediately if the gate is not initialized.
    pub async fn next_credential(&mut self) -> Option<CredentialResponse> {
        match self.credentials.as_mut() {
            Some(receiver) => receiver.recv().await,
            None => None,
        }
    }

    /// Handles a credential delivered by the identity provider.
    ///
    /// A malformed credential or a denied domain is reported to the user
    /// through a banner and returned as [`AuthOutcome::Rejected`]; either way
    /// the gate ends up `Ready` with no session.
    ///
    /// # Errors
    ///
    /// Returns `GateError::NotInitialized` if called before
    /// [`initialize`](Self::initialize).
    #[instrument(skip_all)]
    pub fn handle_credential(&mut self, token: &str) -> Result<AuthOutcome, Report<GateError>> {
        self.ensure_initialized("handle_credential")?;
        self.transition(GateState::Authenticating);

        if let Ok(header) = decode_header(token) {
            debug!(alg = ?header.alg, kid = ?header.kid, "credential received");
        }

        let claims = match decode_claims(token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(error = %e, "failed to decode credential");
                self.transition(GateState::Ready);
                self.show_banner(
                    BannerKind::AuthenticationFailed,
                    AUTHENTICATION_FAILED_MESSAGE.to_string(),
                );
                if self.session.is_some() {
                    self.clear_session();
                    self.apply_policy();
                }
                return Ok(AuthOutcome::Rejected(GateError::MalformedToken {
                    reason: e.to_string(),
                }));
            }
        };

        match self.policy.evaluate(&claims) {
            PolicyDecision::Granted => {
                info!(
                    subject = claims.subject(),
                    email = claims.email(),
                    "user signed in"
                );
                self.session = Some(claims.clone());
                self.transition(GateState::Authenticated);
                self.show_gated();
                self.notifier.publish(AuthChange::signed_in(claims));
                Ok(AuthOutcome::Authenticated)
            }
            PolicyDecision::Denied { domain } => {
                self.transition(GateState::Denied);
                warn!(
                    subject = claims.subject(),
                    domain = domain.as_deref(),
                    "email domain not allowed"
                );
                let message = self.policy.denial_message();
                self.show_banner(BannerKind::AccessDenied, message);
                self.clear_session();
                self.transition(GateState::Ready);
                self.apply_policy();
                Ok(AuthOutcome::Rejected(GateError::DomainDenied { domain }))
            }
        }
    }

    /// Signs the current user out.
    ///
    /// Always broadcasts one signed-out notification, even when nobody was
    /// signed in.
    ///
    /// # Errors
    ///
    /// Returns `GateError::NotInitialized` if called before
    /// [`initialize`](Self::initialize).
    #[instrument(skip_all)]
    pub fn sign_out(&mut self) -> Result<(), Report<GateError>> {
        self.ensure_initialized("sign_out")?;
        self.transition(GateState::SignedOut);
        self.clear_session();
        self.transition(GateState::Ready);
        self.apply_policy();
        info!("user signed out");
        Ok(())
    }

    /// Shows the gated UI if the configuration and session allow it, and the
    /// sign-in UI otherwise. Returns the surface now visible.
    ///
    /// # Errors
    ///
    /// Returns `GateError::NotInitialized` if called before
    /// [`initialize`](Self::initialize).
    pub fn require_auth(&mut self) -> Result<Surface, Report<GateError>> {
        self.ensure_initialized("require_auth")?;
        Ok(self.apply_policy())
    }

    /// Shows the gated UI without a session.
    ///
    /// This is the fallback for a provider that failed to load and is
    /// allowed in every state.
    pub fn open_without_auth(&mut self) {
        warn!("opening conference without authentication");
        self.show_gated();
    }

    /// Asks the provider to render its sign-in button into `target`.
    ///
    /// # Errors
    ///
    /// Returns `GateError::NotInitialized` before initialization, or
    /// `GateError::ProviderCall` if the provider cannot render there.
    pub fn show_sign_in_button(&self, target: &str) -> Result<(), Report<GateError>> {
        self.ensure_initialized("show_sign_in_button")?;
        self.provider
            .render_button(target, &ButtonOptions::default())
            .map_err(|e| GateError::ProviderCall {
                operation: "render_button",
                reason: e.to_string(),
            })?;
        debug!(element = target, "sign-in button rendered");
        Ok(())
    }

    /// Asks the provider to show its one-tap account chooser.
    ///
    /// # Errors
    ///
    /// Returns `GateError::NotInitialized` if called before
    /// [`initialize`](Self::initialize).
    pub fn show_one_tap(&self) -> Result<(), Report<GateError>> {
        self.ensure_initialized("show_one_tap")?;
        self.provider.prompt();
        Ok(())
    }

    /// Hides the banner if its display window has passed at `now`.
    ///
    /// Returns true if a banner was hidden.
    pub fn dismiss_expired_banner(&mut self, now: Instant) -> bool {
        match &self.banner {
            Some(banner) if banner.is_expired(now) => {
                self.banner = None;
                self.surface.hide_banner();
                true
            }
            _ => false,
        }
    }

    /// Returns a receiver for sign-in state changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthChange> {
        self.notifier.subscribe()
    }

    /// Returns true if a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Returns the signed-in user's claims, exactly as decoded.
    #[must_use]
    pub fn current_session(&self) -> Option<&IdentityClaims> {
        self.session.as_ref()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Returns the visible surface, or `None` before the gate showed anything.
    #[must_use]
    pub fn visible_surface(&self) -> Option<Surface> {
        self.visible
    }

    /// Returns the banner currently shown, if any.
    #[must_use]
    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Returns when the current banner should be hidden.
    #[must_use]
    pub fn banner_deadline(&self) -> Option<Instant> {
        self.banner.as_ref().map(Banner::expires_at)
    }

    /// Returns the gate configuration.
    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Returns the identity provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the UI surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn ensure_initialized(&self, operation: &'static str) -> Result<(), Report<GateError>> {
        if !self.state.is_initialized() {
            return Err(GateError::NotInitialized { operation }.into());
        }
        Ok(())
    }

    fn transition(&mut self, next: GateState) {
        debug!(from = %self.state, to = %next, "gate state transition");
        self.state = next;
    }

    fn clear_session(&mut self) {
        self.provider.disable_auto_select();
        self.session = None;
        self.notifier.publish(AuthChange::signed_out());
    }

    fn apply_policy(&mut self) -> Surface {
        if !self.config.require_auth() || self.is_authenticated() {
            self.show_gated();
            Surface::Gated
        } else {
            self.show_sign_in();
            Surface::SignIn
        }
    }

    fn show_gated(&mut self) {
        self.surface.hide_auth_ui();
        self.surface.show_gated_ui();
        if let Some(name) = self.session.as_ref().and_then(IdentityClaims::name) {
            self.surface.set_display_name(name);
        }
        self.visible = Some(Surface::Gated);
    }

    fn show_sign_in(&mut self) {
        self.surface.hide_gated_ui();
        self.surface.show_auth_ui();
        self.visible = Some(Surface::SignIn);
    }

    fn show_banner(&mut self, kind: BannerKind, message: String) {
        let banner = Banner::new(kind, message, Instant::now());
        self.surface.show_banner(&banner);
        self.banner = Some(banner);
    }
}
