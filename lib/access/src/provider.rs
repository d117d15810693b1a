//! Identity provider seam.
//!
//! The gate never talks to a provider's client library directly. It talks to
//! an [`IdentityProvider`], which a browser host backs with the provider's
//! script and tests back with an in-memory fake.
//!
//! Sign-in results flow back through a [`CredentialCallback`] that the gate
//! hands to the provider during initialization. Each sign-in delivers one
//! [`CredentialResponse`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;

/// Settings passed to the provider when it is initialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// The OAuth2 client ID.
    pub client_id: String,
    /// Whether the provider may sign a returning user in without a click.
    pub auto_select: bool,
    /// Whether clicking outside the one-tap prompt dismisses it.
    pub cancel_on_tap_outside: bool,
}

impl ProviderSettings {
    /// Creates the settings the gate uses for a client.
    ///
    /// Automatic sign-in is always off; users pick an account explicitly.
    #[must_use]
    pub fn for_client(client_id: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            auto_select: false,
            cancel_on_tap_outside: true,
        }
    }
}

/// Visual theme of the sign-in button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonTheme {
    #[default]
    Outline,
    FilledBlue,
    FilledBlack,
}

/// Size of the sign-in button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonSize {
    #[default]
    Large,
    Medium,
    Small,
}

/// Label of the sign-in button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonText {
    #[default]
    SigninWith,
    SignupWith,
    ContinueWith,
    Signin,
}

/// Outline shape of the sign-in button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonShape {
    #[default]
    Rectangular,
    Pill,
    Circle,
    Square,
}

/// Placement of the provider logo inside the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoAlignment {
    #[default]
    Left,
    Center,
}

/// Rendering options for the provider's sign-in button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonOptions {
    pub theme: ButtonTheme,
    pub size: ButtonSize,
    pub text: ButtonText,
    pub shape: ButtonShape,
    pub logo_alignment: LogoAlignment,
}

/// A credential delivered by the provider after a user signs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialResponse {
    /// The compact sign-in token.
    pub credential: String,
}

/// The gate's side of the provider's credential callback.
///
/// Cloning yields another handle to the same gate. Dropping every handle
/// tells the gate no further sign-ins will arrive.
#[derive(Debug, Clone)]
pub struct CredentialCallback {
    sender: mpsc::UnboundedSender<CredentialResponse>,
}

impl CredentialCallback {
    /// Delivers a credential to the gate.
    ///
    /// Returns false if the gate has been dropped.
    pub fn deliver(&self, credential: impl Into<String>) -> bool {
        self.sender
            .send(CredentialResponse {
                credential: credential.into(),
            })
            .is_ok()
    }

    /// Returns true if the gate is no longer listening.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Creates a connected callback and receiver pair.
pub(crate) fn credential_channel() -> (
    CredentialCallback,
    mpsc::UnboundedReceiver<CredentialResponse>,
) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (CredentialCallback { sender }, receiver)
}

/// Errors reported by an identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider's client library could not be fetched.
    LoadFailed { reason: String },
    /// The client library loaded but refused the settings.
    InitializeFailed { reason: String },
    /// The element to render into does not exist.
    TargetNotFound { target: String },
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadFailed { reason } => write!(f, "failed to load client library: {reason}"),
            Self::InitializeFailed { reason } => {
                write!(f, "failed to initialize client library: {reason}")
            }
            Self::TargetNotFound { target } => {
                write!(f, "element with id '{target}' not found")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Trait for identity provider client libraries.
///
/// Implementations wrap one provider's client-side sign-in library. The
/// provider owns account selection and token validation; the gate only
/// consumes the tokens it delivers.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Loads the client library and registers the credential callback.
    ///
    /// # Errors
    ///
    /// Returns an error if the library cannot be loaded or initialized.
    async fn initialize(
        &self,
        settings: &ProviderSettings,
        callback: CredentialCallback,
    ) -> Result<(), ProviderError>;

    /// Shows the provider's one-tap account chooser.
    fn prompt(&self);

    /// Renders the provider's sign-in button into the element `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    fn render_button(&self, target: &str, options: &ButtonOptions) -> Result<(), ProviderError>;

    /// Stops the provider from silently re-selecting the last account.
    fn disable_auto_select(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_disable_auto_select() {
        let settings = ProviderSettings::for_client("client-id");
        assert_eq!(settings.client_id, "client-id");
        assert!(!settings.auto_select);
        assert!(settings.cancel_on_tap_outside);
    }

    #[test]
    fn default_button_options_serialize_in_provider_vocabulary() {
        let json = serde_json::to_value(ButtonOptions::default()).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "theme": "outline",
                "size": "large",
                "text": "signin_with",
                "shape": "rectangular",
                "logo_alignment": "left"
            })
        );
    }

    #[tokio::test]
    async fn callback_delivers_to_receiver() {
        let (callback, mut receiver) = credential_channel();

        assert!(callback.deliver("a.b.c"));
        let response = receiver.recv().await.expect("credential");
        assert_eq!(response.credential, "a.b.c");
    }

    #[tokio::test]
    async fn dropping_callbacks_closes_receiver() {
        let (callback, mut receiver) = credential_channel();
        let second = callback.clone();

        drop(callback);
        assert!(second.deliver("x.y.z"));
        drop(second);

        assert!(receiver.recv().await.is_some());
        assert!(receiver.recv().await.is_none());
    }

    #[test]
    fn deliver_fails_once_gate_is_gone() {
        let (callback, receiver) = credential_channel();
        drop(receiver);
        assert!(callback.is_closed());
        assert!(!callback.deliver("a.b.c"));
    }
}
