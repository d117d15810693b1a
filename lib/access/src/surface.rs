//! UI surfaces the gate toggles.
//!
//! The host page has two mutually exclusive surfaces: the gated conference
//! UI and the sign-in UI. Transient messages are shown in a banner that
//! dismisses itself after [`BANNER_DURATION`].

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// How long a banner stays visible.
pub const BANNER_DURATION: Duration = Duration::from_secs(5);

/// Which of the two surfaces is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// The protected conference UI.
    Gated,
    /// The sign-in UI.
    SignIn,
}

/// Why a banner is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    /// A credential could not be decoded.
    AuthenticationFailed,
    /// The user's email domain is not allowed.
    AccessDenied,
}

/// A transient, self-dismissing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    kind: BannerKind,
    message: String,
    shown_at: Instant,
}

impl Banner {
    /// Creates a banner shown at `shown_at`.
    #[must_use]
    pub fn new(kind: BannerKind, message: String, shown_at: Instant) -> Self {
        Self {
            kind,
            message,
            shown_at,
        }
    }

    /// Returns why the banner is shown.
    #[must_use]
    pub fn kind(&self) -> BannerKind {
        self.kind
    }

    /// Returns the text shown to the user.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when the banner appeared.
    #[must_use]
    pub fn shown_at(&self) -> Instant {
        self.shown_at
    }

    /// Returns when the banner should disappear.
    #[must_use]
    pub fn expires_at(&self) -> Instant {
        self.shown_at + BANNER_DURATION
    }

    /// Returns true if the banner should no longer be visible at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}

/// Trait for the host UI the gate controls.
///
/// The gate calls these in an order that never leaves both surfaces
/// visible: a surface is hidden before the other one is shown.
pub trait UiSurface: Send {
    /// Shows the protected conference UI.
    fn show_gated_ui(&mut self);

    /// Hides the protected conference UI.
    fn hide_gated_ui(&mut self);

    /// Shows the sign-in UI.
    fn show_auth_ui(&mut self);

    /// Hides the sign-in UI.
    fn hide_auth_ui(&mut self);

    /// Shows a banner, replacing any banner already visible.
    fn show_banner(&mut self, banner: &Banner);

    /// Hides the banner.
    fn hide_banner(&mut self);

    /// Passes the signed-in user's name on to the conference UI.
    fn set_display_name(&mut self, name: &str);
}
