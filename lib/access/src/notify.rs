//! Sign-in state change notifications.
//!
//! Every sign-in, sign-out and denial is broadcast as an [`AuthChange`] to
//! all subscribers, e.g. a listener that forwards the user's identity into
//! the conference configuration.

use chrono::{DateTime, Utc};
use meetgate_identity::IdentityClaims;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Notifications a subscriber may fall behind by before it starts missing them.
const CHANNEL_CAPACITY: usize = 64;

/// A change in sign-in state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthChange {
    /// Whether a user is signed in after the change.
    pub authenticated: bool,
    /// The signed-in user's claims, if any.
    pub claims: Option<IdentityClaims>,
    /// When the change happened.
    pub at: DateTime<Utc>,
}

impl AuthChange {
    /// Creates a notification for a successful sign-in.
    #[must_use]
    pub fn signed_in(claims: IdentityClaims) -> Self {
        Self {
            authenticated: true,
            claims: Some(claims),
            at: Utc::now(),
        }
    }

    /// Creates a notification for a cleared session.
    #[must_use]
    pub fn signed_out() -> Self {
        Self {
            authenticated: false,
            claims: None,
            at: Utc::now(),
        }
    }
}

/// Broadcasts [`AuthChange`] notifications to subscribers.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<AuthChange>,
}

impl Notifier {
    /// Creates a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Returns a receiver for every notification published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthChange> {
        self.sender.subscribe()
    }

    /// Publishes a notification and returns how many subscribers received it.
    pub fn publish(&self, change: AuthChange) -> usize {
        match self.sender.send(change) {
            Ok(receivers) => receivers,
            Err(_) => {
                debug!("no subscribers for auth change");
                0
            }
        }
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_in_carries_claims() {
        let claims = IdentityClaims::new("123".to_string());
        let change = AuthChange::signed_in(claims.clone());
        assert!(change.authenticated);
        assert_eq!(change.claims, Some(claims));
    }

    #[test]
    fn signed_out_is_empty() {
        let change = AuthChange::signed_out();
        assert!(!change.authenticated);
        assert!(change.claims.is_none());
    }

    #[test]
    fn publish_without_subscribers_is_not_an_error() {
        let notifier = Notifier::new();
        assert_eq!(notifier.subscriber_count(), 0);
        assert_eq!(notifier.publish(AuthChange::signed_out()), 0);
    }

    #[tokio::test]
    async fn every_subscriber_receives_each_change() {
        let notifier = Notifier::new();
        let mut first = notifier.subscribe();
        let mut second = notifier.subscribe();

        let delivered = notifier.publish(AuthChange::signed_out());

        assert_eq!(delivered, 2);
        assert!(!first.recv().await.expect("first").authenticated);
        assert!(!second.recv().await.expect("second").authenticated);
    }

    #[test]
    fn serializes_with_claim_names() {
        let claims = IdentityClaims::new("123".to_string())
            .with_email(Some("a@acme.com".to_string()));
        let json = serde_json::to_value(AuthChange::signed_in(claims)).expect("serialize");

        assert_eq!(json["authenticated"], true);
        assert_eq!(json["claims"]["email"], "a@acme.com");
        assert!(json["at"].is_string());
    }
}
