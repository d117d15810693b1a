//! Identity provider that replays recorded tokens.
//!
//! Stands in for the provider's browser library: every token is delivered
//! through the gate's callback during initialization, after which the
//! callback is dropped so the gate's event loop can finish.

use async_trait::async_trait;
use meetgate_access::{
    ButtonOptions, CredentialCallback, IdentityProvider, ProviderError, ProviderSettings,
};
use std::io::{self, BufRead};
use tracing::{debug, info};

/// Replays a fixed list of tokens as sign-ins.
#[derive(Debug, Clone, Default)]
pub struct ReplayProvider {
    tokens: Vec<String>,
}

impl ReplayProvider {
    /// Creates a provider that will deliver `tokens` in order.
    #[must_use]
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Returns the tokens this provider replays.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

#[async_trait]
impl IdentityProvider for ReplayProvider {
    async fn initialize(
        &self,
        settings: &ProviderSettings,
        callback: CredentialCallback,
    ) -> Result<(), ProviderError> {
        info!(
            client_id = %settings.client_id,
            tokens = self.tokens.len(),
            "replaying recorded sign-ins"
        );
        for token in &self.tokens {
            if !callback.deliver(token.clone()) {
                return Err(ProviderError::InitializeFailed {
                    reason: "gate stopped listening".to_string(),
                });
            }
        }
        Ok(())
    }

    fn prompt(&self) {
        debug!("one-tap prompt requested");
    }

    fn render_button(&self, target: &str, options: &ButtonOptions) -> Result<(), ProviderError> {
        debug!(element = target, ?options, "sign-in button requested");
        Ok(())
    }

    fn disable_auto_select(&self) {
        debug!("auto-select disabled");
    }
}

/// Reads one token per line, skipping blank lines and `#` comments.
///
/// # Errors
///
/// Returns an error if the reader fails.
pub fn read_tokens(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut tokens = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        tokens.push(line.to_string());
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meetgate_access::{AccessGate, GateConfig, GateState};

    use crate::console::ConsoleSurface;

    #[test]
    fn read_tokens_skips_blanks_and_comments() {
        let input = "# recorded 2026-10-01\n\n  aaa.bbb.ccc  \nddd.eee.fff\n";

        let tokens = read_tokens(input.as_bytes()).expect("read");

        assert_eq!(tokens, vec!["aaa.bbb.ccc", "ddd.eee.fff"]);
    }

    #[tokio::test]
    async fn replayed_tokens_reach_the_gate() {
        let provider = ReplayProvider::new(vec!["one.two.three".to_string()]);
        let mut gate = AccessGate::new(
            GateConfig::new("client".to_string()),
            provider,
            ConsoleSurface::default(),
        );

        gate.initialize().await.expect("initialize");

        assert_eq!(gate.state(), GateState::Ready);
        let response = gate.next_credential().await.expect("credential");
        assert_eq!(response.credential, "one.two.three");
        assert!(gate.next_credential().await.is_none());
    }
}
