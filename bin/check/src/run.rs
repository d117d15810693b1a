//! One replay of recorded tokens through a fresh gate.

use meetgate_access::{
    AccessGate, DriveSummary, GateConfig, GateState, LaunchOutcome, drive, launch,
};
use std::io::Write;
use tokio::sync::mpsc;
use tracing::info;

use crate::console::ConsoleSurface;
use crate::error::CheckError;
use crate::output::forward_changes;
use crate::replay::ReplayProvider;

/// What a replay run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    /// Counts from the gate's event loop.
    pub summary: DriveSummary,
    /// Gate state once the loop finished.
    pub final_state: GateState,
    /// Notifications written to the output.
    pub written: usize,
}

/// Replays `tokens` through a new gate and writes every notification to
/// `out` as a JSON line.
///
/// # Errors
///
/// Returns an error if the provider cannot be set up, the event loop fails,
/// or any notification cannot be written.
pub async fn replay<W: Write>(
    config: GateConfig,
    tokens: Vec<String>,
    pretty: bool,
    out: W,
) -> Result<ReplayReport, CheckError> {
    let mut gate = AccessGate::new(
        config,
        ReplayProvider::new(tokens),
        ConsoleSurface::default(),
    );
    let changes = gate.subscribe();

    if let LaunchOutcome::Fallback { reason } = launch(&mut gate).await {
        return Err(CheckError::ProviderUnavailable { reason });
    }

    // No host commands: the loop ends once every token is replayed.
    let (commands_tx, mut commands) = mpsc::channel(1);
    drop(commands_tx);

    // The gate is dropped when the loop finishes, which ends the output.
    let driving = async move {
        let result = drive(&mut gate, &mut commands).await;
        (result, gate.state())
    };
    let printing = forward_changes(changes, pretty, out);
    let ((result, final_state), forwarded) = tokio::join!(driving, printing);

    let summary = result.map_err(|e| CheckError::Gate {
        details: e.to_string(),
    })?;
    let written = forwarded?;
    info!(
        credentials = summary.credentials,
        authenticated = summary.authenticated,
        rejected = summary.rejected,
        written,
        final_state = %final_state,
        "replay finished"
    );

    Ok(ReplayReport {
        summary,
        final_state,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn token(payload: &str) -> String {
        format!("e30.{}.sig", URL_SAFE_NO_PAD.encode(payload))
    }

    fn gate_config(allowed: &[&str]) -> GateConfig {
        GateConfig::builder("client".to_string())
            .allowed_domains(allowed.iter().map(|d| (*d).to_string()).collect())
            .build()
    }

    #[tokio::test]
    async fn writes_a_line_for_every_sign_in() {
        let tokens = (0..200)
            .map(|i| format!(r#"{{"sub":"{i}","email":"u{i}@acme.com"}}"#))
            .map(|payload| token(&payload))
            .collect();
        let mut out = Vec::new();

        let report = replay(gate_config(&[]), tokens, false, &mut out)
            .await
            .expect("replay");

        assert_eq!(report.summary.authenticated, 200);
        assert_eq!(report.written, 200);
        assert_eq!(report.final_state, GateState::Authenticated);
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.lines().count(), 200);
    }

    #[tokio::test(start_paused = true)]
    async fn denied_sign_ins_are_reported_as_sign_outs() {
        let tokens = vec![
            token(r#"{"sub":"1","email":"a@acme.com"}"#),
            token(r#"{"sub":"2","email":"m@evil.test"}"#),
        ];
        let mut out = Vec::new();

        let report = replay(gate_config(&["acme.com"]), tokens, false, &mut out)
            .await
            .expect("replay");

        assert_eq!(report.summary.authenticated, 1);
        assert_eq!(report.summary.rejected, 1);
        assert_eq!(report.summary.banners_dismissed, 1);
        assert_eq!(report.final_state, GateState::Ready);
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#""authenticated":true"#));
        assert!(lines[1].contains(r#""authenticated":false"#));
    }

    #[tokio::test]
    async fn empty_replay_writes_nothing() {
        let mut out = Vec::new();

        let report = replay(gate_config(&[]), Vec::new(), false, &mut out)
            .await
            .expect("replay");

        assert_eq!(report.written, 0);
        assert_eq!(report.final_state, GateState::Ready);
        assert!(out.is_empty());
    }
}
