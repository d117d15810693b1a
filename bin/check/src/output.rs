//! JSON-lines rendering of sign-in state changes.

use meetgate_access::AuthChange;
use std::io::Write;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

use crate::error::OutputError;

/// Serializes one notification as a single JSON document.
///
/// # Errors
///
/// Returns an error if the notification cannot be serialized.
pub fn render_change(change: &AuthChange, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(change)
    } else {
        serde_json::to_string(change)
    }
}

/// Writes notifications to `out` until the gate is dropped.
///
/// Returns the number of notifications written.
///
/// # Errors
///
/// Returns `OutputError::Lagged` if notifications were lost before they
/// could be written, or `OutputError::Write` if `out` fails.
pub async fn forward_changes<W: Write>(
    mut changes: broadcast::Receiver<AuthChange>,
    pretty: bool,
    mut out: W,
) -> Result<usize, OutputError> {
    let mut written = 0;
    loop {
        let change = match changes.recv().await {
            Ok(change) => change,
            Err(RecvError::Lagged(skipped)) => return Err(OutputError::Lagged { skipped }),
            Err(RecvError::Closed) => break,
        };
        let line = match render_change(&change, pretty) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "failed to serialize notification");
                continue;
            }
        };
        writeln!(out, "{line}").map_err(|e| OutputError::Write {
            details: e.to_string(),
        })?;
        written += 1;
    }
    Ok(written)
}
