//! Error types for the harness.

use std::fmt;

/// Failures while writing notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputError {
    /// The output fell behind the gate and notifications were lost.
    Lagged { skipped: u64 },
    /// The output could not be written.
    Write { details: String },
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lagged { skipped } => {
                write!(f, "output fell behind, {skipped} notifications lost")
            }
            Self::Write { details } => write!(f, "failed to write notification: {details}"),
        }
    }
}

impl std::error::Error for OutputError {}

/// Failures of a replay run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// The identity provider could not be set up.
    ProviderUnavailable { reason: String },
    /// The gate's event loop stopped with an error.
    Gate { details: String },
    /// Notifications could not be reported in full.
    Output(OutputError),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProviderUnavailable { reason } => {
                write!(f, "identity provider unavailable: {reason}")
            }
            Self::Gate { details } => write!(f, "gate event loop failed: {details}"),
            Self::Output(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CheckError {}

impl From<OutputError> for CheckError {
    fn from(e: OutputError) -> Self {
        Self::Output(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lagged_reports_lost_count() {
        let err = CheckError::from(OutputError::Lagged { skipped: 3 });
        assert_eq!(err.to_string(), "output fell behind, 3 notifications lost");
    }

    #[test]
    fn provider_unavailable_display() {
        let err = CheckError::ProviderUnavailable {
            reason: "offline".to_string(),
        };
        assert_eq!(err.to_string(), "identity provider unavailable: offline");
    }
}
