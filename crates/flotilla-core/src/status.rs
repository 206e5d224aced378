use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate condition of all containers in a stack at a point in time.
/// Derived on every query, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackStatus {
    Starting,
    Running,
    Removing,
    Stopped,
    Removed,
    Error,
    Unknown,
}

impl fmt::Display for StackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Removing => "removing",
            Self::Stopped => "stopped",
            Self::Removed => "removed",
            Self::Error => "error",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Result of a status query: the reduced stack status plus an optional
/// diagnostic message (non-empty only for `Error`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: StackStatus,
    #[serde(default)]
    pub message: String,
}

impl StatusReport {
    pub fn new(status: StackStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_matches_serialization() {
        for status in [
            StackStatus::Starting,
            StackStatus::Running,
            StackStatus::Removing,
            StackStatus::Stopped,
            StackStatus::Removed,
            StackStatus::Error,
            StackStatus::Unknown,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn report_round_trips() {
        let report = StatusReport::new(StackStatus::Error, "service web exited with code 3");
        let json = serde_json::to_string(&report).unwrap();
        let back: StatusReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
