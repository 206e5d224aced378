//! Parsing and reduction of per-container state into one stack status.

use flotilla_core::{StackError, StackStatus, StatusReport};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Publisher {
    #[serde(rename = "URL")]
    pub url: String,
    pub target_port: u16,
    pub published_port: u16,
    pub protocol: String,
}

/// One row of the backend's machine-readable container listing
/// (`ps -a --format json`). Reconstructed fresh on every status query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Service {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub image: String,
    pub command: String,
    pub project: String,
    pub service: String,
    pub created: i64,
    pub state: String,
    pub status: String,
    pub health: String,
    pub exit_code: i32,
    pub publishers: Vec<Publisher>,
}

/// Parse the listing output. Older engine CLIs emit one JSON array, newer
/// ones emit one record per line; both are accepted. Empty output is an
/// empty listing, not a parse failure.
pub fn parse_services(output: &[u8]) -> Result<Vec<Service>, StackError> {
    let text = std::str::from_utf8(output)
        .map_err(|e| StackError::OutputParseFailed(format!("output is not UTF-8: {e}")))?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| StackError::OutputParseFailed(e.to_string()));
    }
    trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| StackError::OutputParseFailed(e.to_string()))
        })
        .collect()
}

// Container state is one of "created", "running", "paused", "restarting",
// "removing", "exited", or "dead".
fn service_status(service: &Service) -> (StackStatus, String) {
    match service.state.as_str() {
        "created" | "restarting" | "paused" => (StackStatus::Starting, String::new()),
        "running" => (StackStatus::Running, String::new()),
        "removing" => (StackStatus::Removing, String::new()),
        "exited" | "dead" => {
            if service.exit_code != 0 {
                (
                    StackStatus::Error,
                    format!(
                        "service {} exited with code {}",
                        service.name, service.exit_code
                    ),
                )
            } else {
                (StackStatus::Removed, String::new())
            }
        }
        _ => (StackStatus::Unknown, String::new()),
    }
}

/// Reduce a full listing into one stack-level status.
///
/// Transitional and error conditions dominate settled ones, and the stack
/// only reports fully Running/Stopped/Removed when every member agrees.
/// The message comes from the first service in error.
pub fn aggregate(services: &[Service]) -> StatusReport {
    let mut counts: HashMap<StackStatus, usize> = HashMap::new();
    let mut error_message = String::new();

    for service in services {
        let (status, message) = service_status(service);
        if error_message.is_empty() && !message.is_empty() {
            error_message = message;
        }
        *counts.entry(status).or_insert(0) += 1;
    }

    reduce(&counts, services.len(), error_message)
}

fn reduce(
    counts: &HashMap<StackStatus, usize>,
    total: usize,
    error_message: String,
) -> StatusReport {
    let count = |status: StackStatus| counts.get(&status).copied().unwrap_or(0);

    if total == 0 {
        return StatusReport::new(StackStatus::Removed, "");
    }
    if count(StackStatus::Error) > 0 {
        return StatusReport::new(StackStatus::Error, error_message);
    }
    if count(StackStatus::Starting) > 0 {
        return StatusReport::new(StackStatus::Starting, "");
    }
    if count(StackStatus::Removing) > 0 {
        return StatusReport::new(StackStatus::Removing, "");
    }
    if count(StackStatus::Running) == total {
        return StatusReport::new(StackStatus::Running, "");
    }
    if count(StackStatus::Stopped) == total {
        return StatusReport::new(StackStatus::Stopped, "");
    }
    if count(StackStatus::Removed) == total {
        return StatusReport::new(StackStatus::Removed, "");
    }
    StatusReport::new(StackStatus::Unknown, "")
}
