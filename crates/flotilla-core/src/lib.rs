//! Contract types for Flotilla stack deployment.
//!
//! This crate defines the pieces every backend and caller shares: the
//! `Deployer` trait (deploy, remove, pull, status), the option bundles passed
//! to each operation, the aggregate `StackStatus` model, cooperative
//! cancellation via `CancelToken`, and the `StackError` taxonomy. The actual
//! backends live in `flotilla-compose`.

pub mod cancel;
pub mod deployer;
pub mod options;
pub mod status;

pub use cancel::CancelToken;
pub use deployer::Deployer;
pub use options::{DeployOptions, Options};
pub use status::{StackStatus, StatusReport};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StackError {
    #[error("no compose backend is available on this system")]
    BackendUnavailable,
    #[error("compose plugin installation failed: {0}")]
    PluginInstallFailed(String),
    #[error("compose execution failed: {0}")]
    ExecutionFailed(String),
    #[error("failed to parse compose status output: {0}")]
    OutputParseFailed(String),
    #[error("operation cancelled")]
    Cancelled,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_failed_carries_diagnostic_text() {
        let err = StackError::ExecutionFailed("no such image: alpine:0.0".to_owned());
        assert!(err.to_string().contains("no such image"));
    }

    #[test]
    fn parse_failure_is_distinct_from_execution_failure() {
        let parse = StackError::OutputParseFailed("expected value".to_owned());
        let exec = StackError::ExecutionFailed("boom".to_owned());
        assert!(matches!(parse, StackError::OutputParseFailed(_)));
        assert!(!matches!(exec, StackError::OutputParseFailed(_)));
    }
}
