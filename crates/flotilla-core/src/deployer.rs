use crate::{CancelToken, DeployOptions, Options, StackError, StatusReport};

/// The unified deployment contract implemented by every compose backend.
///
/// A concrete backend is bound once at resolution time and stays fixed for
/// the lifetime of the handle. Operations block until the backend process
/// exits; cancellation via the token kills the process and surfaces
/// `StackError::Cancelled`. This layer never retries and imposes no
/// timeouts — both are the caller's policy. Concurrent mutating operations
/// on the same project name race at the backend; serializing them is the
/// caller's responsibility.
pub trait Deployer: std::fmt::Debug + Send + Sync {
    /// Backend identifier, e.g. "compose-binary" or "compose-plugin".
    fn name(&self) -> &str;

    /// Create and start the stack's containers (`up`). Success is a zero
    /// exit code; stdout on success is informational only.
    fn deploy(
        &self,
        token: &CancelToken,
        file_paths: &[String],
        options: &DeployOptions,
    ) -> Result<(), StackError>;

    /// Stop and remove the stack's containers, including orphans left over
    /// from previous file sets (`down --remove-orphans`).
    fn remove(
        &self,
        token: &CancelToken,
        file_paths: &[String],
        options: &Options,
    ) -> Result<(), StackError>;

    /// Pull the images referenced by the stack without starting containers.
    /// Safe to retry; unchanged images are no-ops at the backend.
    fn pull(
        &self,
        token: &CancelToken,
        file_paths: &[String],
        options: &Options,
    ) -> Result<(), StackError>;

    /// Query the per-container state of the named project and reduce it to
    /// one stack-level status. A query that executes but names zero
    /// containers reports `Removed`.
    fn status(&self, token: &CancelToken, project_name: &str) -> Result<StatusReport, StackError>;
}
