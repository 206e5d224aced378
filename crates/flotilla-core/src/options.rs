use std::path::PathBuf;

/// Options shared by every stack operation.
///
/// Every field is optional; the stack file paths are passed separately and
/// must be non-empty. Later files override earlier ones, so path order is
/// meaningful and preserved.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Working directory for the spawned backend process.
    pub working_dir: Option<PathBuf>,
    /// Engine endpoint to target. `None` means the local default.
    pub host: Option<String>,
    /// Stack namespace; must be unique among concurrently deployed stacks
    /// on one engine.
    pub project_name: Option<String>,
    /// Path to a .env file.
    pub env_file_path: Option<PathBuf>,
    /// Extra environment variables for the backend process.
    pub env: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    pub options: Options,
    /// Destroy and recreate containers even if their definition is unchanged.
    pub force_recreate: bool,
    /// Treat any container's exit as a stop signal for the whole deployment.
    /// Useful for run-to-completion workloads; mutually exclusive with
    /// detached mode.
    pub abort_on_container_exit: bool,
}
