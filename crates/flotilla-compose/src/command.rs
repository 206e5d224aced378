//! Compose argument construction.
//!
//! A `ComposeCommand` is pure data: global arguments, shared modifier
//! arguments, and the subcommand with its own flags. Building never fails;
//! invalid values are left for the backend's own argument parser to reject.

use flotilla_core::{DeployOptions, Options};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeCommand {
    /// Arguments understood by the program itself, ahead of any subcommand.
    /// A host override always sits at the front; some backends parse global
    /// arguments positionally and reject it anywhere else.
    global_args: Vec<String>,
    /// Shared modifiers: `-f` pairs, project name, env file.
    args: Vec<String>,
    /// The subcommand and its flags, e.g. `up -d`.
    command: Vec<String>,
}

fn file_args(file_paths: &[String]) -> Vec<String> {
    let mut args = Vec::with_capacity(file_paths.len() * 2);
    for path in file_paths {
        args.push("-f".to_owned());
        args.push(path.trim().to_owned());
    }
    args
}

impl ComposeCommand {
    fn new(command: &[&str], file_paths: &[String]) -> Self {
        Self {
            global_args: Vec::new(),
            args: file_args(file_paths),
            command: command.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    /// `up`: start detached, or run attached and stop everything on the
    /// first container exit when the abort flag is set. Force-recreate is an
    /// independent modifier on either mode.
    pub fn up(file_paths: &[String], options: &DeployOptions) -> Self {
        let mut cmd = if options.abort_on_container_exit {
            Self::new(&["up", "--abort-on-container-exit"], file_paths)
        } else {
            Self::new(&["up", "-d"], file_paths)
        };
        if options.force_recreate {
            cmd.command.push("--force-recreate".to_owned());
        }
        cmd
    }

    /// `down`: always removes orphan containers along with the named services.
    pub fn down(file_paths: &[String]) -> Self {
        Self::new(&["down", "--remove-orphans"], file_paths)
    }

    pub fn pull(file_paths: &[String]) -> Self {
        Self::new(&["pull"], file_paths)
    }

    /// `ps`: machine-readable listing including stopped containers. Project
    /// scoping comes from `apply`; no file paths are involved.
    pub fn ps() -> Self {
        Self::new(&["ps", "-a", "--format", "json"], &[])
    }

    /// Apply the optional modifiers from `options`, each only when set, in a
    /// fixed order: project name, env file, host.
    pub fn apply(&mut self, options: &Options) {
        if let Some(name) = options.project_name.as_deref() {
            if !name.is_empty() {
                self.with_project_name(name);
            }
        }
        if let Some(path) = options.env_file_path.as_deref() {
            if !path.as_os_str().is_empty() {
                self.with_env_file(&path.to_string_lossy());
            }
        }
        if let Some(host) = options.host.as_deref() {
            if !host.is_empty() {
                self.with_host(host);
            }
        }
    }

    pub fn with_project_name(&mut self, project_name: &str) {
        self.args.push("-p".to_owned());
        self.args.push(project_name.to_owned());
    }

    pub fn with_env_file(&mut self, env_file_path: &str) {
        self.args.push("--env-file".to_owned());
        self.args.push(env_file_path.to_owned());
    }

    /// The host override goes at the FRONT of the global arguments, before
    /// anything already there. This is the single place that ordering rule
    /// lives; future backends with their own ordering quirks declare them
    /// here rather than in the builders.
    pub fn with_host(&mut self, host: &str) {
        self.global_args
            .splice(0..0, ["-H".to_owned(), host.to_owned()]);
    }

    pub fn global_args(&self) -> &[String] {
        &self.global_args
    }

    /// The modifier and subcommand arguments, without the global ones.
    /// Backends that wrap the subcommand (engine plugin) insert their prefix
    /// between the two halves.
    pub fn local_args(&self) -> Vec<String> {
        let mut args = self.args.clone();
        args.extend(self.command.iter().cloned());
        args
    }

    /// The full argument vector: global arguments, then everything else.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = self.global_args.clone();
        args.extend(self.local_args());
        args
    }
}
