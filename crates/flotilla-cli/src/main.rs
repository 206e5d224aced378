mod commands;

use clap::{Args, Parser, Subcommand};
use commands::{EXIT_FAILURE, EXIT_NO_BACKEND};
use flotilla_core::{CancelToken, DeployOptions, Options, StackError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "flotilla",
    version,
    about = "Deploy compose stacks through whichever engine backend is installed"
)]
struct Cli {
    /// Directory holding the backend binaries (empty = search PATH).
    #[arg(long, default_value = "", global = true)]
    install_root: String,

    /// Engine configuration directory (empty = engine default).
    #[arg(long, default_value = "", global = true)]
    config: String,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Stack selection and options shared by deploy, remove, and pull.
#[derive(Debug, Args)]
struct StackArgs {
    /// Stack file; repeatable, merged left to right.
    #[arg(short = 'f', long = "file", required = true)]
    files: Vec<String>,

    /// Project name scoping the stack on the engine.
    #[arg(short, long)]
    project: Option<String>,

    /// Engine endpoint to target instead of the local default.
    #[arg(long)]
    host: Option<String>,

    /// Working directory for the backend process.
    #[arg(long)]
    working_dir: Option<PathBuf>,

    /// Path to a .env file.
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Extra KEY=VALUE environment variable for the backend process.
    #[arg(long = "env", value_parser = parse_env_pair)]
    env: Vec<(String, String)>,
}

impl StackArgs {
    fn into_parts(self) -> (Vec<String>, Options) {
        let options = Options {
            working_dir: self.working_dir,
            host: self.host,
            project_name: self.project,
            env_file_path: self.env_file,
            env: self.env,
        };
        (self.files, options)
    }
}

fn parse_env_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create and start a stack's containers.
    Deploy {
        #[command(flatten)]
        stack: StackArgs,
        /// Recreate containers even if their definition is unchanged.
        #[arg(long, default_value_t = false)]
        force_recreate: bool,
        /// Run attached and stop the whole stack when any container exits.
        #[arg(long, default_value_t = false)]
        abort_on_container_exit: bool,
    },
    /// Stop and remove a stack's containers, orphans included.
    Remove {
        #[command(flatten)]
        stack: StackArgs,
    },
    /// Pull the stack's images without starting containers.
    Pull {
        #[command(flatten)]
        stack: StackArgs,
    },
    /// Show the aggregate status of a project's containers.
    Status {
        /// Project name to query.
        project: String,
    },
}

fn install_signal_handler(token: CancelToken) {
    let _ = ctrlc::set_handler(move || {
        if token.is_cancelled() {
            std::process::exit(130);
        }
        token.cancel();
        eprintln!("\ncancellation requested, stopping the backend process...");
    });
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("FLOTILLA_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .init();

    let token = CancelToken::new();
    install_signal_handler(token.clone());

    match run(cli, &token) {
        Ok(code) => ExitCode::from(code),
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(cli: Cli, token: &CancelToken) -> Result<u8, String> {
    let deployer = match flotilla_compose::resolve(
        Path::new(&cli.install_root),
        Path::new(&cli.config),
    ) {
        Ok(deployer) => deployer,
        Err(StackError::BackendUnavailable) => {
            eprintln!("error: {}", StackError::BackendUnavailable);
            return Ok(EXIT_NO_BACKEND);
        }
        Err(err) => return Err(err.to_string()),
    };
    tracing::debug!("resolved backend: {}", deployer.name());

    match cli.command {
        Commands::Deploy {
            stack,
            force_recreate,
            abort_on_container_exit,
        } => {
            let (files, options) = stack.into_parts();
            let deploy_options = DeployOptions {
                options,
                force_recreate,
                abort_on_container_exit,
            };
            commands::deploy::run(deployer.as_ref(), token, &files, &deploy_options)
        }
        Commands::Remove { stack } => {
            let (files, options) = stack.into_parts();
            commands::remove::run(deployer.as_ref(), token, &files, &options)
        }
        Commands::Pull { stack } => {
            let (files, options) = stack.into_parts();
            commands::pull::run(deployer.as_ref(), token, &files, &options)
        }
        Commands::Status { project } => {
            commands::status::run(deployer.as_ref(), token, &project, cli.json)
        }
    }
}
