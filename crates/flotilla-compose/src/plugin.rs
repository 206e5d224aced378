//! The compose plugin backend, routed through the container engine CLI.
//!
//! The plugin cannot be invoked directly: the engine program runs with a
//! configuration-directory override ahead of the `compose` subcommand, so
//! it loads the plugin registered under `<config>/cli-plugins`. Host
//! overrides are engine-level global arguments and stay in front of the
//! override.

use crate::command::ComposeCommand;
use crate::exec;
use crate::probe::program_path;
use crate::resolver::{ENGINE_BINARY, ENGINE_CONFIG_ENV};
use crate::status::{aggregate, parse_services};
use flotilla_core::{
    CancelToken, DeployOptions, Deployer, Options, StackError, StatusReport,
};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug)]
pub struct ComposePluginBackend {
    install_root: PathBuf,
    config_path: PathBuf,
}

impl ComposePluginBackend {
    pub fn new(install_root: impl Into<PathBuf>, config_path: impl Into<PathBuf>) -> Self {
        Self {
            install_root: install_root.into(),
            config_path: config_path.into(),
        }
    }

    fn engine_args(&self, command: &ComposeCommand) -> Vec<String> {
        let mut args = command.global_args().to_vec();
        args.push("--config".to_owned());
        args.push(self.config_path.to_string_lossy().into_owned());
        args.push("compose".to_owned());
        args.extend(command.local_args());
        args
    }

    fn run(
        &self,
        token: &CancelToken,
        mut command: ComposeCommand,
        options: &Options,
    ) -> Result<Vec<u8>, StackError> {
        command.apply(options);
        let program = program_path(&self.install_root, ENGINE_BINARY);

        let mut env = options.env.clone();
        env.push((
            ENGINE_CONFIG_ENV.to_owned(),
            self.config_path.to_string_lossy().into_owned(),
        ));

        exec::run(
            token,
            &program,
            &self.engine_args(&command),
            options.working_dir.as_deref(),
            &env,
        )
    }
}

impl Deployer for ComposePluginBackend {
    fn name(&self) -> &str {
        "compose-plugin"
    }

    fn deploy(
        &self,
        token: &CancelToken,
        file_paths: &[String],
        options: &DeployOptions,
    ) -> Result<(), StackError> {
        let output = self.run(
            token,
            ComposeCommand::up(file_paths, options),
            &options.options,
        )?;
        if !output.is_empty() {
            debug!(
                "finished deploying: {}",
                String::from_utf8_lossy(&output).trim()
            );
        }
        Ok(())
    }

    fn remove(
        &self,
        token: &CancelToken,
        file_paths: &[String],
        options: &Options,
    ) -> Result<(), StackError> {
        let output = self.run(token, ComposeCommand::down(file_paths), options)?;
        if !output.is_empty() {
            debug!(
                "finished removing: {}",
                String::from_utf8_lossy(&output).trim()
            );
        }
        Ok(())
    }

    fn pull(
        &self,
        token: &CancelToken,
        file_paths: &[String],
        options: &Options,
    ) -> Result<(), StackError> {
        let output = self.run(token, ComposeCommand::pull(file_paths), options)?;
        if !output.is_empty() {
            debug!(
                "finished pulling: {}",
                String::from_utf8_lossy(&output).trim()
            );
        }
        Ok(())
    }

    fn status(&self, token: &CancelToken, project_name: &str) -> Result<StatusReport, StackError> {
        let options = Options {
            project_name: Some(project_name.to_owned()),
            ..Default::default()
        };
        let output = self.run(token, ComposeCommand::ps(), &options)?;
        let services = parse_services(&output)?;
        Ok(aggregate(&services))
    }
}
