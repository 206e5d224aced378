//! The standalone `docker-compose` binary backend.

use crate::command::ComposeCommand;
use crate::exec;
use crate::probe::program_path;
use crate::resolver::{COMPOSE_BINARY, ENGINE_CONFIG_ENV};
use crate::status::{aggregate, parse_services};
use flotilla_core::{
    CancelToken, DeployOptions, Deployer, Options, StackError, StatusReport,
};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug)]
pub struct ComposeBinaryBackend {
    install_root: PathBuf,
    config_path: PathBuf,
}

impl ComposeBinaryBackend {
    pub fn new(install_root: impl Into<PathBuf>, config_path: impl Into<PathBuf>) -> Self {
        Self {
            install_root: install_root.into(),
            config_path: config_path.into(),
        }
    }

    fn run(
        &self,
        token: &CancelToken,
        mut command: ComposeCommand,
        options: &Options,
    ) -> Result<Vec<u8>, StackError> {
        command.apply(options);
        let program = program_path(&self.install_root, COMPOSE_BINARY);

        let mut env = options.env.clone();
        if !self.config_path.as_os_str().is_empty() {
            env.push((
                ENGINE_CONFIG_ENV.to_owned(),
                self.config_path.to_string_lossy().into_owned(),
            ));
        }

        exec::run(
            token,
            &program,
            &command.to_args(),
            options.working_dir.as_deref(),
            &env,
        )
    }
}

impl Deployer for ComposeBinaryBackend {
    fn name(&self) -> &str {
        "compose-binary"
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
