//! Backend resolution: probe the host and bind one compose backend.

use crate::probe::{is_program_present, move_file, program_path};
use crate::{ComposeBinaryBackend, ComposePluginBackend};
use flotilla_core::{Deployer, StackError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Standalone orchestration binary, the preferred backend.
pub const COMPOSE_BINARY: &str = "docker-compose";
/// The container engine CLI through which the plugin backend routes.
pub const ENGINE_BINARY: &str = "docker";
/// Environment variable pointing the engine at a configuration directory.
pub const ENGINE_CONFIG_ENV: &str = "DOCKER_CONFIG";

/// Plugin binary shipped alongside the install root, waiting to be
/// registered in the engine's plugin directory.
const BUNDLED_PLUGIN: &str = "docker-compose.plugin";

/// Probe the host in priority order and bind a backend: the standalone
/// binary first, then the engine CLI with a compose plugin. The only
/// filesystem mutation is registering a bundled plugin, and repeating the
/// resolution is safe once that has happened. No usable backend is fatal:
/// there is no further fallback behind `BackendUnavailable`.
pub fn resolve(install_root: &Path, config_path: &Path) -> Result<Box<dyn Deployer>, StackError> {
    if is_program_present(&program_path(install_root, COMPOSE_BINARY)) {
        debug!("using the standalone {COMPOSE_BINARY} binary");
        return Ok(Box::new(ComposeBinaryBackend::new(
            install_root,
            config_path,
        )));
    }

    if is_program_present(&program_path(install_root, ENGINE_BINARY)) {
        info!("{COMPOSE_BINARY} binary is missing, falling back to the engine compose plugin");
        let config_path = effective_config_path(config_path)?;
        ensure_plugin_registered(install_root, &config_path)?;
        return Ok(Box::new(ComposePluginBackend::new(
            install_root,
            config_path,
        )));
    }

    Err(StackError::BackendUnavailable)
}

fn effective_config_path(config_path: &Path) -> Result<PathBuf, StackError> {
    if !config_path.as_os_str().is_empty() {
        return Ok(config_path.to_path_buf());
    }
    let home = std::env::var_os("HOME").ok_or_else(|| {
        StackError::PluginInstallFailed(
            "cannot locate the user home directory for the engine config path".to_owned(),
        )
    })?;
    Ok(PathBuf::from(home).join(".docker"))
}

/// Make sure a compose plugin is registered under `<config>/cli-plugins`,
/// installing the bundled one when it ships in the install root. Once the
/// bundle has been moved it no longer exists, so a second resolution takes
/// the already-registered path.
fn ensure_plugin_registered(install_root: &Path, config_path: &Path) -> Result<(), StackError> {
    let plugins_dir = config_path.join("cli-plugins");
    let registered = program_path(&plugins_dir, COMPOSE_BINARY);
    let bundled = program_path(install_root, BUNDLED_PLUGIN);

    if is_program_present(&bundled) {
        if !is_program_present(&registered) {
            std::fs::create_dir_all(&plugins_dir).map_err(|e| {
                StackError::PluginInstallFailed(format!(
                    "failed creating plugin directory {}: {e}",
                    plugins_dir.display()
                ))
            })?;
        }
        move_file(&bundled, &registered).map_err(|e| {
            StackError::PluginInstallFailed(format!(
                "failed installing the bundled compose plugin: {e}"
            ))
        })?;
        info!("registered bundled compose plugin at {}", registered.display());
        return Ok(());
    }

    if is_program_present(&registered) {
        Ok(())
    } else {
        Err(StackError::BackendUnavailable)
    }
}
