//! End-to-end tests driving both backends against a scripted fake engine.
//!
//! The fake records every invocation in `args.log` next to itself, answers
//! status listings with canned JSON, and fails `down` with diagnostics on
//! stderr, so resolution, argument construction, environment injection, and
//! status aggregation are all exercised without a real container engine.

#![cfg(unix)]

use flotilla_compose::resolve;
use flotilla_core::{CancelToken, DeployOptions, Options, StackStatus};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

const FAKE_BACKEND: &str = r#"#!/bin/sh
dir=$(CDPATH= cd -- "$(dirname -- "$0")" && pwd)
printf '%s\n' "$*" >> "$dir/args.log"
printf '%s\n' "$DOCKER_CONFIG" >> "$dir/config.log"
case "$*" in
  *"ps -a --format json"*)
    printf '[{"ID":"c1","Name":"demo-web-1","Project":"demo","Service":"web","State":"running","ExitCode":0},{"ID":"c2","Name":"demo-db-1","Project":"demo","Service":"db","State":"running","ExitCode":0}]'
    ;;
  *" down "*|*"down --remove-orphans"*)
    echo "network teardown failed" >&2
    exit 7
    ;;
  *)
    echo "ok"
    ;;
esac
"#;

fn install_fake(dir: &Path, name: &str) {
    let path = dir.join(name);
    std::fs::write(&path, FAKE_BACKEND).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

fn logged_args(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("args.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn binary_backend_full_cycle() {
    let install = tempfile::tempdir().unwrap();
    install_fake(install.path(), "docker-compose");

    let token = CancelToken::new();
    let deployer = resolve(install.path(), Path::new("")).unwrap();
    assert_eq!(deployer.name(), "compose-binary");

    let files = vec!["  stack.yml ".to_owned(), "override.yml".to_owned()];
    let deploy = DeployOptions {
        options: Options {
            project_name: Some("demo".to_owned()),
            ..Default::default()
        },
        ..Default::default()
    };
    deployer.deploy(&token, &files, &deploy).unwrap();

    let report = deployer.status(&token, "demo").unwrap();
    assert_eq!(report.status, StackStatus::Running);
    assert!(report.message.is_empty());

    let logged = logged_args(install.path());
    assert_eq!(
        logged,
        vec![
            "-f stack.yml -f override.yml -p demo up -d",
            "-p demo ps -a --format json",
        ]
    );
}

#[test]
fn binary_backend_surfaces_backend_diagnostics() {
    let install = tempfile::tempdir().unwrap();
    install_fake(install.path(), "docker-compose");

    let deployer = resolve(install.path(), Path::new("")).unwrap();
    let err = deployer
        .remove(
            &CancelToken::new(),
            &["stack.yml".to_owned()],
            &Options::default(),
        )
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("network teardown failed"), "got: {msg}");
}

#[test]
fn binary_backend_injects_the_engine_config_variable() {
    let install = tempfile::tempdir().unwrap();
    let config = tempfile::tempdir().unwrap();
    install_fake(install.path(), "docker-compose");

    let deployer = resolve(install.path(), config.path()).unwrap();
    deployer
        .pull(
            &CancelToken::new(),
            &["stack.yml".to_owned()],
            &Options::default(),
        )
        .unwrap();

    let configs = std::fs::read_to_string(install.path().join("config.log")).unwrap();
    assert_eq!(configs.trim(), config.path().to_string_lossy());
}

#[test]
fn plugin_backend_wraps_the_compose_subcommand() {
    let install = tempfile::tempdir().unwrap();
    let config = tempfile::tempdir().unwrap();
    install_fake(install.path(), "docker");
    install_fake(install.path(), "docker-compose.plugin");

    let token = CancelToken::new();
    let deployer = resolve(install.path(), config.path()).unwrap();
    assert_eq!(deployer.name(), "compose-plugin");

    let deploy = DeployOptions {
        options: Options {
            project_name: Some("demo".to_owned()),
            host: Some("tcp://10.0.0.5:2375".to_owned()),
            ..Default::default()
        },
        force_recreate: true,
        ..Default::default()
    };
    deployer
        .deploy(&token, &["stack.yml".to_owned()], &deploy)
        .unwrap();

    let config_arg = config.path().to_string_lossy();
    let logged = logged_args(install.path());
    assert_eq!(
        logged,
        vec![format!(
            "-H tcp://10.0.0.5:2375 --config {config_arg} compose -f stack.yml -p demo up -d --force-recreate"
        )]
    );

    let report = deployer.status(&token, "demo").unwrap();
    assert_eq!(report.status, StackStatus::Running);
}

#[test]
fn status_of_an_empty_project_reports_removed() {
    let install = tempfile::tempdir().unwrap();
    let empty_ps = r##"#!/bin/sh
exit 0
"##;
    let path = install.path().join("docker-compose");
    std::fs::write(&path, empty_ps).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

    let deployer = resolve(install.path(), Path::new("")).unwrap();
    let report = deployer.status(&CancelToken::new(), "gone").unwrap();
    assert_eq!(report.status, StackStatus::Removed);
    assert!(report.message.is_empty());
}
