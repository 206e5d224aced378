//! Compose backends for Flotilla stack deployment.
//!
//! This crate implements the execution layer behind the `Deployer` contract:
//! backend resolution (standalone `docker-compose` binary with fallback to
//! the engine's compose plugin, installing a bundled plugin when one ships
//! alongside the install root), compose command construction, process
//! execution with cooperative cancellation, and reduction of per-container
//! states into one stack-level status.

pub mod binary;
pub mod command;
pub mod exec;
pub mod plugin;
pub mod probe;
pub mod resolver;
pub mod status;

pub use binary::ComposeBinaryBackend;
pub use command::ComposeCommand;
pub use plugin::ComposePluginBackend;
pub use resolver::resolve;
pub use status::{aggregate, parse_services, Publisher, Service};
