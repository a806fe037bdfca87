//! Shared runtime plumbing for the Userbox server: configuration loading
//! and logging initialization.

pub mod config;
pub mod logging;

pub use config::{AppConfig, CliArgs, LoggingSection, ServerConfig};
