//! Command-line interface
//!
//! - serve: run the HTTP server
//! - query: one-shot query against a dataset
//! - info: one-shot schema report

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{info, query, run, run_command, serve};
pub use config::{Config, ConfigSource, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_json;
