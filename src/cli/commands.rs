//! CLI command implementations

use std::fs;

use serde_json::json;

use super::args::Command;
use super::config::{Config, ConfigSource};
use super::errors::{CliError, CliResult};
use super::io::write_json;
use crate::executor::{QueryExecutor, QueryRequest};
use crate::http_server::HttpServer;
use crate::introspect::SchemaIntrospector;
use crate::observability::{log_event, Event, Logger};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => {
            let (mut config, source) = load_config(config.as_deref())?;
            if let Some(port) = port {
                config.http.port = port;
            }
            serve(&config, &source)
        }
        Command::Query {
            dataset,
            filters,
            sort,
            config,
        } => {
            let (config, _) = load_config(config.as_deref())?;
            let request = QueryRequest {
                dataset,
                filters,
                sort,
            };
            query(&config, &request)
        }
        Command::Info { config } => {
            let (config, _) = load_config(config.as_deref())?;
            info(&config)
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> CliResult<(Config, ConfigSource)> {
    let (config, source) = Config::resolve(path)?;
    Logger::set_min_severity(config.log_severity()?);
    Ok((config, source))
}

/// Run the HTTP server until interrupted
pub fn serve(config: &Config, source: &ConfigSource) -> CliResult<()> {
    fs::create_dir_all(config.data_path()).map_err(|e| {
        CliError::serve_failed(format!(
            "Failed to create data directory {}: {}",
            config.data_dir, e
        ))
    })?;

    let jwt_secret = if config.jwt_secret.is_some() {
        "configured"
    } else {
        "generated"
    };
    log_event(
        Event::ConfigLoaded,
        &[
            ("data_dir", &config.data_dir),
            ("jwt_secret", jwt_secret),
            ("source", &source.describe()),
        ],
    );

    let server = HttpServer::new(config.http.clone(), config.app_state()?);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Execute one query and print `{"data": [...]}`
pub fn query(config: &Config, request: &QueryRequest) -> CliResult<()> {
    let store = config.store()?;
    let result = QueryExecutor::new(&store)
        .execute(request)
        .map_err(|e| CliError::query_failed(format!("{}: {}", e.code(), e)))?;

    write_json(&json!({ "data": result.records() }))
}

/// Print the schema report for every dataset
pub fn info(config: &Config) -> CliResult<()> {
    let store = config.store()?;
    let report = SchemaIntrospector::new(&store)
        .describe_all()
        .map_err(|e| CliError::query_failed(format!("{}: {}", e.code(), e)))?;

    write_json(&json!({ "Report": report.entries() }))
}
