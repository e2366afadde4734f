//! CLI argument definitions using clap
//!
//! Commands:
//! - tabserve serve [--config <path>] [--port <port>]
//! - tabserve query <DATASET> [--filter <expr>]... [--sort <column>]... [--config <path>]
//! - tabserve info [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tabserve - filter, sort and describe delimited datasets over HTTP
#[derive(Parser, Debug)]
#[command(name = "tabserve")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Path to configuration file (default: ./tabserve.json if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one query against a dataset and print the records
    Query {
        /// Dataset file name inside the data directory
        dataset: String,

        /// Filter expression; repeat to intersect
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Sort column; repeat for secondary keys
        #[arg(long = "sort")]
        sort: Vec<String>,

        /// Path to configuration file (default: ./tabserve.json if present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the inferred schema of every dataset
    Info {
        /// Path to configuration file (default: ./tabserve.json if present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_with_repeated_flags() {
        let cli = Cli::try_parse_from([
            "tabserve", "query", "t.csv", "--filter", "age > 1", "--sort", "name", "--filter",
            "age < 9",
        ])
        .unwrap();

        match cli.command {
            Command::Query {
                dataset,
                filters,
                sort,
                config,
            } => {
                assert_eq!(dataset, "t.csv");
                assert_eq!(filters, vec!["age > 1", "age < 9"]);
                assert_eq!(sort, vec!["name"]);
                assert!(config.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["tabserve", "serve", "--config", "x.json", "--port", "8080"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Command::Serve { config: Some(_), port: Some(8080) }
        ));
    }
}
