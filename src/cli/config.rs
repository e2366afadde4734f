//! Configuration file
//!
//! JSON, every field optional. Loaded once per CLI invocation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::auth::{AuthService, JwtConfig};
use crate::dataset::{DirectoryStore, DEFAULT_MAX_FILE_BYTES};
use crate::http_server::{AppState, HttpServerConfig};
use crate::observability::Severity;

/// Looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./tabserve.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory of delimited files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default)]
    pub http: HttpServerConfig,

    /// HS256 signing secret. When absent a random per-process secret is used.
    #[serde(default)]
    pub jwt_secret: Option<String>,

    #[serde(default = "default_access_token_ttl_minutes")]
    pub access_token_ttl_minutes: i64,

    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,

    /// `/info` answers 201 when true, 200 when false
    #[serde(default = "default_info_status_created")]
    pub info_status_created: bool,

    /// Minimum log severity: trace, info, warn, error or fatal
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> String {
    "files".to_string()
}
fn default_delimiter() -> String {
    ",".to_string()
}
fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}
fn default_request_timeout_ms() -> u64 {
    10_000
}
/// Ten years
pub const MAX_ACCESS_TOKEN_TTL_MINUTES: i64 = 10 * 365 * 24 * 60;

fn default_access_token_ttl_minutes() -> i64 {
    15
}
fn default_jwt_issuer() -> String {
    "tabserve".to_string()
}
fn default_info_status_created() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            delimiter: default_delimiter(),
            max_file_bytes: default_max_file_bytes(),
            request_timeout_ms: default_request_timeout_ms(),
            http: HttpServerConfig::default(),
            jwt_secret: None,
            access_token_ttl_minutes: default_access_token_ttl_minutes(),
            jwt_issuer: default_jwt_issuer(),
            info_status_created: default_info_status_created(),
            log_level: default_log_level(),
        }
    }
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn describe(&self) -> String {
        match self {
            ConfigSource::File(path) => path.display().to_string(),
            ConfigSource::Defaults => "defaults".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// An explicit path must exist; otherwise `./tabserve.json` is used when
    /// present and built-in defaults when not.
    pub fn resolve(explicit: Option<&Path>) -> CliResult<(Self, ConfigSource)> {
        match explicit {
            Some(path) => Ok((Self::load(path)?, ConfigSource::File(path.to_path_buf()))),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Ok((
                        Self::load(default_path)?,
                        ConfigSource::File(default_path.to_path_buf()),
                    ))
                } else {
                    Ok((Self::default(), ConfigSource::Defaults))
                }
            }
        }
    }

    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CliResult<()> {
        self.delimiter_byte()?;

        if self.max_file_bytes == 0 {
            return Err(CliError::config_error("max_file_bytes must be > 0"));
        }
        if self.request_timeout_ms == 0 {
            return Err(CliError::config_error("request_timeout_ms must be > 0"));
        }
        if !(1..=MAX_ACCESS_TOKEN_TTL_MINUTES).contains(&self.access_token_ttl_minutes) {
            return Err(CliError::config_error(format!(
                "access_token_ttl_minutes must be between 1 and {}",
                MAX_ACCESS_TOKEN_TTL_MINUTES
            )));
        }
        if self.jwt_issuer.trim().is_empty() {
            return Err(CliError::config_error("jwt_issuer must not be empty"));
        }
        if matches!(&self.jwt_secret, Some(secret) if secret.is_empty()) {
            return Err(CliError::config_error("jwt_secret must not be empty"));
        }
        self.log_severity()?;

        Ok(())
    }

    /// The delimiter as a single ASCII byte other than the quote character
    pub fn delimiter_byte(&self) -> CliResult<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() && *b != b'"' && *b != b'\n' && *b != b'\r' => Ok(*b),
            _ => Err(CliError::config_error(format!(
                "Invalid delimiter '{}': must be one ASCII character other than '\"' or a newline",
                self.delimiter.escape_debug()
            ))),
        }
    }

    pub fn log_severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse::<Severity>()
            .map_err(|e| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn store(&self) -> CliResult<DirectoryStore> {
        Ok(DirectoryStore::new(self.data_path())
            .with_delimiter(self.delimiter_byte()?)
            .with_max_file_bytes(self.max_file_bytes))
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self
                .jwt_secret
                .clone()
                .unwrap_or_else(JwtConfig::random_secret),
            access_token_ttl: chrono::Duration::minutes(self.access_token_ttl_minutes),
            issuer: self.jwt_issuer.clone(),
        }
    }

    /// Shared request state for the HTTP server
    pub fn app_state(&self) -> CliResult<AppState> {
        Ok(AppState::new(
            Arc::new(self.store()?),
            AuthService::in_memory(self.jwt_config()),
        )
        .with_request_timeout(self.request_timeout())
        .with_info_status_created(self.info_status_created))
    }
}
