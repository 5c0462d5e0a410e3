//! Configuration file
//!
//! A single JSON object. Every field is optional and falls back to the
//! default shown by `momo-ledger init`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::auth::BasicCredentials;
use crate::http_server::config::{default_host, default_port, default_realm};
use crate::http_server::HttpServerConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backing file for the record set
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Basic-auth username
    #[serde(default = "default_username")]
    pub username: String,

    /// Basic-auth password
    #[serde(default = "default_password")]
    pub password: String,

    /// Realm advertised on 401 responses
    #[serde(default = "default_realm")]
    pub realm: String,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/transactions.json")
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "secret".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            host: default_host(),
            port: default_port(),
            username: default_username(),
            password: default_password(),
            realm: default_realm(),
        }
    }
}

impl Config {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Write this configuration to `path`, refusing to overwrite
    pub fn write_new(&self, path: &Path) -> CliResult<()> {
        if path.exists() {
            return Err(CliError::already_initialized(path));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        fs::write(path, text)?;
        Ok(())
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }
        if self.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }
        if self.username.is_empty() {
            return Err(CliError::config_error("username must not be empty"));
        }
        if self.username.contains(':') {
            return Err(CliError::config_error("username must not contain ':'"));
        }
        if self.realm.is_empty() {
            return Err(CliError::config_error("realm must not be empty"));
        }
        Ok(())
    }

    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            realm: self.realm.clone(),
        }
    }

    pub fn credentials(&self) -> BasicCredentials {
        BasicCredentials::new(&self.username, &self.password)
    }
}
