use anyhow::{anyhow, Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use database::PoolSettings;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::setup::DatabaseBackend;

/// Environment used when `APP_ENV` is not set
pub const DEFAULT_APP_ENV: &str = "development";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// `sqlite://path`, `sqlite::memory:` or `postgres://...`
    pub url: String,
    /// Maximum number of database connections in the pool
    pub max_connections: u32,
    /// Connection acquire timeout in seconds
    pub connection_timeout: u64,
    /// Apply pending migrations when the server starts
    pub auto_migrate: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// Listen address for the HTTP server
    pub listen_addr: String,
    /// Port number to listen on
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json, compact)
    pub format: LogFormat,
    /// Write logs to this file instead of stdout
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

/// Load `.env.<app_env>` and then `.env`.
///
/// Neither file overrides a variable that is already set, so the
/// environment-specific file wins over `.env` and the real environment wins
/// over both.
pub fn load_dotenv(app_env: &str) {
    let _ = dotenv::from_filename(format!(".env.{app_env}"));
    let _ = dotenv::dotenv();
}

impl Config {
    /// Load configuration for `app_env` from files, `TODO_*` variables and the
    /// standard deployment variables (`DATABASE_URL`, `PORT`, ...)
    pub fn load(app_env: &str, explicit_file: Option<&str>) -> Result<Self> {
        let mut config = Self::from_layers(app_env, explicit_file)?;
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Build configuration from the layered sources only:
    /// embedded defaults, `config/<app_env>.toml`, an explicit file, then
    /// `TODO_`-prefixed environment variables (`__` separates nested keys)
    pub fn from_layers(app_env: &str, explicit_file: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder()
            .add_source(File::from_str(
                include_str!("../config/default.toml"),
                FileFormat::Toml,
            ))
            .add_source(
                File::with_name(&format!("config/{app_env}"))
                    .required(false)
                    .format(FileFormat::Toml),
            );

        if let Some(path) = explicit_file {
            builder = builder.add_source(File::with_name(path).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("TODO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Apply the standard deployment variables through `lookup`
    ///
    /// * `DATABASE_URL`, or `DB_DSN` when it is unset
    /// * `PORT` as `8080`, `:8080` or `0.0.0.0:8080`
    /// * `LISTEN_ADDR`
    /// * `LOG_LEVEL`
    /// * `LOG_FILE`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").or_else(|| lookup("DB_DSN")) {
            self.database.url = url;
        }

        if let Some(listen_addr) = lookup("LISTEN_ADDR") {
            self.server.listen_addr = listen_addr;
        }

        if let Some(port) = lookup("PORT") {
            let (host, port) = parse_port_spec(&port)?;
            if let Some(host) = host {
                self.server.listen_addr = host;
            }
            self.server.port = port;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(file) = lookup("LOG_FILE") {
            self.logging.file = Some(PathBuf::from(file));
        }

        Ok(())
    }

    /// Get the server socket address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.listen_addr, self.server.port)
    }

    /// Pool settings for the repository
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.database.max_connections,
            acquire_timeout: Duration::from_secs(self.database.connection_timeout),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ));
            }
        }

        if DatabaseBackend::from_url(&self.database.url).is_none() {
            return Err(anyhow!(
                "Unsupported database URL. Must start with 'sqlite:', 'postgres://' or 'postgresql://'. Got: {}",
                self.database.url
            ));
        }

        if self.server.port == 0 {
            return Err(anyhow!("Server port cannot be 0"));
        }

        if self.database.max_connections == 0 {
            return Err(anyhow!(
                "Database max_connections must be greater than 0"
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://todo.sqlite".to_string(),
                max_connections: 5,
                connection_timeout: 30,
                auto_migrate: true,
            },
            server: ServerConfig {
                listen_addr: "127.0.0.1".to_string(),
                port: 8080,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
                file: None,
            },
        }
    }
}

/// Split a `PORT` value into an optional host and a port
fn parse_port_spec(spec: &str) -> Result<(Option<String>, u16)> {
    let spec = spec.trim();
    let (host, port) = match spec.rsplit_once(':') {
        Some(("", port)) => (None, port),
        Some((host, port)) => (Some(host.to_string()), port),
        None => (None, spec),
    };

    let port = port
        .parse::<u16>()
        .with_context(|| format!("Invalid PORT value: {spec}"))?;
    Ok((host, port))
}
