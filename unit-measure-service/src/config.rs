//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Legacy deployment variables: `DEBUG`, `DB_USER`, `DB_PASSWORD`, `DB_HOST`, `DB_PORT`, `DB_NAME`
//! 2. Environment variables (prefix: `UMS_`, nested keys separated by `__`)
//! 3. Current working directory: ./config.toml
//! 4. XDG config directory: ~/.config/unit-measure-service/config.toml
//! 5. System directory: /etc/unit-measure-service/config.toml
//! 6. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;

/// Directory name used for XDG and system config lookups
pub const CONFIG_DIR_NAME: &str = "unit-measure-service";

/// Legacy string-valued database variables and their config keys
const LEGACY_DB_STRINGS: [(&str, &str); 5] = [
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_HOST", "database.host"),
    ("DB_NAME", "database.name"),
    ("DB_URL", "database.url"),
];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,

    /// Debug mode: verbose logging and internal error details in responses
    #[serde(default, deserialize_with = "lenient_bool")]
    pub debug: bool,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Middleware configuration
    #[serde(default)]
    pub middleware: MiddlewareConfig,

    /// List endpoint pagination
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Environment (dev, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// Database configuration
///
/// The connection string is assembled from the individual parts unless
/// `url` is set explicitly.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL; overrides the individual parts when present
    #[serde(default)]
    pub url: Option<String>,

    /// Database user
    #[serde(default = "default_db_user", deserialize_with = "string_or_number")]
    pub user: String,

    /// Database password
    #[serde(default, deserialize_with = "string_or_number")]
    pub password: String,

    /// Database host
    #[serde(default = "default_db_host", deserialize_with = "string_or_number")]
    pub host: String,

    /// Database port
    #[serde(default = "default_db_port")]
    pub port: u16,

    /// Database name
    #[serde(default = "default_db_name", deserialize_with = "string_or_number")]
    pub name: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum idle connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_secs: u64,

    /// Maximum retry attempts for establishing the initial connection
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retry attempts in seconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,

    /// Apply embedded migrations at startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Connection target for log messages, never including the password
    pub fn display_target(&self) -> String {
        match &self.url {
            Some(url) => crate::database::sanitize_connection_url(url),
            None => format!(
                "postgres://{}@{}:{}/{}",
                self.user, self.host, self.port, self.name
            ),
        }
    }

    /// Acquire timeout as Duration
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            user: default_db_user(),
            password: String::new(),
            host: default_db_host(),
            port: default_db_port(),
            name: default_db_name(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout_secs: default_connection_timeout(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay(),
            run_migrations: true,
        }
    }
}

// Keeps the password out of logs
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_deref().map(crate::database::sanitize_connection_url))
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connection_timeout_secs", &self.connection_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_secs", &self.retry_delay_secs)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

/// Middleware configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Request body size limit in MB
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,

    /// CORS mode (permissive, restrictive, disabled)
    #[serde(default = "default_cors_mode")]
    pub cors_mode: String,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            body_limit_mb: default_body_limit_mb(),
            cors_mode: default_cors_mode(),
        }
    }
}

/// How the `offset` query parameter of the list endpoint is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetConvention {
    /// `offset` is the number of rows to skip
    #[default]
    RowOffset,
    /// `offset` is a 1-indexed page number; rows skipped = (offset - 1) * limit
    PageNumber,
}

impl fmt::Display for OffsetConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowOffset => write!(f, "row_offset"),
            Self::PageNumber => write!(f, "page_number"),
        }
    }
}

/// List endpoint pagination configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Interpretation of the `offset` parameter
    #[serde(default)]
    pub convention: OffsetConvention,

    /// Offset used when the request does not provide one
    #[serde(default)]
    pub default_offset: Option<u32>,

    /// Limit used when the request does not provide one
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Upper bound applied to requested limits
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl PaginationConfig {
    /// Offset applied when the request omits it, per convention
    pub fn effective_default_offset(&self) -> u32 {
        self.default_offset.unwrap_or(match self.convention {
            OffsetConvention::RowOffset => 0,
            OffsetConvention::PageNumber => 1,
        })
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            convention: OffsetConvention::default(),
            default_offset: None,
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

/// Accept `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off` in any case
fn lenient_bool<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<bool, D::Error> {
    struct Visitor;

    impl de::Visitor<'_> for Visitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean (true/false, 1/0, yes/no, on/off)")
        }

        fn visit_bool<E: de::Error>(self, b: bool) -> std::result::Result<bool, E> {
            Ok(b)
        }

        fn visit_u64<E: de::Error>(self, n: u64) -> std::result::Result<bool, E> {
            match n {
                0 | 1 => Ok(n != 0),
                n => Err(E::invalid_value(de::Unexpected::Unsigned(n), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, n: i64) -> std::result::Result<bool, E> {
            match n {
                0 | 1 => Ok(n != 0),
                n => Err(E::invalid_value(de::Unexpected::Signed(n), &self)),
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<bool, E> {
            const TRUE: [&str; 4] = ["true", "1", "yes", "on"];
            const FALSE: [&str; 5] = ["false", "0", "no", "off", ""];
            let v = v.trim();
            if TRUE.iter().any(|t| t.eq_ignore_ascii_case(v)) {
                Ok(true)
            } else if FALSE.iter().any(|f| f.eq_ignore_ascii_case(v)) {
                Ok(false)
            } else {
                Err(E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }
    }

    de.deserialize_any(Visitor)
}

/// Accept a string, or a number that the environment parser produced
fn string_or_number<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<String, D::Error> {
    struct Visitor;

    impl de::Visitor<'_> for Visitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<String, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, n: u64) -> std::result::Result<String, E> {
            Ok(n.to_string())
        }

        fn visit_i64<E: de::Error>(self, n: i64) -> std::result::Result<String, E> {
            Ok(n.to_string())
        }

        fn visit_f64<E: de::Error>(self, n: f64) -> std::result::Result<String, E> {
            Ok(n.to_string())
        }
    }

    de.deserialize_any(Visitor)
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_name() -> String {
    "unit_measures".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    5
}

fn default_retry_delay() -> u64 {
    2
}

fn default_true() -> bool {
    true
}

fn default_body_limit_mb() -> usize {
    1
}

fn default_cors_mode() -> String {
    "permissive".to_string()
}

fn default_limit() -> u32 {
    10
}

fn default_max_limit() -> u32 {
    100
}

impl Config {
    /// Load configuration from all sources
    pub fn load() -> Result<Self> {
        let config = Self::figment().extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Bypasses the XDG and system directories. Environment variables still apply.
    pub fn load_from(path: &str) -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path));
        let config = Self::merge_env(figment).extract()?;
        Ok(config)
    }

    /// Build the layered figment without extracting it
    pub fn figment() -> Figment {
        let config_paths = Self::find_config_paths();

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Lowest priority first so higher priority files override
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        Self::merge_env(figment)
    }

    fn merge_env(figment: Figment) -> Figment {
        let mut figment = figment
            .merge(Env::prefixed("UMS_").split("__"))
            .merge(Env::raw().only(&["DEBUG"]))
            .merge(Env::raw().only(&["DB_PORT"]).map(|_| "database.port".into()));

        // Taken verbatim: Env would turn `0012` into 12 or `[x]` into an array
        for (var, key) in LEGACY_DB_STRINGS {
            if let Some(value) = Env::var(var) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }

        figment
    }

    /// Config file paths in priority order (highest first)
    fn find_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix(CONFIG_DIR_NAME);
        if let Some(path) = xdg_dirs.find_config_file("config.toml") {
            paths.push(path);
        }

        paths.push(PathBuf::from("/etc").join(CONFIG_DIR_NAME).join("config.toml"));

        paths
    }

    /// Effective log filter, raised to `debug` in debug mode
    pub fn log_filter(&self) -> String {
        if self.debug && self.service.log_level == default_log_level() {
            "debug".to_string()
        } else {
            self.service.log_level.clone()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: "unit-measure-service".to_string(),
                port: default_port(),
                log_level: default_log_level(),
                timeout_secs: default_timeout(),
                environment: default_environment(),
            },
            debug: false,
            database: DatabaseConfig::default(),
            middleware: MiddlewareConfig::default(),
            pagination: PaginationConfig::default(),
        }
    }
}
