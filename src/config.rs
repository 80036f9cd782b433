// src/config.rs
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::errors::ConfigError;

/// Where listings come from, as given by `LISTING_SOURCE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Fixture,
    JsonFile(PathBuf),
    Sqlite(PathBuf),
    Http(String),
}

impl SourceConfig {
    /// Accepts `fixture`, `json:<path>`, `sqlite:<path>` or `http:<url>`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "fixture" {
            return Ok(SourceConfig::Fixture);
        }

        let (kind, rest) = raw.split_once(':').ok_or_else(|| ConfigError {
            key: "LISTING_SOURCE",
            message: format!("expected <kind>:<target>, got {raw:?}"),
        })?;

        match kind {
            "json" => Ok(SourceConfig::JsonFile(PathBuf::from(rest))),
            "sqlite" => Ok(SourceConfig::Sqlite(PathBuf::from(rest))),
            "http" => Ok(SourceConfig::Http(validate_url("LISTING_SOURCE", rest)?)),
            other => Err(ConfigError {
                key: "LISTING_SOURCE",
                message: format!("unknown source kind {other:?}"),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub workers: usize,
    pub source: SourceConfig,
    /// Artificial latency for the fixture source.
    pub fixture_delay: Duration,
    /// Bot endpoint relaying detail requests. `None` leaves delivery to
    /// `Telegram.WebApp.sendData` in the page.
    pub host_bridge_url: Option<String>,
    /// Ask Telegram to expand the Mini App on launch.
    pub expand_on_launch: bool,
    pub schema_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            workers: 8,
            source: SourceConfig::Fixture,
            fixture_delay: Duration::from_millis(1000),
            host_bridge_url: None,
            expand_on_launch: true,
            schema_path: "sql/schema.sql".to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(addr) = lookup("LISTING_MAP_ADDR") {
            cfg.addr = addr.parse().map_err(|e| ConfigError {
                key: "LISTING_MAP_ADDR",
                message: format!("{e}"),
            })?;
        }
        if let Some(workers) = lookup("LISTING_MAP_WORKERS") {
            cfg.workers = parse_number("LISTING_MAP_WORKERS", &workers)?;
            if cfg.workers == 0 {
                return Err(ConfigError {
                    key: "LISTING_MAP_WORKERS",
                    message: "must be at least 1".to_string(),
                });
            }
        }
        if let Some(source) = lookup("LISTING_SOURCE") {
            cfg.source = SourceConfig::parse(&source)?;
        }
        if let Some(delay) = lookup("FIXTURE_DELAY_MS") {
            cfg.fixture_delay = Duration::from_millis(parse_number("FIXTURE_DELAY_MS", &delay)?);
        }
        if let Some(url) = lookup("HOST_BRIDGE_URL").filter(|u| !u.trim().is_empty()) {
            cfg.host_bridge_url = Some(validate_url("HOST_BRIDGE_URL", url.trim())?);
        }
        if let Some(expand) = lookup("EXPAND_ON_LAUNCH") {
            cfg.expand_on_launch = match expand.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(ConfigError {
                        key: "EXPAND_ON_LAUNCH",
                        message: format!("expected a boolean, got {other:?}"),
                    })
                }
            };
        }
        if let Some(schema) = lookup("LISTING_SCHEMA_PATH") {
            cfg.schema_path = schema;
        }

        Ok(cfg)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError {
        key,
        message: e.to_string(),
    })
}

fn validate_url(key: &'static str, raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError {
        key,
        message: format!("{raw:?}: {e}"),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        scheme => Err(ConfigError {
            key,
            message: format!("unsupported scheme {scheme:?}"),
        }),
    }
}
