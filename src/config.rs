use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub bind_address: String,
    pub mongodb_uri: Option<String>,
    pub mongodb_db: String,
    pub mongodb_timeout: Duration,
    pub storage_dir: String,
    pub offline: bool,
    pub local_rendering: bool,
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
            mongodb_uri: None,
            mongodb_db: "makemeqr".to_string(),
            mongodb_timeout: Duration::from_millis(2000),
            storage_dir: "./data".to_string(),
            offline: false,
            local_rendering: true,
            cors_origins: vec![
                "http://localhost:5173".to_string(), // Default Bun dev server port
                "http://localhost:4173".to_string(),
            ],
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = get("PORT")
            .context("PORT not set")?
            .trim()
            .parse::<u16>()
            .context("PORT must be a port number")?;

        let mongodb_timeout = match get("MONGODB_TIMEOUT_MS") {
            Some(ms) => Duration::from_millis(
                ms.trim()
                    .parse()
                    .context("MONGODB_TIMEOUT_MS must be a number of milliseconds")?,
            ),
            None => defaults.mongodb_timeout,
        };

        let cors_origins = match get("CORS_ORIGINS") {
            Some(origins) => origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
            None => defaults.cors_origins,
        };

        Ok(Self {
            port,
            bind_address: get("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            mongodb_uri: get("MONGODB_URI"),
            mongodb_db: get("MONGODB_DB").unwrap_or(defaults.mongodb_db),
            mongodb_timeout,
            storage_dir: get("STORAGE_DIR").unwrap_or(defaults.storage_dir),
            offline: get("QR_OFFLINE").is_some_and(|v| parse_flag(&v)),
            local_rendering: get("QR_LOCAL_RENDERING").is_none_or(|v| parse_flag(&v)),
            cors_origins,
        })
    }
}
