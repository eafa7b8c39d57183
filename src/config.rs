// src/config.rs
//! Service configuration: optional TOML file plus environment overrides.
//! A missing file is not an error; every field has a workable default so
//! the binary boots and reports missing credentials at request time.

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::translate::DEFAULT_GTX_ENDPOINT;

pub const DEFAULT_CONFIG_PATH: &str = "config/analyzer.toml";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

pub const ENV_YOUTUBE_API_KEY: &str = "YOUTUBE_API_KEY";
pub const ENV_TRANSLATE_ENDPOINT: &str = "TRANSLATE_ENDPOINT";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub youtube_api_key: String,
    #[serde(default)]
    pub translate_endpoint: Option<String>,
    #[serde(default)]
    pub bind_addr: Option<String>,
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Load from the default path, then apply environment overrides.
    pub fn load() -> Self {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Self {
        let mut cfg = match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "unparseable config file, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        cfg.apply_env_overrides();
        cfg
    }

    fn apply_env_overrides(&mut self) {
        if let Some(v) = env_nonempty(ENV_YOUTUBE_API_KEY) {
            self.youtube_api_key = v;
        }
        if let Some(v) = env_nonempty(ENV_TRANSLATE_ENDPOINT) {
            self.translate_endpoint = Some(v);
        }
        if let Some(v) = env_nonempty(ENV_BIND_ADDR) {
            self.bind_addr = Some(v);
        }
        if let Some(v) = env_nonempty(ENV_HTTP_TIMEOUT_SECS) {
            match v.parse::<u64>() {
                Ok(secs) => self.http_timeout_secs = Some(secs),
                Err(_) => warn!(value = %v, "ignoring non-numeric {ENV_HTTP_TIMEOUT_SECS}"),
            }
        }
    }

    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    pub fn translate_endpoint(&self) -> &str {
        self.translate_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_GTX_ENDPOINT)
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
