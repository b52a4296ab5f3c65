use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use crate::constants::{DEFAULT_FEED_URL, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub feed_url: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            port: DEFAULT_PORT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings from quakemap.ini next to the binary. A missing file or
    /// missing keys fall back to the defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        let mut settings = Settings::default();
        if !config_path.exists() {
            return Ok(settings);
        }

        let file = File::open(&config_path).context("Failed to open config file")?;
        let reader = BufReader::new(file);
        let mut config_map = HashMap::new();

        for line in reader.lines() {
            let line = line.context("Failed to read line from config")?;
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        if let Some(feed_url) = config_map.get("feed_url") {
            settings.feed_url = feed_url.trim_matches('"').to_string();
        }
        if let Some(port_str) = config_map.get("port") {
            if let Ok(port) = port_str.parse::<u16>() {
                settings.port = port;
            }
        }
        if let Some(timeout_str) = config_map.get("request_timeout_secs") {
            if let Ok(timeout) = timeout_str.parse::<u64>() {
                settings.request_timeout_secs = timeout;
            }
        }

        Ok(settings)
    }

    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push("quakemap.ini");
        path
    }
}
