use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use animeworld_engine::{FetchSettings, RequestOptions, DEFAULT_BASE_URL};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILENAME: &str = "animeworld.ron";
const ENV_PREFIX: &str = "ANIMEWORLD_";

/// Runtime configuration. Missing fields take their defaults, so a config
/// file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub retries: u32,
    pub retry_delay_ms: u64,
    /// Empty means the built-in browser identities.
    pub user_agents: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: "info".to_string(),
            log_file: None,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            redirect_limit: fetch.redirect_limit,
            max_bytes: fetch.max_bytes,
            retries: 2,
            retry_delay_ms: 1000,
            user_agents: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Reads `path`, or `./animeworld.ron` when no path is given. Only an
    /// explicitly named file is required to exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
        };

        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()))
            }
        };

        ron::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Applies `ANIMEWORLD_*` variables from `lookup`. Values that do not
    /// parse are left at their previous setting and returned as
    /// `NAME=value` so the caller can report them once logging is up.
    pub fn apply_env<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));
        let mut rejected = Vec::new();

        if let Some(value) = var("BASE_URL") {
            self.base_url = value;
        }
        if let Some(value) = var("LOG_LEVEL") {
            self.log_level = value;
        }
        if let Some(value) = var("LOG_FILE") {
            self.log_file = Some(PathBuf::from(value));
        }
        if let Some(value) = var("USER_AGENTS") {
            self.user_agents = value
                .split('|')
                .map(str::trim)
                .filter(|agent| !agent.is_empty())
                .map(String::from)
                .collect();
        }

        let numbers: [(&str, &mut dyn FnMut(&str) -> bool); 6] = [
            ("CONNECT_TIMEOUT_SECS", &mut |v: &str| parse_into(v, &mut self.connect_timeout_secs)),
            ("REQUEST_TIMEOUT_SECS", &mut |v: &str| parse_into(v, &mut self.request_timeout_secs)),
            ("REDIRECT_LIMIT", &mut |v: &str| parse_into(v, &mut self.redirect_limit)),
            ("MAX_BYTES", &mut |v: &str| parse_into(v, &mut self.max_bytes)),
            ("RETRIES", &mut |v: &str| parse_into(v, &mut self.retries)),
            ("RETRY_DELAY_MS", &mut |v: &str| parse_into(v, &mut self.retry_delay_ms)),
        ];
        for (name, apply) in numbers {
            if let Some(value) = var(name) {
                if !apply(value.trim()) {
                    rejected.push(format!("{ENV_PREFIX}{name}={value}"));
                }
            }
        }

        rejected
    }

    pub fn apply_process_env(&mut self) -> Vec<String> {
        self.apply_env(|name| env::var(name).ok())
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            redirect_limit: self.redirect_limit,
            max_bytes: self.max_bytes,
        }
    }

    pub fn request_options(&self) -> RequestOptions {
        RequestOptions::default().retries(self.retries, Duration::from_millis(self.retry_delay_ms))
    }
}

fn parse_into<T: std::str::FromStr>(value: &str, slot: &mut T) -> bool {
    match value.parse() {
        Ok(parsed) => {
            *slot = parsed;
            true
        }
        Err(_) => false,
    }
}
