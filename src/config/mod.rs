//! Configuration for the operadoras client
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/operadoras/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::operadoras::{LEGACY_PAGE_SIZE, PAGE_SIZE};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod serialization;

#[cfg(test)]
mod tests;

pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the operadoras API (endpoints are appended to it)
    pub api_url: String,

    /// Rows per page for incremental loading
    pub page_size: u32,

    /// Rows per page for the legacy list
    pub legacy_page_size: u32,

    /// Per-request timeout
    pub timeout_secs: u64,

    /// Include operators without expense records by default
    pub include_sem_despesas: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: PAGE_SIZE,
            legacy_page_size: LEGACY_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            include_sem_despesas: false,
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub page_size: Option<u32>,
    pub legacy_page_size: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub include_sem_despesas: Option<bool>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/operadoras/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("operadoras").join("config.toml"))
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load file config if it exists
    ///
    /// A missing file means defaults. A file that exists but can't be read or
    /// parsed is an error.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::from_sources(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed config file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // API URL: env > file > default
        let api_url = env("OPERADORAS_API_URL")
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        // Page size: env > file > default (unparseable env values are ignored)
        let page_size = env("OPERADORAS_PAGE_SIZE")
            .and_then(|v| v.parse().ok())
            .or(file.page_size)
            .unwrap_or(defaults.page_size)
            .max(1);

        // Legacy page size: file > default
        let legacy_page_size = file
            .legacy_page_size
            .unwrap_or(defaults.legacy_page_size)
            .max(1);

        // Timeout: env > file > default
        let timeout_secs = env("OPERADORAS_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .or(file.timeout_secs)
            .unwrap_or(defaults.timeout_secs);

        let include_sem_despesas = file
            .include_sem_despesas
            .unwrap_or(defaults.include_sem_despesas);

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            api_url,
            page_size,
            legacy_page_size,
            timeout_secs,
            include_sem_despesas,
            logging,
        }
    }
}
