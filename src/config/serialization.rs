//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# operadoras configuration
#
# Environment variables override these values:
#   OPERADORAS_API_URL, OPERADORAS_PAGE_SIZE, OPERADORAS_TIMEOUT_SECS
#   RUST_LOG overrides [logging] level

# Base URL of the operadoras API
api_url = {api_url:?}

# Rows per request when scrolling the list
page_size = {page_size}

# Rows per request for `list --legacy` (one extra request per row)
legacy_page_size = {legacy_page_size}

# Per-request timeout in seconds
timeout_secs = {timeout_secs}

# Include operators that have no expense records
include_sem_despesas = {include_sem_despesas}

[logging]
level = {level:?}
file_enabled = {file_enabled}
file_dir = {file_dir:?}
file_rotation = {file_rotation:?}   # hourly, daily, never
file_prefix = {file_prefix:?}
"#,
            api_url = self.api_url,
            page_size = self.page_size,
            legacy_page_size = self.legacy_page_size,
            timeout_secs = self.timeout_secs,
            include_sem_despesas = self.include_sem_despesas,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display().to_string(),
            file_rotation = self.logging.file_rotation.as_str(),
            file_prefix = self.logging.file_prefix,
        )
    }

    /// Write the default config if no file exists yet
    ///
    /// Helps users discover the options. Failures are ignored; config is
    /// optional.
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }
}
