//! Getter methods for `ScrapeConfig`
//!
//! Accessors for configuration values, plus loading from a JSON file and
//! the derived output path.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::builder::validate;
use super::types::{ProxyConfig, ScrapeConfig};

impl ScrapeConfig {
    /// Load a config from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config JSON from {}", path.display()))?;
        validate(&config)?;
        Ok(config)
    }

    #[must_use]
    pub fn site_link(&self) -> &str {
        &self.site_link
    }

    #[must_use]
    pub fn known_bar_no(&self) -> u32 {
        self.known_bar_no
    }

    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    #[must_use]
    pub fn selector_wait(&self) -> Duration {
        Duration::from_secs(self.selector_wait_secs)
    }

    #[must_use]
    pub fn proxy(&self) -> Option<&ProxyConfig> {
        self.proxy.as_ref()
    }

    /// Output file path for a batch started now: a `MM-DD-YYYY HH-mm`
    /// local timestamp with a `.csv` extension, inside `output_dir`.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        let stamp = chrono::Local::now().format("%m-%d-%Y %H-%M");
        self.output_dir.join(format!("{stamp}.csv"))
    }
}
