//! Builder methods available for all states
//!
//! Optional settings that can be applied regardless of which required
//! fields have been provided yet.

use std::path::PathBuf;

use super::builder::ScrapeConfigBuilder;
use super::types::ProxyConfig;

impl<State> ScrapeConfigBuilder<State> {
    /// Maximum number of fetch tasks in flight at once. Protects the
    /// shared browser and the roster site from excessive load.
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Run the browser without a visible window (default: true).
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Directory the timestamped CSV output file is created in.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Seconds to poll for a marker selector before the fetch fails.
    #[must_use]
    pub fn selector_wait_secs(mut self, secs: u64) -> Self {
        self.selector_wait_secs = secs;
        self
    }

    /// SOCKS proxy forwarded to the browser launch.
    #[must_use]
    pub fn proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }
}
