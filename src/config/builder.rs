//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! The builder requires `site_link` and `known_bar_no` before `build()`
//! becomes available; everything else has defaults.

use anyhow::{Result, anyhow};
use std::marker::PhantomData;
use std::path::PathBuf;
use url::Url;

use super::types::{
    ProxyConfig, ScrapeConfig, default_concurrency, default_headless, default_output_dir,
    default_selector_wait_secs,
};

// Type states for the builder
pub struct WithSiteLink;
pub struct WithKnownBarNo;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) site_link: Option<String>,
    pub(crate) known_bar_no: Option<u32>,
    pub(crate) concurrency: usize,
    pub(crate) headless: bool,
    pub(crate) output_dir: PathBuf,
    pub(crate) selector_wait_secs: u64,
    pub(crate) proxy: Option<ProxyConfig>,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            site_link: None,
            known_bar_no: None,
            concurrency: default_concurrency(),
            headless: default_headless(),
            output_dir: default_output_dir(),
            selector_wait_secs: default_selector_wait_secs(),
            proxy: None,
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }
}

impl ScrapeConfigBuilder<()> {
    pub fn site_link(self, link: impl Into<String>) -> ScrapeConfigBuilder<WithSiteLink> {
        ScrapeConfigBuilder {
            site_link: Some(link.into()),
            known_bar_no: self.known_bar_no,
            concurrency: self.concurrency,
            headless: self.headless,
            output_dir: self.output_dir,
            selector_wait_secs: self.selector_wait_secs,
            proxy: self.proxy,
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfigBuilder<WithSiteLink> {
    pub fn known_bar_no(self, known_bar_no: u32) -> ScrapeConfigBuilder<WithKnownBarNo> {
        ScrapeConfigBuilder {
            site_link: self.site_link,
            known_bar_no: Some(known_bar_no),
            concurrency: self.concurrency,
            headless: self.headless,
            output_dir: self.output_dir,
            selector_wait_secs: self.selector_wait_secs,
            proxy: self.proxy,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when both required fields are set
impl ScrapeConfigBuilder<WithKnownBarNo> {
    pub fn build(self) -> Result<ScrapeConfig> {
        let config = ScrapeConfig {
            site_link: self.site_link.ok_or_else(|| anyhow!("site_link is required"))?,
            known_bar_no: self
                .known_bar_no
                .ok_or_else(|| anyhow!("known_bar_no is required"))?,
            concurrency: self.concurrency,
            headless: self.headless,
            output_dir: self.output_dir,
            selector_wait_secs: self.selector_wait_secs,
            proxy: self.proxy,
        };
        validate(&config)?;
        Ok(config)
    }
}

/// Shared validation for builder- and file-sourced configs.
pub(crate) fn validate(config: &ScrapeConfig) -> Result<()> {
    Url::parse(&config.site_link)
        .map_err(|e| anyhow!("site_link is not a valid URL: {e}"))?;
    if config.known_bar_no == 0 {
        return Err(anyhow!("known_bar_no must be at least 1"));
    }
    if config.concurrency == 0 {
        return Err(anyhow!("concurrency must be at least 1"));
    }
    if config.selector_wait_secs == 0 {
        return Err(anyhow!("selector_wait_secs must be at least 1"));
    }
    Ok(())
}
