//! Configuration module for batch scraping
//!
//! This module provides the `ScrapeConfig` struct and its type-safe
//! builder for configuring scrape runs with validation and sensible
//! defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{ScrapeConfigBuilder, WithKnownBarNo, WithSiteLink};
pub use types::{ProxyConfig, ScrapeConfig};
