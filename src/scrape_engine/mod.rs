//! Scrape Engine Module
//!
//! The batch fetch loop and everything it needs: the per-identifier fetch
//! task, the browser-facing page source seam, orchestration with a
//! bounded concurrency gate, and post-batch cleanup.

// Sub-modules
pub mod cleanup;
pub mod fetch_task;
pub mod runner;
pub mod scrape_types;
pub mod source;

// Re-exports for public API
pub use fetch_task::{detail_url, fetch_one};
pub use runner::{run_batch, run_batch_with_source};
pub use scrape_types::{BatchSummary, FetchOutcome, ScrapeError, ScrapeResult};
pub use source::{ChromiumSource, DetailSource};
