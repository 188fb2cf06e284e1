pub mod browser_setup;
pub mod config;
pub mod page_extractor;
pub mod record_saver;
pub mod scrape_engine;

pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use config::{ProxyConfig, ScrapeConfig};
pub use page_extractor::RosterRecord;
pub use record_saver::{CSV_HEADER, CsvSink};
pub use scrape_engine::{
    BatchSummary, ChromiumSource, DetailSource, FetchOutcome, ScrapeError, ScrapeResult,
};

/// Run one full batch: launch the shared browser, fetch every bar number
/// in the configured range through the concurrency gate, and close the
/// browser once all tasks have settled.
pub async fn scrape(config: ScrapeConfig) -> Result<BatchSummary, ScrapeError> {
    scrape_engine::run_batch(config).await
}
