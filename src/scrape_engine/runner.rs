//! Batch orchestration
//!
//! Launches the shared browser once, walks the bar-number range in
//! descending order, admits fetch tasks through a counting-semaphore
//! concurrency gate, awaits every task to completion, and closes the
//! browser afterwards. Individual task failures are tallied, never
//! propagated; only orchestration-level failures (browser launch, a
//! closed semaphore) surface as errors.

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::sync::Semaphore;

use super::cleanup;
use super::fetch_task::fetch_one;
use super::scrape_types::{BatchSummary, FetchOutcome, ScrapeError};
use super::source::{ChromiumSource, DetailSource};
use crate::browser_setup::launch_browser;
use crate::config::ScrapeConfig;
use crate::record_saver::CsvSink;

/// Run a full batch against the live roster site.
///
/// Launches one browser for the whole batch and fetches every bar number
/// in `known_bar_no, known_bar_no - 1, ..., 1`.
pub async fn run_batch(config: ScrapeConfig) -> Result<BatchSummary, ScrapeError> {
    info!(
        "starting scrape of bar numbers {}..=1 with concurrency {}",
        config.known_bar_no(),
        config.concurrency()
    );

    let sink = Arc::new(CsvSink::new(config.output_path()));

    let user_data_dir =
        std::env::temp_dir().join(format!("barscrape_chrome_{}", std::process::id()));
    let (browser, handler_task, user_data_dir) =
        launch_browser(config.headless(), Some(user_data_dir), config.proxy())
            .await
            .map_err(|e| ScrapeError::BrowserError(format!("{e:#}")))?;

    let browser = Arc::new(browser);
    let source = Arc::new(ChromiumSource::new(
        Arc::clone(&browser),
        config.selector_wait(),
    ));

    let result = run_batch_with_source(source, &config, Arc::clone(&sink)).await;

    // Cleanup order matters: close the browser and wait for the process to
    // exit before aborting the CDP handler task, or the close command has
    // no connection to travel over.
    match Arc::try_unwrap(browser) {
        Ok(browser) => {
            if let Err(e) = cleanup::cleanup_browser_and_data(browser, user_data_dir).await {
                warn!("browser cleanup failed: {e:#}");
            }
        }
        Err(arc) => {
            warn!(
                "browser still has {} strong references, cleanup deferred to drop",
                Arc::strong_count(&arc)
            );
        }
    }

    handler_task.abort();
    if let Err(e) = handler_task.await
        && !e.is_cancelled()
    {
        warn!("browser handler task failed during abort: {e}");
    }

    match &result {
        Ok(summary) => info!("finished scraping: {summary}"),
        Err(e) => error!("scrape failed: {e}"),
    }

    result
}

/// Concurrency-gated fetch loop over an arbitrary [`DetailSource`].
///
/// Separated from [`run_batch`] so tests can drive the gate with a fake
/// source and no browser. At most `config.concurrency()` tasks are in
/// flight at once; waiters are admitted in submission order. Completion
/// order across tasks is unconstrained.
pub async fn run_batch_with_source<S>(
    source: Arc<S>,
    config: &ScrapeConfig,
    sink: Arc<CsvSink>,
) -> Result<BatchSummary, ScrapeError>
where
    S: DetailSource + 'static,
    S::Page: 'static,
{
    let concurrency = config.concurrency();
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let site_link: Arc<str> = Arc::from(config.site_link());

    let mut bar_numbers = (1..=config.known_bar_no()).rev();
    let mut active_tasks = FuturesUnordered::new();
    let mut summary = BatchSummary::default();

    loop {
        // Fill up to the concurrency limit
        while active_tasks.len() < concurrency {
            let Some(bar_number) = bar_numbers.next() else {
                break;
            };

            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| ScrapeError::Other("concurrency gate closed unexpectedly".into()))?;

            let source = Arc::clone(&source);
            let sink = Arc::clone(&sink);
            let site_link = Arc::clone(&site_link);

            active_tasks.push(tokio::spawn(async move {
                let _permit = permit; // Hold until task completes
                fetch_one(source.as_ref(), bar_number, &site_link, sink.as_ref()).await
            }));
        }

        // Wait for at least one task to settle
        match active_tasks.next().await {
            Some(Ok(outcome)) => {
                if let FetchOutcome::Failed { bar_number, error } = &outcome {
                    debug!("bar number {bar_number} failed: {error}");
                }
                summary.record(&outcome);
            }
            Some(Err(e)) => {
                error!("fetch task panicked: {e}");
                summary.failed += 1;
            }
            None => break, // Range exhausted and all tasks settled
        }
    }

    Ok(summary)
}
