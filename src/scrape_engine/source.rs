//! Browser-facing seam for loading and reading detail pages
//!
//! The engine talks to the browser only through [`DetailSource`], so tests
//! can drive the batch with a fake source and no Chrome process. The
//! production implementation wraps a shared chromiumoxide [`Browser`].

use anyhow::{Context, Result, anyhow};
use chromiumoxide::Page;
use chromiumoxide::browser::Browser;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// One page load plus the text reads a fetch task needs.
///
/// Every method may fail; the fetch task is responsible for catching and
/// containing those failures. `close` must be called on every page handed
/// out by `open`, on success and failure paths alike.
pub trait DetailSource: Send + Sync {
    type Page: Send + Sync;

    /// Open a fresh tab, navigate to `url`, and wait for the load event.
    /// No timeout is imposed here; a hung navigation holds its
    /// concurrency slot until the browser gives up.
    fn open(&self, url: &str) -> impl Future<Output = Result<Self::Page>> + Send;

    /// Wait (bounded) for `selector` to appear in the page DOM.
    fn wait_for(
        &self,
        page: &Self::Page,
        selector: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Inner text of the first element matching `selector`.
    fn text(
        &self,
        page: &Self::Page,
        selector: &str,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Inner text of every element matching `selector`, in DOM order.
    fn text_all(
        &self,
        page: &Self::Page,
        selector: &str,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Release the tab. Failures are logged, never propagated.
    fn close(&self, page: Self::Page) -> impl Future<Output = ()> + Send;
}

/// Production [`DetailSource`] over a shared chromiumoxide browser.
///
/// Each `open` call gets its own isolated tab; the browser instance is
/// shared across all concurrent fetch tasks.
pub struct ChromiumSource {
    browser: Arc<Browser>,
    selector_wait: Duration,
}

impl ChromiumSource {
    #[must_use]
    pub fn new(browser: Arc<Browser>, selector_wait: Duration) -> Self {
        Self {
            browser,
            selector_wait,
        }
    }
}

impl DetailSource for ChromiumSource {
    type Page = Page;

    async fn open(&self, url: &str) -> Result<Page> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("failed to open tab")?;
        page.goto(url)
            .await
            .with_context(|| format!("navigation failed for {url}"))?;
        page.wait_for_navigation()
            .await
            .with_context(|| format!("load event never fired for {url}"))?;
        Ok(page)
    }

    /// Poll the DOM for `selector`. `page.wait_for_navigation()` returns
    /// when the HTTP response arrives, but the roster renders the detail
    /// panel via JavaScript afterwards, so the element must be polled for.
    async fn wait_for(&self, page: &Page, selector: &str) -> Result<()> {
        let start = Instant::now();
        let poll_interval = Duration::from_millis(100);

        loop {
            if page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if start.elapsed() >= self.selector_wait {
                return Err(anyhow!(
                    "timed out after {}s waiting for selector {selector}",
                    self.selector_wait.as_secs()
                ));
            }
            tokio::time::sleep(poll_interval).await;
        }
    }

    async fn text(&self, page: &Page, selector: &str) -> Result<String> {
        let element = page
            .find_element(selector)
            .await
            .with_context(|| format!("no element matches {selector}"))?;
        let text = element
            .inner_text()
            .await
            .with_context(|| format!("failed to read text of {selector}"))?;
        Ok(text.unwrap_or_default().trim().to_string())
    }

    async fn text_all(&self, page: &Page, selector: &str) -> Result<Vec<String>> {
        let elements = page
            .find_elements(selector)
            .await
            .with_context(|| format!("no elements match {selector}"))?;
        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            if let Ok(Some(text)) = element.inner_text().await {
                texts.push(text.trim().to_string());
            }
        }
        Ok(texts)
    }

    async fn close(&self, page: Page) {
        if let Err(e) = page.close().await {
            warn!("failed to close tab: {e}");
        }
    }
}
