//! Single identifier fetch lifecycle
//!
//! Handles one bar number end to end: compose the detail URL, load the
//! page, wait for the detail panel, extract fields, persist active
//! records, and always release the tab. Failures are contained here and
//! reported as an outcome value so the batch never sees a rejection.

use log::{info, warn};

use super::scrape_types::{FetchOutcome, ScrapeError};
use super::source::DetailSource;
use crate::page_extractor::{
    self, COUNTY_LABEL, DETAIL_FIELD_SELECTOR, EMAIL_LABEL, FAX_LABEL, HISTORY_TABLE_SELECTOR,
    LAW_SCHOOL_LABEL, NAME_HEADING_SELECTOR, PHONE_LABEL, RosterRecord, STATUS_LABEL,
};
use crate::record_saver::CsvSink;

/// Compose the detail-page URL for one bar number. The roster zero-pads
/// bar numbers to six digits.
#[must_use]
pub fn detail_url(site_link: &str, bar_number: u32) -> String {
    format!("{site_link}{bar_number:06}")
}

/// Fetch one bar number and persist it when active.
///
/// Never returns an error: navigation, render, and write failures are
/// captured into [`FetchOutcome::Failed`]. The tab acquired for this task
/// is closed on every exit path.
pub async fn fetch_one<S: DetailSource>(
    source: &S,
    bar_number: u32,
    site_link: &str,
    sink: &CsvSink,
) -> FetchOutcome {
    info!("fetching details for bar number {bar_number}");

    let url = detail_url(site_link, bar_number);
    let page = match source.open(&url).await {
        Ok(page) => page,
        Err(e) => {
            warn!("fetch [{bar_number}] error: {e:#}");
            return FetchOutcome::Failed {
                bar_number,
                error: ScrapeError::RenderError(format!("{e:#}")),
            };
        }
    };

    let outcome = extract_and_save(source, &page, bar_number, sink).await;
    source.close(page).await;

    match outcome {
        Ok(outcome) => outcome,
        Err(error) => {
            warn!("fetch [{bar_number}] error: {error}");
            FetchOutcome::Failed { bar_number, error }
        }
    }
}

/// Extraction and persistence for an already-loaded page.
///
/// Split out so `fetch_one` can close the tab exactly once whether this
/// succeeds or fails.
async fn extract_and_save<S: DetailSource>(
    source: &S,
    page: &S::Page,
    bar_number: u32,
    sink: &CsvSink,
) -> Result<FetchOutcome, ScrapeError> {
    source
        .wait_for(page, DETAIL_FIELD_SELECTOR)
        .await
        .map_err(|e| ScrapeError::RenderError(format!("{e:#}")))?;

    let lines = source
        .text_all(page, DETAIL_FIELD_SELECTOR)
        .await
        .map_err(|e| ScrapeError::RenderError(format!("{e:#}")))?;

    let status = page_extractor::normalize_status(&page_extractor::extract_field(
        &lines,
        STATUS_LABEL,
    ));

    if !page_extractor::is_active(&status) {
        info!("{bar_number} - status - {status}");
        return Ok(FetchOutcome::Skipped { bar_number, status });
    }

    // The name heading renders after the field paragraphs; wait for it
    // before reading the active-member fields.
    source
        .wait_for(page, NAME_HEADING_SELECTOR)
        .await
        .map_err(|e| ScrapeError::RenderError(format!("{e:#}")))?;

    let name_raw = source
        .text(page, NAME_HEADING_SELECTOR)
        .await
        .map_err(|e| ScrapeError::RenderError(format!("{e:#}")))?;
    let history_raw = source
        .text(page, HISTORY_TABLE_SELECTOR)
        .await
        .map_err(|e| ScrapeError::RenderError(format!("{e:#}")))?;

    let record = RosterRecord {
        bar_number,
        status: status.clone(),
        name: page_extractor::clean_name(&name_raw),
        county: page_extractor::extract_field(&lines, COUNTY_LABEL),
        phone_number: page_extractor::extract_field(&lines, PHONE_LABEL),
        fax_number: page_extractor::extract_field(&lines, FAX_LABEL),
        email: page_extractor::extract_field(&lines, EMAIL_LABEL),
        law_school: page_extractor::extract_field(&lines, LAW_SCHOOL_LABEL),
        status_history: page_extractor::sanitize_history(&history_raw),
    };

    sink.append(&record)
        .await
        .map_err(|e| ScrapeError::WriteError(format!("{e:#}")))?;

    info!("{bar_number} - status - {status}");
    Ok(FetchOutcome::Saved { bar_number })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_url_zero_pads_to_six_digits() {
        assert_eq!(detail_url("https://example.com/m/", 3), "https://example.com/m/000003");
        assert_eq!(
            detail_url("https://example.com/m/", 123456),
            "https://example.com/m/123456"
        );
        assert_eq!(
            detail_url("https://example.com/m/", 1234567),
            "https://example.com/m/1234567"
        );
    }
}
