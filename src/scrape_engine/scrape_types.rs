//! Core types for the batch scrape engine.
//!
//! This module contains the error type shared across the engine, the
//! per-task outcome value, and the batch summary returned to callers.

use std::fmt;

/// Custom error type for scrape operations
#[derive(Debug, Clone)]
pub enum ScrapeError {
    /// Configuration error
    ConfigError(String),
    /// Browser launch / lifecycle error
    BrowserError(String),
    /// Page navigation or render error (marker selector never appeared)
    RenderError(String),
    /// Output file write error
    WriteError(String),
    /// Other errors
    Other(String),
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            Self::BrowserError(msg) => write!(f, "Browser error: {msg}"),
            Self::RenderError(msg) => write!(f, "Render error: {msg}"),
            Self::WriteError(msg) => write!(f, "Write error: {msg}"),
            Self::Other(msg) => write!(f, "Scrape error: {msg}"),
        }
    }
}

impl std::error::Error for ScrapeError {}

impl From<anyhow::Error> for ScrapeError {
    fn from(err: anyhow::Error) -> Self {
        // Use {:#} to preserve full error chain with context
        Self::Other(format!("{err:#}"))
    }
}

/// Convenience alias for Result with `ScrapeError`
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// How a single fetch task ended.
///
/// A fetch task always resolves with one of these instead of an `Err`, so
/// the batch can await every task without one failure aborting siblings.
/// The three states keep "not active" distinguishable from "broke".
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Status was active; one CSV row was appended.
    Saved { bar_number: u32 },
    /// Page rendered but the status was not active; nothing persisted.
    Skipped { bar_number: u32, status: String },
    /// Navigation, render, or write failed; the error was captured here.
    Failed { bar_number: u32, error: ScrapeError },
}

impl FetchOutcome {
    #[must_use]
    pub fn bar_number(&self) -> u32 {
        match self {
            Self::Saved { bar_number }
            | Self::Skipped { bar_number, .. }
            | Self::Failed { bar_number, .. } => *bar_number,
        }
    }
}

/// Tally of every task outcome in one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Saved { .. } => self.saved += 1,
            FetchOutcome::Skipped { .. } => self.skipped += 1,
            FetchOutcome::Failed { .. } => self.failed += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.saved + self.skipped + self.failed
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} saved, {} skipped, {} failed",
            self.saved, self.skipped, self.failed
        )
    }
}
