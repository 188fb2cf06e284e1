//! CSV persistence for extracted roster records
//!
//! One `CsvSink` is shared by every fetch task in a batch. All access is
//! serialized through an async mutex: the first append creates the output
//! file and writes the header, later appends reuse the open writer. The
//! mutex is what keeps the header-exactly-once invariant under concurrent
//! first-writers and prevents two rows from interleaving mid-line.

use anyhow::{Context, Result};
use log::debug;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::page_extractor::RosterRecord;

/// Fixed column set; every row written has exactly these nine fields in
/// this order.
pub const CSV_HEADER: [&str; 9] = [
    "Bar Number",
    "Status",
    "Name",
    "County",
    "Phone Number",
    "Fax Number",
    "Email",
    "Law School",
    "License Status, Disciplinary and Administrative History",
];

/// Append-only CSV sink with a lazily created output file.
pub struct CsvSink {
    path: PathBuf,
    writer: Mutex<Option<csv::Writer<File>>>,
}

impl CsvSink {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            writer: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a CSV row, creating the file (with header) on
    /// first use. Flushes after every row so a killed batch loses nothing
    /// already reported as saved.
    pub async fn append(&self, record: &RosterRecord) -> Result<()> {
        let mut guard = self.writer.lock().await;

        if guard.is_none() {
            *guard = Some(self.open_writer()?);
        }

        if let Some(writer) = guard.as_mut() {
            let bar_number = record.bar_number.to_string();
            writer
                .write_record([
                    bar_number.as_str(),
                    record.status.as_str(),
                    record.name.as_str(),
                    record.county.as_str(),
                    record.phone_number.as_str(),
                    record.fax_number.as_str(),
                    record.email.as_str(),
                    record.law_school.as_str(),
                    record.status_history.as_str(),
                ])
                .with_context(|| format!("failed to append record {}", record.bar_number))?;
            writer.flush().context("failed to flush csv output")?;
        }

        Ok(())
    }

    /// Open the output file in append mode, writing the header only when
    /// the file did not already exist.
    fn open_writer(&self) -> Result<csv::Writer<File>> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create output directory {}", parent.display()))?;
        }

        let file_exists = self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open output file {}", self.path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);

        if !file_exists {
            writer
                .write_record(CSV_HEADER)
                .context("failed to write csv header")?;
            writer.flush().context("failed to flush csv header")?;
            debug!("created output file {}", self.path.display());
        }

        Ok(writer)
    }
}
