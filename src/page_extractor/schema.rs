//! Record type produced by the extractor and consumed by the record saver.

use serde::{Deserialize, Serialize};

/// One member's extracted roster fields.
///
/// Built transiently inside a single fetch task and either serialized to
/// CSV immediately (active members) or discarded; never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRecord {
    pub bar_number: u32,
    pub status: String,
    pub name: String,
    pub county: String,
    pub phone_number: String,
    pub fax_number: String,
    pub email: String,
    pub law_school: String,
    /// Full text of the license status / disciplinary history table, with
    /// embedded double quotes already replaced by single quotes.
    pub status_history: String,
}
