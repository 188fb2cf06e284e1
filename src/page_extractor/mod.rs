//! Field extraction from rendered roster detail pages
//!
//! Pure functions over the text content of a detail page: label matching,
//! name cleanup, status normalization, and history sanitization. No I/O
//! happens here; the scrape engine feeds in text pulled from the browser.

pub mod schema;

pub use schema::RosterRecord;

/// Marker selector for the detail panel; also the selector for the
/// labeled `Label: value` paragraphs the field extractor scans.
pub const DETAIL_FIELD_SELECTOR: &str = "#moduleMemberDetail > div:nth-of-type(2) > p";

/// Selector for the member name heading, rendered only once the detail
/// panel has fully populated.
pub const NAME_HEADING_SELECTOR: &str = "#moduleMemberDetail > h3:nth-of-type(2)";

/// Selector for the license status / disciplinary history table body.
pub const HISTORY_TABLE_SELECTOR: &str =
    "#moduleMemberDetail > div.margin-bottom > table > tbody";

pub const STATUS_LABEL: &str = "license status:";
pub const COUNTY_LABEL: &str = "county:";
pub const PHONE_LABEL: &str = "phone number:";
pub const FAX_LABEL: &str = "fax number:";
pub const EMAIL_LABEL: &str = "email:";
pub const LAW_SCHOOL_LABEL: &str = "law school:";

/// Extract a labeled field value from the detail-panel paragraphs.
///
/// Scans for the first line whose text starts with `label`
/// (case-insensitive), removes every occurrence of the label from that
/// line, and returns the trimmed remainder. Returns an empty string when
/// no line matches.
#[must_use]
pub fn extract_field(lines: &[String], label: &str) -> String {
    lines
        .iter()
        .find(|line| starts_with_ignore_ascii_case(line, label))
        .map(|line| strip_label(line, label))
        .unwrap_or_default()
}

fn starts_with_ignore_ascii_case(line: &str, prefix: &str) -> bool {
    line.len() >= prefix.len()
        && line.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Remove every case-insensitive occurrence of `label` from `line`.
///
/// Labels are ASCII, so matches can only start on ASCII bytes and the
/// result remains valid UTF-8.
fn strip_label(line: &str, label: &str) -> String {
    let bytes = line.as_bytes();
    let needle = label.as_bytes();
    if needle.is_empty() {
        return line.trim().to_string();
    }
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if i + needle.len() <= bytes.len() && bytes[i..i + needle.len()].eq_ignore_ascii_case(needle)
        {
            i += needle.len();
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).trim().to_string()
}

/// Drop the bar-number suffix that the roster appends to the name heading
/// after a `#`, e.g. `"Jane Doe #12345"` becomes `"Jane Doe"`.
#[must_use]
pub fn clean_name(raw: &str) -> String {
    match raw.find('#') {
        Some(idx) => raw[..idx].trim().to_string(),
        None => raw.trim().to_string(),
    }
}

/// Replace embedded double quotes with single quotes so the history blob
/// cannot disturb the CSV quoting around it.
#[must_use]
pub fn sanitize_history(raw: &str) -> String {
    raw.replace('"', "'")
}

/// The roster leaves the status field blank for deceased members.
#[must_use]
pub fn normalize_status(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "Deceased".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Only records in exactly this status (ignoring case) are persisted.
#[must_use]
pub fn is_active(status: &str) -> bool {
    status.eq_ignore_ascii_case("active")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn extract_field_matches_case_insensitive_prefix() {
        let props = lines(&["County: Travis", "Phone Number: 555-1234", "Email: a@b.c"]);
        assert_eq!(extract_field(&props, "phone number:"), "555-1234");
        assert_eq!(extract_field(&props, "county:"), "Travis");
        assert_eq!(extract_field(&props, "EMAIL:"), "a@b.c");
    }

    #[test]
    fn extract_field_returns_empty_when_no_line_matches() {
        let props = lines(&["County: Travis"]);
        assert_eq!(extract_field(&props, "fax number:"), "");
        assert_eq!(extract_field(&[], "county:"), "");
    }

    #[test]
    fn extract_field_takes_first_matching_line() {
        let props = lines(&["County: Travis", "County: Bexar"]);
        assert_eq!(extract_field(&props, "county:"), "Travis");
    }

    #[test]
    fn extract_field_does_not_match_mid_line() {
        let props = lines(&["Mailing County: Travis"]);
        assert_eq!(extract_field(&props, "county:"), "");
    }

    #[test]
    fn extract_field_strips_all_label_occurrences() {
        let props = lines(&["Email: Email: a@b.c"]);
        assert_eq!(extract_field(&props, "email:"), "a@b.c");
    }

    #[test]
    fn extract_field_does_not_mutate_input() {
        let props = lines(&["County: Travis"]);
        let before = props.clone();
        let _ = extract_field(&props, "county:");
        assert_eq!(props, before);
    }

    #[test]
    fn clean_name_truncates_at_hash() {
        assert_eq!(clean_name("Jane Doe #12345"), "Jane Doe");
        assert_eq!(clean_name("John Smith #999"), "John Smith");
    }

    #[test]
    fn clean_name_passes_through_without_hash() {
        assert_eq!(clean_name("Jane Doe"), "Jane Doe");
        assert_eq!(clean_name("  Jane Doe  "), "Jane Doe");
    }

    #[test]
    fn sanitize_history_replaces_every_double_quote() {
        assert_eq!(
            sanitize_history(r#"He said "hello" and "goodbye""#),
            "He said 'hello' and 'goodbye'"
        );
        assert_eq!(sanitize_history("no quotes"), "no quotes");
    }

    #[test]
    fn empty_status_normalizes_to_deceased() {
        assert_eq!(normalize_status(""), "Deceased");
        assert_eq!(normalize_status("   "), "Deceased");
        assert_eq!(normalize_status("Active"), "Active");
    }

    #[test]
    fn is_active_ignores_case_but_not_other_statuses() {
        assert!(is_active("Active"));
        assert!(is_active("ACTIVE"));
        assert!(is_active("active"));
        assert!(!is_active("Inactive"));
        assert!(!is_active("Suspended"));
        assert!(!is_active("Deceased"));
        assert!(!is_active(""));
    }
}
