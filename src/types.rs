//! Shared primitive IDs and timestamp formats.

use chrono::{NaiveDate, NaiveDateTime};

/// Store-assigned contact identifier.
pub type ContactId = i64;
/// Station configuration row identifier.
pub type StationConfigId = i64;

/// Canonical rendering of contact and creation timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Calendar date rendering used by "created on" queries and file names.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Number of characters in a canonical timestamp.
pub const TIMESTAMP_LEN: usize = 19;

/// Renders `ts` as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a canonical timestamp, ignoring anything past the first 19 characters.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let head = text.get(..TIMESTAMP_LEN).unwrap_or(text);
    NaiveDateTime::parse_from_str(head, TIMESTAMP_FORMAT).ok()
}

/// Renders `date` as `YYYY-MM-DD`.
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
