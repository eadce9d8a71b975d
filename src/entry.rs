//! Manual contact entry: operator input to insert draft.

use chrono::{NaiveDateTime, Timelike, Utc};
use thiserror::Error;

use crate::{
    band::classify,
    import::normalize::GRID_MAX_LEN,
    qso::{ContactDraft, StationConfig},
};

/// Malformed operator input. Callers re-prompt or report; never fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserInputError {
    /// Frequency is not a number.
    #[error("invalid frequency `{0}`, expected MHz as a number")]
    Frequency(String),
    /// Timestamp matches neither accepted layout.
    #[error("invalid time `{0}`, use YYYY-MM-DD HH:MM[:SS] or leave empty for now")]
    Timestamp(String),
    /// Power is not a number.
    #[error("invalid power `{0}`, expected watts as a number")]
    Power(String),
    /// Locator is not two letters followed by two digits.
    #[error("invalid grid locator `{0}`, expected at least 2 letters + 2 digits")]
    GridLocator(String),
    /// No operator callsign has been saved yet.
    #[error("station callsign not configured, run `station set --call` first")]
    StationNotConfigured,
}

/// Raw operator input for one contact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualEntry {
    /// Worked callsign.
    pub contact_call: String,
    /// Frequency in MHz.
    pub frequency: f64,
    /// Mode as typed.
    pub mode: String,
    /// Contact time; `None` means now.
    pub timestamp: Option<NaiveDateTime>,
    /// Report sent.
    pub rst_sent: String,
    /// Report received.
    pub rst_received: String,
    /// Worked operator name.
    pub name: String,
    /// Worked station locality.
    pub qth: String,
    /// Worked station locator.
    pub grid_locator: String,
    /// Comment; empty asks for the automatic one.
    pub comment: String,
    /// Power as typed; empty falls back to the station config.
    pub power: String,
}

/// Parses a contact time. Empty input means the current UTC second.
pub fn parse_entry_timestamp(input: &str) -> Result<NaiveDateTime, UserInputError> {
    let input = input.trim();
    if input.is_empty() {
        let now = Utc::now().naive_utc();
        return Ok(now.with_nanosecond(0).unwrap_or(now));
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M"))
        .map_err(|_| UserInputError::Timestamp(input.to_string()))
}

/// Parses a frequency in MHz.
pub fn parse_frequency(input: &str) -> Result<f64, UserInputError> {
    let input = input.trim();
    input
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .ok_or_else(|| UserInputError::Frequency(input.to_string()))
}

/// Upper-cases and checks a locator; empty is allowed.
pub fn validate_grid_locator(input: &str) -> Result<String, UserInputError> {
    let grid = input.trim().to_uppercase();
    if grid.is_empty() {
        return Ok(grid);
    }
    let bytes = grid.as_bytes();
    let ok = bytes.len() >= 4
        && bytes[..2].iter().all(u8::is_ascii_alphabetic)
        && bytes[2..4].iter().all(u8::is_ascii_digit);
    if ok {
        Ok(grid)
    } else {
        Err(UserInputError::GridLocator(input.trim().to_string()))
    }
}

/// Builds an insert draft, deriving the band from the frequency.
pub fn build_draft(entry: &ManualEntry, station: &StationConfig) -> Result<ContactDraft, UserInputError> {
    if !station.has_callsign() {
        return Err(UserInputError::StationNotConfigured);
    }

    let power_input = entry.power.trim();
    let power = if power_input.is_empty() {
        station.default_power()
    } else {
        Some(
            power_input
                .parse::<f64>()
                .map_err(|_| UserInputError::Power(power_input.to_string()))?,
        )
    };

    let name = entry.name.trim();
    let comment = match entry.comment.trim() {
        "" if !name.is_empty() => Some(format!("Thanks {name} for the contact, 73!")),
        "" => None,
        text => Some(text.to_string()),
    };

    let timestamp = match entry.timestamp {
        Some(ts) => ts,
        None => parse_entry_timestamp("")?,
    };

    Ok(ContactDraft {
        my_call: station.my_call.clone(),
        contact_call: entry.contact_call.trim().to_uppercase(),
        frequency: Some(entry.frequency),
        band: classify(entry.frequency),
        mode: entry.mode.trim().to_uppercase(),
        timestamp,
        rst_sent: non_empty(&entry.rst_sent),
        rst_received: non_empty(&entry.rst_received),
        comment,
        qth: non_empty(&entry.qth),
        name: non_empty(name),
        power,
        grid_locator: entry
            .grid_locator
            .trim()
            .to_uppercase()
            .chars()
            .take(GRID_MAX_LEN)
            .collect(),
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
