//! Contact record, insert draft, and station profile types.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::types::{ContactId, format_timestamp};

/// Fully materialized contact as held by a store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactRecord {
    /// Store-assigned identifier.
    pub id: ContactId,
    /// Operator callsign at the time of the contact.
    pub my_call: String,
    /// Worked station callsign, upper-cased.
    pub contact_call: String,
    /// Frequency in MHz.
    pub frequency: Option<f64>,
    /// Band label, or a formatted frequency when outside the band plan.
    pub band: String,
    /// Emission mode, upper-cased.
    pub mode: String,
    /// Contact time in UTC, second precision.
    pub timestamp: NaiveDateTime,
    /// Signal report sent.
    pub rst_sent: Option<String>,
    /// Signal report received.
    pub rst_received: Option<String>,
    /// Free-text comment.
    pub comment: Option<String>,
    /// Locality of the worked station.
    pub qth: Option<String>,
    /// Operator name of the worked station.
    pub name: Option<String>,
    /// Transmit power in watts.
    pub power: Option<f64>,
    /// Maidenhead locator of the worked station, possibly empty.
    pub grid_locator: String,
    /// Insert time assigned by the store (UTC).
    pub created_at: NaiveDateTime,
}

impl ContactRecord {
    /// Canonical `YYYY-MM-DD HH:MM:SS` rendering of the contact time.
    pub fn timestamp_text(&self) -> String {
        format_timestamp(&self.timestamp)
    }
}

/// Insert payload used to create a new [`ContactRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct ContactDraft {
    /// Operator callsign.
    pub my_call: String,
    /// Worked station callsign.
    pub contact_call: String,
    /// Frequency in MHz.
    pub frequency: Option<f64>,
    /// Band label.
    pub band: String,
    /// Emission mode.
    pub mode: String,
    /// Contact time in UTC.
    pub timestamp: NaiveDateTime,
    /// Signal report sent.
    pub rst_sent: Option<String>,
    /// Signal report received.
    pub rst_received: Option<String>,
    /// Free-text comment.
    pub comment: Option<String>,
    /// Locality of the worked station.
    pub qth: Option<String>,
    /// Operator name of the worked station.
    pub name: Option<String>,
    /// Transmit power in watts.
    pub power: Option<f64>,
    /// Maidenhead locator of the worked station.
    pub grid_locator: String,
}

impl ContactDraft {
    /// Materializes the draft with store-assigned metadata.
    pub fn into_record(self, id: ContactId, created_at: NaiveDateTime) -> ContactRecord {
        ContactRecord {
            id,
            my_call: self.my_call,
            contact_call: self.contact_call,
            frequency: self.frequency,
            band: self.band,
            mode: self.mode,
            timestamp: self.timestamp,
            rst_sent: self.rst_sent,
            rst_received: self.rst_received,
            comment: self.comment,
            qth: self.qth,
            name: self.name,
            power: self.power,
            grid_locator: self.grid_locator,
            created_at,
        }
    }
}

/// Operator's own station profile. The most recently saved one is active.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StationConfig {
    /// Operator callsign.
    pub my_call: String,
    /// Typical transmit power, as typed by the operator.
    pub power: String,
    /// Station location.
    pub location: String,
    /// Station Maidenhead locator.
    pub grid_locator: String,
    /// Antenna description.
    pub antenna: String,
    /// Equipment description.
    pub equipment: String,
}

impl StationConfig {
    /// Returns the configured power as watts when it parses as a number.
    pub fn default_power(&self) -> Option<f64> {
        self.power.trim().parse::<f64>().ok()
    }

    /// True when an operator callsign has been configured.
    pub fn has_callsign(&self) -> bool {
        !self.my_call.trim().is_empty()
    }
}
