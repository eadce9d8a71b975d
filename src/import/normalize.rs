use chrono::{NaiveDate, NaiveDateTime};

use super::RecordError;
use crate::{
    adif::AdifFields,
    qso::{ContactDraft, StationConfig},
};

/// Maximum stored length of a Maidenhead locator.
pub const GRID_MAX_LEN: usize = 6;

/// Combines `QSO_DATE` (`YYYYMMDD`) and `TIME_ON` into a UTC instant.
///
/// `TIME_ON` is right-padded with `0` to `HHMMSS`. A three or five digit
/// time is read as `HMM` / `HMMSS` with its leading zero dropped, so `930`
/// is 09:30:00.
pub fn compose_timestamp(qso_date: &str, time_on: &str) -> Result<NaiveDateTime, RecordError> {
    let bad = || RecordError::Format(format!("invalid date/time `{qso_date}` `{time_on}`"));

    if qso_date.len() != 8 || !is_digits(qso_date) || !time_on.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }

    let mut time = String::with_capacity(6);
    if matches!(time_on.len(), 3 | 5) {
        time.push('0');
    }
    time.push_str(time_on);
    while time.len() < 6 {
        time.push('0');
    }
    time.truncate(6);

    let num = |s: &str| s.parse::<u32>().map_err(|_| bad());
    let date = NaiveDate::from_ymd_opt(
        qso_date[..4].parse::<i32>().map_err(|_| bad())?,
        num(&qso_date[4..6])?,
        num(&qso_date[6..8])?,
    )
    .ok_or_else(bad)?;

    date.and_hms_opt(num(&time[..2])?, num(&time[2..4])?, num(&time[4..6])?)
        .ok_or_else(bad)
}

/// Builds an insert draft from a validated record.
///
/// The operator callsign comes from `station`, never from the file. `BAND` is
/// kept as written, lower-cased.
pub fn normalize(fields: &AdifFields, station: &StationConfig) -> Result<ContactDraft, RecordError> {
    let required = |tag: &'static str| {
        fields
            .get(tag)
            .map(String::as_str)
            .ok_or_else(|| RecordError::Validation { missing: vec![tag] })
    };

    let timestamp = compose_timestamp(required("QSO_DATE")?, required("TIME_ON")?)?;
    let optional = |tag: &str| fields.get(tag).cloned();

    let comment = ["COMMENT", "QSLMSG", "QSLMSG_INTL"]
        .iter()
        .filter_map(|tag| fields.get(*tag))
        .find(|v| !v.is_empty())
        .cloned();

    let grid_locator: String = fields
        .get("GRIDSQUARE")
        .map(|g| g.to_uppercase().chars().take(GRID_MAX_LEN).collect())
        .unwrap_or_default();

    Ok(ContactDraft {
        my_call: station.my_call.clone(),
        contact_call: required("CALL")?.to_uppercase(),
        frequency: parse_number(fields, "FREQ")?,
        band: required("BAND")?.to_lowercase(),
        mode: required("MODE")?.to_uppercase(),
        timestamp,
        rst_sent: optional("RST_SENT"),
        rst_received: optional("RST_RCVD"),
        comment,
        qth: optional("QTH"),
        name: optional("NAME"),
        power: parse_number(fields, "TX_PWR")?,
        grid_locator,
    })
}

// Zero-length data (`<FREQ:0>`) counts as absent.
fn parse_number(fields: &AdifFields, tag: &str) -> Result<Option<f64>, RecordError> {
    fields
        .get(tag)
        .map(|raw| raw.trim())
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            raw.parse::<f64>()
                .map_err(|_| RecordError::Format(format!("invalid {tag} `{raw}`")))
        })
        .transpose()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
