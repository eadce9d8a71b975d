use std::{fs, path::Path, time::Instant};

use tracing::{debug, error, info, warn};

use super::{ImportError, ImportTally, RecordError, dedup::is_duplicate, normalize, validate};
use crate::{
    adif::{RecordSplitter, strip_type_suffixes, tokenize},
    persist::{ContactStore, PersistResult},
    qso::StationConfig,
    types::{ContactId, format_timestamp},
};

/// Reads an ADIF file and imports every record into `store`.
///
/// Invalid UTF-8 is replaced rather than rejected. Only an unreadable file or
/// an unreadable station config aborts the run.
pub fn import_file<S: ContactStore + ?Sized>(
    store: &mut S,
    path: impl AsRef<Path>,
) -> Result<ImportTally, ImportError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ImportError::File {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "importing ADIF file");

    let text = String::from_utf8_lossy(&bytes);
    Ok(import_adif(store, &text)?)
}

/// Imports every record of an ADIF document, one insert per record.
///
/// A record that fails validation, normalization, the duplicate check or the
/// insert is logged and counted; the rest of the batch still runs.
pub fn import_adif<S: ContactStore + ?Sized>(store: &mut S, text: &str) -> PersistResult<ImportTally> {
    let started_at = Instant::now();
    let station = store.station_config()?;
    let text = strip_type_suffixes(text);
    let mut splitter = RecordSplitter::new(&text);
    let mut tally = ImportTally::default();

    for (idx, span) in splitter.by_ref().enumerate() {
        let record = idx + 1;
        match import_record(store, &station, span) {
            Ok(id) => {
                tally.imported += 1;
                debug!(record, id, "record imported");
            }
            Err(err) => {
                log_skipped(record, &err);
                tally.note(&err);
            }
        }
    }
    tally.seen = splitter.records_seen();

    info!(
        seen = tally.seen,
        imported = tally.imported,
        duplicates = tally.duplicates,
        errored = tally.errored(),
        duration_ms = started_at.elapsed().as_millis() as u64,
        "import finished"
    );
    Ok(tally)
}

fn import_record<S: ContactStore + ?Sized>(
    store: &mut S,
    station: &StationConfig,
    span: &str,
) -> Result<ContactId, RecordError> {
    let fields = tokenize(span);
    validate(&fields)?;
    let draft = normalize(&fields, station)?;

    if is_duplicate(&*store, &draft.contact_call, &draft.timestamp)? {
        return Err(RecordError::Duplicate {
            call: draft.contact_call,
            timestamp: format_timestamp(&draft.timestamp),
        });
    }

    Ok(store.insert_contact(&draft)?)
}

fn log_skipped(record: usize, err: &RecordError) {
    match err {
        RecordError::Validation { missing } => {
            warn!(record, ?missing, "record incomplete, skipped");
        }
        RecordError::Format(reason) => {
            warn!(record, %reason, "record has bad date/time or number, skipped");
        }
        RecordError::Duplicate { call, timestamp } => {
            info!(record, %call, %timestamp, "record already logged, skipped");
        }
        RecordError::Storage(source) => {
            error!(record, error = %source, "store rejected record");
        }
    }
}
