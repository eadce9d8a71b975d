//! Logbook export to ADIF files.

use std::{
    fs::File,
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::info;

use crate::{
    adif::{AdifHeader, ExportOptions, write_adif},
    persist::{ContactStore, PersistError},
    types::format_date,
};

/// Base name used when the operator gives none.
pub const DEFAULT_EXPORT_BASE: &str = "hamradio_logbook";
/// Title line of a full export.
pub const EXPORT_TITLE: &str = "HamRadio Logbook Export";

/// Which contacts to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    /// Every contact, in insertion order.
    All,
    /// Contacts created today (UTC), newest creation first. `local_date`
    /// labels the header, matching the file name.
    CreatedToday {
        /// Operator's calendar date.
        local_date: NaiveDate,
    },
}

/// Result of an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing matched; no file was written.
    Empty,
    /// File written with `count` records.
    Written {
        /// Records written.
        count: usize,
        /// Destination file.
        path: PathBuf,
    },
}

/// Export failure.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Records could not be read.
    #[error(transparent)]
    Persist(#[from] PersistError),
    /// The file could not be written.
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// `<base>.adi`, with [`DEFAULT_EXPORT_BASE`] for an empty base.
pub fn export_file_name(base: &str) -> String {
    let base = base.trim();
    let base = if base.is_empty() {
        DEFAULT_EXPORT_BASE
    } else {
        base
    };
    format!("{base}.adi")
}

/// `logbook_<YYYY-MM-DD>.adi` for the given (local) calendar date.
pub fn today_file_name(date: NaiveDate) -> String {
    format!("logbook_{}.adi", format_date(&date))
}

/// Writes the contacts selected by `scope` to `path`.
///
/// A full export always writes a file, header only when the logbook is
/// empty. A today export with no matches returns [`ExportOutcome::Empty`]
/// without touching the file system.
pub fn export_logbook<S: ContactStore + ?Sized>(
    store: &S,
    scope: ExportScope,
    path: impl AsRef<Path>,
    options: &ExportOptions,
) -> Result<ExportOutcome, ExportError> {
    let path = path.as_ref();
    let (records, header) = match scope {
        ExportScope::All => (store.select_all()?, AdifHeader::new(EXPORT_TITLE)),
        ExportScope::CreatedToday { local_date } => {
            let today = Utc::now().date_naive();
            let records = store.select_created_on(today)?;
            if records.is_empty() {
                info!(date = %today, "no contacts created today, nothing exported");
                return Ok(ExportOutcome::Empty);
            }
            let title = format!("{EXPORT_TITLE} - Entries of {}", format_date(&local_date));
            (records, AdifHeader::new(title))
        }
    };

    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    write_adif(&mut out, &header, &records, options).map_err(io_err)?;

    info!(path = %path.display(), count = records.len(), ?scope, "logbook exported");
    Ok(ExportOutcome::Written {
        count: records.len(),
        path: path.to_path_buf(),
    })
}
