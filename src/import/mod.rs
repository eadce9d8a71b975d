//! ADIF import pipeline: validate, normalize, deduplicate, insert.

use std::{fmt, io, path::PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::persist::PersistError;

/// Duplicate check against the store.
pub mod dedup;
/// Typed contact construction from raw fields.
pub mod normalize;
/// Batch driver and file entry point.
pub mod orchestrator;
/// Mandatory tag checks.
pub mod validate;

pub use dedup::is_duplicate;
pub use normalize::{compose_timestamp, normalize};
pub use orchestrator::{import_adif, import_file};
pub use validate::{REQUIRED_TAGS, missing_required, validate};

/// Why a single record was not imported. Never fatal to the batch.
#[derive(Debug, Error)]
pub enum RecordError {
    /// One or more mandatory tags are absent.
    #[error("missing required tags: {}", .missing.join(", "))]
    Validation {
        /// Absent tags, in [`REQUIRED_TAGS`] order.
        missing: Vec<&'static str>,
    },
    /// A date, time or number could not be parsed.
    #[error("{0}")]
    Format(String),
    /// A contact with the same callsign and timestamp is already stored.
    #[error("{call} at {timestamp} already logged")]
    Duplicate {
        /// Worked callsign.
        call: String,
        /// Canonical timestamp.
        timestamp: String,
    },
    /// The store rejected the lookup or the insert.
    #[error("store: {0}")]
    Storage(#[from] PersistError),
}

/// Failure that aborts a whole import run.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file is missing or unreadable.
    #[error("cannot read {}: {source}", .path.display())]
    File {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The station config could not be loaded before the run.
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Per-run outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportTally {
    /// Records found in the file, whatever became of them.
    pub seen: usize,
    /// Records inserted.
    pub imported: usize,
    /// Records skipped because they were already stored.
    pub duplicates: usize,
    /// Records skipped for missing tags or unparseable values.
    pub invalid: usize,
    /// Records whose lookup or insert failed in the store.
    pub storage_errors: usize,
}

impl ImportTally {
    /// Records that failed for any reason other than being duplicates.
    pub fn errored(&self) -> usize {
        self.invalid + self.storage_errors
    }

    /// Counts a skipped record under its category.
    pub fn note(&mut self, err: &RecordError) {
        match err {
            RecordError::Validation { .. } | RecordError::Format(_) => self.invalid += 1,
            RecordError::Duplicate { .. } => self.duplicates += 1,
            RecordError::Storage(_) => self.storage_errors += 1,
        }
    }
}

impl fmt::Display for ImportTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Import results:")?;
        writeln!(f, "- Records in file: {}", self.seen)?;
        writeln!(f, "- New records imported: {}", self.imported)?;
        writeln!(f, "- Duplicates skipped: {}", self.duplicates)?;
        write!(f, "- Records with errors: {}", self.errored())
    }
}
