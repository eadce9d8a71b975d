//! Personal radio-contact logbook with ADIF import and export.
//!
//! # Examples
//!
//! Importing into an in-memory store and exporting back:
//! ```
//! use hamlog::{
//!     adif::{render_record, ExportOptions},
//!     core::store::MemoryContactStore,
//!     import::import_adif,
//!     persist::ContactStore,
//! };
//!
//! let mut store = MemoryContactStore::new();
//! let text = "<EOH>\n<CALL:5>N0CAL<BAND:3>40m<MODE:3>SSB<QSO_DATE:8>20240115<TIME_ON:4>0930<EOR>";
//! let tally = import_adif(&mut store, text).expect("import");
//! assert_eq!(tally.imported, 1);
//!
//! let rec = &store.select_all().expect("select")[0];
//! assert_eq!(rec.timestamp_text(), "2024-01-15 09:30:00");
//! assert!(render_record(rec, &ExportOptions::default()).contains("<CALL:5>N0CAL "));
//! ```
//!
//! Band classification:
//! ```
//! assert_eq!(hamlog::band::classify(7.074), "40m");
//! assert_eq!(hamlog::band::classify(14.2505), "20m");
//! assert_eq!(hamlog::band::classify(15.0), "15.000MHz");
//! ```
#![warn(missing_docs)]

/// ADIF tokenizer, record splitter and exporter.
pub mod adif;
/// Frequency to band classification.
pub mod band;
/// Application configuration.
pub mod config;
/// In-memory store.
pub mod core;
/// Manual contact entry.
pub mod entry;
/// Export modes and file naming.
pub mod export;
/// ADIF import pipeline.
pub mod import;
/// Tracing subscriber bootstrap.
pub mod logging;
/// Store abstraction and SQLite implementation.
pub mod persist;
/// Contact and station records.
pub mod qso;
/// Shared primitive types and timestamp formats.
pub mod types;
