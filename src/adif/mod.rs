//! ADIF (Amateur Data Interchange Format) reading and writing.
//!
//! ADIF is a tag-length-value text format: `<TAG:LEN>value`, with an
//! optional header closed by `<EOH>` and records closed by `<EOR>`.

use hashbrown::HashMap;

/// Exporter for stored contacts.
pub mod export;
/// Header stripping and record segmentation.
pub mod splitter;
/// Field extraction from a single record span.
pub mod tokenizer;

pub use export::{AdifHeader, ExportOptions, render_record, write_adif};
pub use splitter::{RecordSplitter, parse_records};
pub use tokenizer::{strip_type_suffixes, tokenize};

/// Uppercase tag name to trimmed value, scoped to one record.
pub type AdifFields = HashMap<String, String>;

/// End-of-header marker.
pub const EOH: &str = "<EOH>";
/// End-of-record marker.
pub const EOR: &str = "<EOR>";
