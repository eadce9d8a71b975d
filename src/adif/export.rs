//! ADIF serialization of stored contacts.
//!
//! Output is accepted verbatim by [`super::tokenize`]: every field is written
//! as `<TAG:N>value ` and every record ends with `<EOR>` and a newline.

use std::io::{self, Write};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::qso::ContactRecord;

/// ADIF version written into the header.
pub const ADIF_VERSION: &str = "3.1.0";
/// Program identifier written into the header.
pub const PROGRAM_ID: &str = "HamLogbook";
/// Length prefix historically written for `FREQ`, whatever the rendered width.
pub const LEGACY_FREQ_LENGTH: usize = 8;

/// Serializer switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Write the measured `FREQ` length instead of the legacy fixed `8`.
    pub measure_freq_length: bool,
}

/// Document header: a free-text title line plus version and program tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdifHeader {
    /// First line of the file, ignored by readers.
    pub title: String,
    /// Instant written into `CREATED_TIMESTAMP`.
    pub created: DateTime<Utc>,
}

impl AdifHeader {
    /// Header stamped with the current UTC instant.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            created: Utc::now(),
        }
    }

    /// Renders the header including the `<EOH>` line and a blank line.
    pub fn render(&self) -> String {
        let created = self.created.format("%Y%m%d %H%M%S").to_string();
        format!(
            "{title}\n{ver}\n{prog}\n{stamp}\n<EOH>\n\n",
            title = self.title,
            ver = field("ADIF_VER", ADIF_VERSION),
            prog = field("PROGRAMID", PROGRAM_ID),
            stamp = field("CREATED_TIMESTAMP", &created),
        )
    }
}

/// Stored columns in canonical export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Internal identifier.
    Id,
    /// Operator callsign.
    MyCall,
    /// Worked callsign.
    ContactCall,
    /// Frequency in MHz.
    Frequency,
    /// Band label.
    Band,
    /// Mode.
    Mode,
    /// Contact time.
    Timestamp,
    /// Report sent.
    RstSent,
    /// Report received.
    RstReceived,
    /// Comment.
    Comment,
    /// Locality.
    Qth,
    /// Name.
    Name,
    /// Power in watts.
    Power,
    /// Locator.
    GridLocator,
    /// Store insert time.
    CreatedAt,
}

impl Column {
    /// Every column, in storage order.
    pub const ALL: [Column; 15] = [
        Column::Id,
        Column::MyCall,
        Column::ContactCall,
        Column::Frequency,
        Column::Band,
        Column::Mode,
        Column::Timestamp,
        Column::RstSent,
        Column::RstReceived,
        Column::Comment,
        Column::Qth,
        Column::Name,
        Column::Power,
        Column::GridLocator,
        Column::CreatedAt,
    ];

    /// ADIF tag for this column; `None` for columns that are never exported.
    pub fn adif_tag(self) -> Option<&'static str> {
        match self {
            Column::MyCall => Some("OPERATOR"),
            Column::ContactCall => Some("CALL"),
            Column::Frequency => Some("FREQ"),
            Column::Band => Some("BAND"),
            Column::Mode => Some("MODE"),
            Column::Timestamp => Some("QSO_DATE"),
            Column::RstSent => Some("RST_SENT"),
            Column::RstReceived => Some("RST_RCVD"),
            Column::Comment => Some("COMMENT"),
            Column::Qth => Some("QTH"),
            Column::Name => Some("NAME"),
            Column::Power => Some("TX_PWR"),
            Column::GridLocator => Some("GRIDSQUARE"),
            Column::Id | Column::CreatedAt => None,
        }
    }
}

enum Value<'a> {
    Text(&'a str),
    Number(f64),
    Instant(&'a NaiveDateTime),
}

fn column_value(rec: &ContactRecord, column: Column) -> Option<Value<'_>> {
    match column {
        Column::Id | Column::CreatedAt => None,
        Column::MyCall => Some(Value::Text(&rec.my_call)),
        Column::ContactCall => Some(Value::Text(&rec.contact_call)),
        Column::Frequency => rec.frequency.map(Value::Number),
        Column::Band => Some(Value::Text(&rec.band)),
        Column::Mode => Some(Value::Text(&rec.mode)),
        Column::Timestamp => Some(Value::Instant(&rec.timestamp)),
        Column::RstSent => opt_text(&rec.rst_sent),
        Column::RstReceived => opt_text(&rec.rst_received),
        Column::Comment => opt_text(&rec.comment),
        Column::Qth => opt_text(&rec.qth),
        Column::Name => opt_text(&rec.name),
        Column::Power => rec.power.map(Value::Number),
        Column::GridLocator => Some(Value::Text(&rec.grid_locator)),
    }
}

/// Renders one contact as a single ADIF record line ending in `<EOR>\n`.
pub fn render_record(rec: &ContactRecord, options: &ExportOptions) -> String {
    let mut out = String::new();

    for column in Column::ALL {
        let Some(tag) = column.adif_tag() else {
            continue;
        };
        let Some(value) = column_value(rec, column) else {
            continue;
        };

        match (column, value) {
            (_, Value::Text("")) => {}
            (_, Value::Instant(ts)) => {
                push_field(&mut out, tag, &ts.format("%Y%m%d").to_string());
                push_field(&mut out, "TIME_ON", &ts.format("%H%M%S").to_string());
            }
            (Column::Frequency, Value::Number(mhz)) => {
                let text = format!("{mhz:.6}");
                let len = if options.measure_freq_length {
                    text.chars().count()
                } else {
                    LEGACY_FREQ_LENGTH
                };
                out.push_str(&format!("<{tag}:{len}>{text} "));
            }
            (_, Value::Number(n)) => push_field(&mut out, tag, &render_float(n)),
            (_, Value::Text(text)) => push_field(&mut out, tag, text),
        }
    }

    out.push_str("<EOR>\n");
    out
}

/// Writes a complete document: header, then one line per record.
pub fn write_adif<W: Write>(
    out: &mut W,
    header: &AdifHeader,
    records: &[ContactRecord],
    options: &ExportOptions,
) -> io::Result<()> {
    out.write_all(header.render().as_bytes())?;
    for rec in records {
        out.write_all(render_record(rec, options).as_bytes())?;
    }
    out.flush()
}

fn field(tag: &str, value: &str) -> String {
    format!("<{tag}:{}>{value}", value.chars().count())
}

fn push_field(out: &mut String, tag: &str, value: &str) {
    out.push_str(&field(tag, value));
    out.push(' ');
}

fn opt_text(value: &Option<String>) -> Option<Value<'_>> {
    value.as_deref().map(Value::Text)
}

// Whole numbers keep one decimal (`100.0`), matching files written so far.
fn render_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
