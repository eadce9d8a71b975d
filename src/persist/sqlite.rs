//! SQLite-backed contact store.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

use crate::{
    qso::{ContactDraft, ContactRecord, StationConfig},
    types::{ContactId, TIMESTAMP_LEN, format_date, format_timestamp, parse_timestamp},
};

use super::{ContactStore, PersistError, PersistResult};

const CONTACT_COLUMNS: &str = "id, my_call, contact_call, frequency, band, mode, timestamp, \
     rst_sent, rst_received, comment, qth, name, power, grid_locator, created_at";

/// SQLite implementation of [`crate::persist::ContactStore`].
///
/// Writes run in their own transaction, rolled back when dropped on an
/// error path. Reads are single statements.
pub struct SqliteContactStore {
    conn: Connection,
}

// Row as stored, before timestamp decoding.
struct ContactRow {
    id: ContactId,
    my_call: String,
    contact_call: String,
    frequency: Option<f64>,
    band: String,
    mode: String,
    timestamp: String,
    rst_sent: Option<String>,
    rst_received: Option<String>,
    comment: Option<String>,
    qth: Option<String>,
    name: Option<String>,
    power: Option<f64>,
    grid_locator: Option<String>,
    created_at: Option<String>,
}

impl SqliteContactStore {
    /// Opens or creates the logbook database at `path`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened logbook database");
        Self::init_connection(conn)
    }

    /// Opens an in-memory logbook.
    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    fn query_contacts(
        &self,
        sql: &str,
        args: impl rusqlite::Params,
    ) -> PersistResult<Vec<ContactRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, read_contact_row)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(decode_contact(row?)?);
        }
        Ok(out)
    }
}

impl ContactStore for SqliteContactStore {
    fn insert_contact(&mut self, draft: &ContactDraft) -> PersistResult<ContactId> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO logbook \
             (my_call, contact_call, frequency, band, mode, timestamp, \
              rst_sent, rst_received, comment, qth, name, power, grid_locator) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                draft.my_call,
                draft.contact_call,
                draft.frequency,
                draft.band,
                draft.mode,
                format_timestamp(&draft.timestamp),
                draft.rst_sent,
                draft.rst_received,
                draft.comment,
                draft.qth,
                draft.name,
                draft.power,
                draft.grid_locator,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    fn select_all(&self) -> PersistResult<Vec<ContactRecord>> {
        self.query_contacts(
            &format!("SELECT {CONTACT_COLUMNS} FROM logbook ORDER BY id ASC"),
            [],
        )
    }

    fn select_by_timestamp_desc(&self) -> PersistResult<Vec<ContactRecord>> {
        self.query_contacts(
            &format!("SELECT {CONTACT_COLUMNS} FROM logbook ORDER BY timestamp DESC, id DESC"),
            [],
        )
    }

    fn get_contact(&self, id: ContactId) -> PersistResult<Option<ContactRecord>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {CONTACT_COLUMNS} FROM logbook WHERE id = ?1"),
                params![id],
                read_contact_row,
            )
            .optional()?;
        row.map(decode_contact).transpose()
    }

    fn select_created_on(&self, date: NaiveDate) -> PersistResult<Vec<ContactRecord>> {
        self.query_contacts(
            &format!(
                "SELECT {CONTACT_COLUMNS} FROM logbook WHERE date(created_at) = ?1 \
                 ORDER BY created_at DESC, id DESC"
            ),
            params![format_date(&date)],
        )
    }

    fn count_matching(&self, contact_call: &str, timestamp_prefix: &str) -> PersistResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM logbook \
             WHERE contact_call = ?1 AND substr(timestamp, 1, ?3) = substr(?2, 1, ?3)",
            params![contact_call, timestamp_prefix, TIMESTAMP_LEN as i64],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn latest_station_config(&self) -> PersistResult<Option<StationConfig>> {
        let config = self
            .conn
            .query_row(
                "SELECT my_call, power, location, grid_locator, antenna, equipment \
                 FROM station_config ORDER BY id DESC LIMIT 1",
                [],
                |row| {
                    let text = |idx: usize| -> rusqlite::Result<String> {
                        Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
                    };
                    Ok(StationConfig {
                        my_call: text(0)?,
                        power: text(1)?,
                        location: text(2)?,
                        grid_locator: text(3)?,
                        antenna: text(4)?,
                        equipment: text(5)?,
                    })
                },
            )
            .optional()?;
        Ok(config)
    }

    fn insert_station_config(&mut self, config: &StationConfig) -> PersistResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO station_config \
             (my_call, power, location, grid_locator, antenna, equipment) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                config.my_call,
                config.power,
                config.location,
                config.grid_locator,
                config.antenna,
                config.equipment,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }
}

fn read_contact_row(row: &Row<'_>) -> rusqlite::Result<ContactRow> {
    Ok(ContactRow {
        id: row.get(0)?,
        my_call: row.get(1)?,
        contact_call: row.get(2)?,
        frequency: row.get(3)?,
        band: row.get(4)?,
        mode: row.get(5)?,
        timestamp: row.get(6)?,
        rst_sent: row.get(7)?,
        rst_received: row.get(8)?,
        comment: row.get(9)?,
        qth: row.get(10)?,
        name: row.get(11)?,
        power: row.get(12)?,
        grid_locator: row.get(13)?,
        created_at: row.get(14)?,
    })
}

fn decode_contact(row: ContactRow) -> PersistResult<ContactRecord> {
    let timestamp = parse_timestamp(&row.timestamp).ok_or_else(|| {
        PersistError::Corrupt(format!("contact {} timestamp `{}`", row.id, row.timestamp))
    })?;
    let created_raw = row.created_at.unwrap_or_default();
    let created_at = parse_timestamp(&created_raw).ok_or_else(|| {
        PersistError::Corrupt(format!("contact {} created_at `{created_raw}`", row.id))
    })?;

    let draft = ContactDraft {
        my_call: row.my_call,
        contact_call: row.contact_call,
        frequency: row.frequency,
        band: row.band,
        mode: row.mode,
        timestamp,
        rst_sent: row.rst_sent,
        rst_received: row.rst_received,
        comment: row.comment,
        qth: row.qth,
        name: row.name,
        power: row.power,
        grid_locator: row.grid_locator.unwrap_or_default(),
    };
    Ok(draft.into_record(row.id, created_at))
}
