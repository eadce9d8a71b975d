/// SQLite-backed store.
pub mod sqlite;

use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    qso::{ContactDraft, ContactRecord, StationConfig},
    types::ContactId,
};

/// Storage failure.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Underlying SQLite error.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored row could not be decoded.
    #[error("corrupt row: {0}")]
    Corrupt(String),
    /// Any other store failure.
    #[error("{0}")]
    Message(String),
}

/// Result alias for store operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Contact and station-config storage. Each call is a self-contained unit
/// of work; nothing is held open between calls.
pub trait ContactStore {
    /// Inserts a contact and returns its assigned id.
    fn insert_contact(&mut self, draft: &ContactDraft) -> PersistResult<ContactId>;
    /// All contacts in insertion order.
    fn select_all(&self) -> PersistResult<Vec<ContactRecord>>;
    /// All contacts, most recent contact time first.
    fn select_by_timestamp_desc(&self) -> PersistResult<Vec<ContactRecord>>;
    /// Looks up one contact by id.
    fn get_contact(&self, id: ContactId) -> PersistResult<Option<ContactRecord>>;
    /// Contacts whose creation date is `date` (UTC), newest creation first.
    fn select_created_on(&self, date: NaiveDate) -> PersistResult<Vec<ContactRecord>>;
    /// Number of contacts with `contact_call` whose timestamp starts with
    /// `timestamp_prefix`.
    fn count_matching(&self, contact_call: &str, timestamp_prefix: &str) -> PersistResult<u64>;
    /// Most recently saved station config, if any.
    fn latest_station_config(&self) -> PersistResult<Option<StationConfig>>;
    /// Appends a station config; it becomes the active one.
    fn insert_station_config(&mut self, config: &StationConfig) -> PersistResult<()>;

    /// Active station config, or the empty default when none was saved.
    fn station_config(&self) -> PersistResult<StationConfig> {
        Ok(self.latest_station_config()?.unwrap_or_default())
    }
}
