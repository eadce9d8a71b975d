use chrono::{NaiveDate, NaiveDateTime, Timelike, Utc};
use hashbrown::HashMap;

use crate::{
    persist::{ContactStore, PersistResult},
    qso::{ContactDraft, ContactRecord, StationConfig},
    types::{ContactId, TIMESTAMP_LEN, format_timestamp},
};

/// In-memory [`ContactStore`] with a by-callsign index.
#[derive(Debug)]
pub struct MemoryContactStore {
    records: HashMap<ContactId, ContactRecord>,
    order: Vec<ContactId>,
    by_call: HashMap<String, Vec<ContactId>>,
    station_history: Vec<StationConfig>,
    next_id: ContactId,
    clock: fn() -> NaiveDateTime,
}

impl Default for MemoryContactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryContactStore {
    /// Empty store stamping inserts with the current UTC time.
    pub fn new() -> Self {
        Self::with_clock(utc_now)
    }

    /// Uses `clock` to stamp `created_at` on insert.
    pub fn with_clock(clock: fn() -> NaiveDateTime) -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
            by_call: HashMap::new(),
            station_history: Vec::new(),
            next_id: 1,
            clock,
        }
    }

    /// Number of stored contacts.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no contacts are stored.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Contacts with exactly `contact_call`, in insertion order.
    pub fn by_call(&self, contact_call: &str) -> Vec<&ContactRecord> {
        self.by_call
            .get(contact_call)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    fn ordered(&self) -> impl Iterator<Item = &ContactRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }
}

impl ContactStore for MemoryContactStore {
    fn insert_contact(&mut self, draft: &ContactDraft) -> PersistResult<ContactId> {
        let id = self.next_id;
        self.next_id += 1;

        let rec = draft.clone().into_record(id, (self.clock)());
        self.by_call
            .entry(rec.contact_call.clone())
            .or_default()
            .push(id);
        self.order.push(id);
        self.records.insert(id, rec);
        Ok(id)
    }

    fn select_all(&self) -> PersistResult<Vec<ContactRecord>> {
        Ok(self.ordered().cloned().collect())
    }

    fn select_by_timestamp_desc(&self) -> PersistResult<Vec<ContactRecord>> {
        let mut out: Vec<ContactRecord> = self.ordered().cloned().collect();
        out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    fn get_contact(&self, id: ContactId) -> PersistResult<Option<ContactRecord>> {
        Ok(self.records.get(&id).cloned())
    }

    fn select_created_on(&self, date: NaiveDate) -> PersistResult<Vec<ContactRecord>> {
        let mut out: Vec<ContactRecord> = self
            .ordered()
            .filter(|rec| rec.created_at.date() == date)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    fn count_matching(&self, contact_call: &str, timestamp_prefix: &str) -> PersistResult<u64> {
        let prefix = timestamp_prefix
            .get(..TIMESTAMP_LEN)
            .unwrap_or(timestamp_prefix);
        let count = self
            .by_call(contact_call)
            .into_iter()
            .filter(|rec| format_timestamp(&rec.timestamp) == prefix)
            .count();
        Ok(count as u64)
    }

    fn latest_station_config(&self) -> PersistResult<Option<StationConfig>> {
        Ok(self.station_history.last().cloned())
    }

    fn insert_station_config(&mut self, config: &StationConfig) -> PersistResult<()> {
        self.station_history.push(config.clone());
        Ok(())
    }
}

fn utc_now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}
