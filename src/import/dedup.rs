use chrono::NaiveDateTime;

use crate::{
    persist::{ContactStore, PersistResult},
    types::format_timestamp,
};

/// True when the store already holds `contact_call` at `timestamp`,
/// compared to the second.
pub fn is_duplicate<S: ContactStore + ?Sized>(
    store: &S,
    contact_call: &str,
    timestamp: &NaiveDateTime,
) -> PersistResult<bool> {
    let prefix = format_timestamp(timestamp);
    Ok(store.count_matching(contact_call, &prefix)? > 0)
}
