use super::RecordError;
use crate::adif::AdifFields;

/// Tags every importable record must carry.
pub const REQUIRED_TAGS: [&str; 5] = ["CALL", "BAND", "MODE", "QSO_DATE", "TIME_ON"];

/// Required tags absent from `fields`, in [`REQUIRED_TAGS`] order.
pub fn missing_required(fields: &AdifFields) -> Vec<&'static str> {
    REQUIRED_TAGS
        .iter()
        .copied()
        .filter(|tag| !fields.contains_key(*tag))
        .collect()
}

/// Rejects a record lacking any required tag.
pub fn validate(fields: &AdifFields) -> Result<(), RecordError> {
    let missing = missing_required(fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(RecordError::Validation { missing })
    }
}
