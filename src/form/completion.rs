use crate::error::FormError;

use super::{header::HEADER_FIELDS, store::FormStore};

/// Required keys still empty in the store, in fixed check order.
///
/// Only the header fields are consulted; display defaults do not count.
pub fn missing_required(store: &FormStore) -> Vec<String> {
    HEADER_FIELDS
        .iter()
        .filter(|header| store.get(header.key).is_empty())
        .map(|header| header.label().to_string())
        .collect()
}

pub fn check_required(store: &FormStore) -> Result<(), FormError> {
    let missing = missing_required(store);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FormError::MissingRequiredFields(missing))
    }
}
