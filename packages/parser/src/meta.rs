//! Metadata projection.

use crate::types::{Metadata, RawDocumentRecord};

/// Copy the allowlisted source fields present in `record`.
///
/// Fields missing from the record are omitted, not emitted as null. A field
/// present with a null value is kept as null.
#[must_use]
pub fn project_metadata(record: &RawDocumentRecord, fields: &[String]) -> Metadata {
    fields
        .iter()
        .filter_map(|key| record.get(key).map(|value| (key.clone(), value.clone())))
        .collect()
}
