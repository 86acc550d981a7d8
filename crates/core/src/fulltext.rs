//! Case-insensitive substring search over all text in a record.

use crate::record::Record;
use metacat_record::{Document, RecordError};

/// True when any text node or attribute value contains `term`, ignoring case.
/// An empty term matches any document holding at least one of either.
pub fn matches(document: &Document, term: &str) -> bool {
    let needle = term.to_lowercase();
    document
        .text_values()
        .into_iter()
        .any(|value| value.to_lowercase().contains(&needle))
}

/// [`matches`] for a record that may not be parsed yet.
pub fn matches_record(record: &Record, term: &str) -> Result<bool, RecordError> {
    Ok(matches(record.document()?, term))
}
