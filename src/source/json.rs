//! JSON document acquisition

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::errors::{QueryError, QueryResult};
use crate::Record;

/// Parses a serialized JSON array of objects into records.
///
/// The document must be an array and every element must be an object;
/// anything else is `InvalidInput`.
pub fn records_from_json(text: &str) -> QueryResult<Vec<Record>> {
    let document: Value = serde_json::from_str(text)
        .map_err(|e| QueryError::invalid_input(format!("not a parseable JSON document: {}", e)))?;

    let Value::Array(items) = document else {
        return Err(QueryError::invalid_input(
            "JSON document must be an array of objects",
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(QueryError::invalid_input(format!(
                "element {} is {}, expected an object",
                index,
                crate::operators::type_name(&other)
            ))),
        })
        .collect()
}

/// Reads a JSON file from disk and parses it into records
pub fn records_from_path(path: impl AsRef<Path>) -> QueryResult<Vec<Record>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        QueryError::invalid_input(format!("cannot read '{}': {}", path.display(), e))
    })?;
    records_from_json(&text)
}
