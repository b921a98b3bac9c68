//! Input acquisition
//!
//! Turns caller-supplied data into a record sequence before any query
//! runs: already-constructed records, serialized JSON documents, JSON
//! files on disk, or row-iterable tabular structures. Everything that
//! is not an array of objects (or a readable path to one) is an
//! `InvalidInput` error at construction time.

mod json;
mod tabular;

pub use json::{records_from_json, records_from_path};
pub use tabular::{CsvTable, RowSource};
