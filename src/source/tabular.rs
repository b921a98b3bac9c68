//! Tabular row adapter
//!
//! Adapts external tabular structures (rows + column names) into the
//! record sequence the engine works on. The engine's only contract with
//! a source is that it yields field -> value mappings; after adaptation
//! all records are treated uniformly.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::errors::{QueryError, QueryResult};
use crate::Record;

/// A row-iterable tabular structure that can be drained into records
pub trait RowSource {
    /// Consumes the source and yields its rows as records, in row order
    fn into_records(self) -> QueryResult<Vec<Record>>;
}

/// Already-constructed records are trivially a row source
impl RowSource for Vec<Record> {
    fn into_records(self) -> QueryResult<Vec<Record>> {
        Ok(self)
    }
}

/// CSV-backed tabular source.
///
/// The header row supplies field names; each data row becomes one
/// record. Cell values are typed the same way filter values are:
/// `null`, booleans, and numbers are recognized, everything else stays
/// a string.
#[derive(Debug)]
pub struct CsvTable<R> {
    reader: csv::Reader<R>,
}

impl CsvTable<File> {
    /// Opens a CSV file on disk
    pub fn open(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            QueryError::invalid_input(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> CsvTable<R> {
    /// Wraps any reader producing CSV with a header row
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: csv::Reader::from_reader(reader),
        }
    }
}

impl<R: Read> RowSource for CsvTable<R> {
    fn into_records(mut self) -> QueryResult<Vec<Record>> {
        let headers = self
            .reader
            .headers()
            .map_err(|e| QueryError::invalid_input(format!("invalid CSV header: {}", e)))?
            .clone();

        let mut records = Vec::new();
        for row in self.reader.into_records() {
            let row =
                row.map_err(|e| QueryError::invalid_input(format!("invalid CSV row: {}", e)))?;
            let mut record = Record::new();
            for (field, cell) in headers.iter().zip(row.iter()) {
                record.insert(field.to_string(), typed_cell(cell));
            }
            records.push(record);
        }
        Ok(records)
    }
}

/// Infers a JSON value from a CSV cell
fn typed_cell(cell: &str) -> Value {
    match cell {
        "null" | "" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(n) = cell.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = cell.parse::<f64>() {
        if let Some(num) = serde_json::Number::from_f64(n) {
            return Value::Number(num);
        }
    }

    Value::String(cell.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_csv_rows_become_records() {
        let csv = "id,age,planet\nABC,42,earth\nDE2,19,earth\n123,240,Brontitall\n";
        let records = CsvTable::from_reader(csv.as_bytes()).into_records().unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["id"], json!("ABC"));
        assert_eq!(records[0]["age"], json!(42));
        assert_eq!(records[2]["planet"], json!("Brontitall"));
    }

    #[test]
    fn test_cell_typing() {
        assert_eq!(typed_cell("null"), json!(null));
        assert_eq!(typed_cell(""), json!(null));
        assert_eq!(typed_cell("true"), json!(true));
        assert_eq!(typed_cell("false"), json!(false));
        assert_eq!(typed_cell("42"), json!(42));
        assert_eq!(typed_cell("2.5"), json!(2.5));
        assert_eq!(typed_cell("earth"), json!("earth"));
    }

    #[test]
    fn test_vec_of_records_is_a_row_source() {
        let rows: Vec<Record> = vec![Record::new(), Record::new()];
        assert_eq!(rows.into_records().unwrap().len(), 2);
    }

    #[test]
    fn test_ragged_row_is_invalid() {
        let csv = "id,age\nABC,42\nDE2\n";
        let err = CsvTable::from_reader(csv.as_bytes())
            .into_records()
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidInput(_)));
    }
}
