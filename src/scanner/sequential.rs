//! Sequential collection scan

use crate::errors::QueryResult;
use crate::matcher::Predicate;
use crate::operators::OperatorTable;
use crate::Record;

/// Scans records in original order, returning the indices of matches.
///
/// Stops scanning as soon as `limit` matches have been found; records
/// past that point are never evaluated. The first evaluation error
/// aborts the scan.
pub fn scan(
    records: &[Record],
    predicate: &Predicate,
    table: &OperatorTable,
    limit: Option<usize>,
) -> QueryResult<Vec<usize>> {
    let mut matched = Vec::new();
    if limit == Some(0) {
        return Ok(matched);
    }

    for (index, record) in records.iter().enumerate() {
        if predicate.matches(record, table)? {
            matched.push(index);
            if limit.is_some_and(|k| matched.len() >= k) {
                break;
            }
        }
    }
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QueryError;
    use serde_json::json;

    fn ages(values: &[i64]) -> Vec<Record> {
        values
            .iter()
            .map(|age| match json!({ "age": age }) {
                serde_json::Value::Object(map) => map,
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn test_scan_preserves_order() {
        let records = ages(&[42, 19, 240, 12]);
        let table = OperatorTable::default();
        let predicate = Predicate::from_value(json!({"age": {"$lte": 50}})).unwrap();

        let matched = scan(&records, &predicate, &table, None).unwrap();
        assert_eq!(matched, vec![0, 1, 3]);
    }

    #[test]
    fn test_scan_stops_at_limit() {
        let records = ages(&[42, 19, 240, 12]);
        let table = OperatorTable::default();
        let predicate = Predicate::from_value(json!({"age": {"$lte": 50}})).unwrap();

        let matched = scan(&records, &predicate, &table, Some(2)).unwrap();
        assert_eq!(matched, vec![0, 1]);
    }

    #[test]
    fn test_scan_limit_short_circuits_evaluation() {
        // The third record would error (missing field), but the limit is
        // reached before it is ever evaluated.
        let mut records = ages(&[42, 19]);
        records.push(Record::new());
        let table = OperatorTable::default();
        let predicate = Predicate::from_value(json!({"age": {"$lte": 50}})).unwrap();

        let matched = scan(&records, &predicate, &table, Some(2)).unwrap();
        assert_eq!(matched, vec![0, 1]);

        // Without the limit, the same scan surfaces the error.
        let err = scan(&records, &predicate, &table, None).unwrap_err();
        assert!(matches!(err, QueryError::MissingField { .. }));
    }

    #[test]
    fn test_scan_limit_zero_matches_nothing() {
        let records = ages(&[42, 19]);
        let table = OperatorTable::default();
        let predicate = Predicate::new();

        let matched = scan(&records, &predicate, &table, Some(0)).unwrap();
        assert!(matched.is_empty());
    }
}
