//! Parallel record evaluation
//!
//! Distributes per-record matching across a rayon worker pool. Matching
//! is read-only and side-effect-free by contract, so workers share the
//! record slice, predicate, and operator table without locks; each
//! worker produces results for a disjoint index range and the caller
//! joins on the whole pool before reading the consolidated vector.

use rayon::prelude::*;

use crate::errors::{QueryError, QueryResult};
use crate::matcher::Predicate;
use crate::operators::OperatorTable;
use crate::Record;

/// Evaluates the predicate for every record concurrently.
///
/// The returned vector is aligned index-for-index with `records`:
/// `result[i]` is the match outcome for `records[i]`. Every record is
/// evaluated, even when the caller truncates the filtered output
/// afterwards. The first evaluation error aborts the query.
///
/// `workers: None` runs on the process-wide rayon pool; `Some(n)` builds
/// a dedicated pool of `n` threads for this call.
pub fn evaluate_parallel(
    records: &[Record],
    predicate: &Predicate,
    table: &OperatorTable,
    workers: Option<usize>,
) -> QueryResult<Vec<bool>> {
    let evaluate = || {
        records
            .par_iter()
            .map(|record| predicate.matches(record, table))
            .collect::<QueryResult<Vec<bool>>>()
    };

    match workers {
        None => evaluate(),
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| QueryError::Internal(format!("worker pool: {}", e)))?;
            pool.install(evaluate)
        }
    }
}
