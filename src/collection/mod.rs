//! Collection wrapper
//!
//! Thin wrapper over the record sequence: indexed access, length, and
//! the `query(...)` entry points. A collection owns its records, its
//! operator table, and its execution mode; query results are re-wrapped
//! as a new collection by default, or returned as bare records.

use std::ops::Index;

use crate::errors::QueryResult;
use crate::matcher::Predicate;
use crate::observability::Logger;
use crate::operators::OperatorTable;
use crate::scanner::{self, ExecutionMode};
use crate::source::{records_from_json, records_from_path, RowSource};
use crate::Record;

/// Per-query options
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryOptions {
    /// Maximum number of matches to return; `None` returns them all
    pub limit: Option<usize>,
}

impl QueryOptions {
    /// Options with a result-count limit
    pub fn limited(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

/// An in-memory record collection with Mongo-flavored querying
#[derive(Debug, Clone)]
pub struct Collection {
    records: Vec<Record>,
    operators: OperatorTable,
    mode: ExecutionMode,
}

impl Collection {
    /// Wraps an already-constructed record sequence
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records,
            operators: OperatorTable::default(),
            mode: ExecutionMode::default(),
        }
    }

    /// Parses a serialized JSON array of objects
    pub fn from_json(text: &str) -> QueryResult<Self> {
        Ok(Self::from_records(records_from_json(text)?))
    }

    /// Reads and parses a JSON file on disk
    pub fn from_path(path: impl AsRef<std::path::Path>) -> QueryResult<Self> {
        Ok(Self::from_records(records_from_path(path)?))
    }

    /// Drains a row-iterable tabular source into a collection
    pub fn from_rows(source: impl RowSource) -> QueryResult<Self> {
        Ok(Self::from_records(source.into_records()?))
    }

    /// Selects the execution mode for queries on this collection
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replaces the operator table
    pub fn with_operators(mut self, operators: OperatorTable) -> Self {
        self.operators = operators;
        self
    }

    /// Mutable access to the operator table, for registering operators
    pub fn operators_mut(&mut self) -> &mut OperatorTable {
        &mut self.operators
    }

    /// The operator table used by queries on this collection
    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    /// The execution mode used by queries on this collection
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Iterates the records in order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// The underlying record sequence
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the collection, returning the bare record sequence
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Queries the collection, re-wrapping the matches as a new
    /// collection with the same operator table and mode
    pub fn query(&self, predicate: &Predicate) -> QueryResult<Collection> {
        self.query_with(predicate, QueryOptions::default())
    }

    /// Queries with options (result-count limit)
    pub fn query_with(
        &self,
        predicate: &Predicate,
        options: QueryOptions,
    ) -> QueryResult<Collection> {
        let records = self.query_records(predicate, options)?;
        Ok(Collection {
            records,
            operators: self.operators.clone(),
            mode: self.mode,
        })
    }

    /// Queries without re-wrapping, returning the bare matched records.
    ///
    /// In sequential mode the scan stops as soon as the limit is
    /// reached. In parallel mode every record is evaluated first and
    /// the limit truncates the filtered output afterwards; this
    /// divergence is deliberate (see the scanner module docs).
    pub fn query_records(
        &self,
        predicate: &Predicate,
        options: QueryOptions,
    ) -> QueryResult<Vec<Record>> {
        let matched = match self.mode {
            ExecutionMode::Sequential => {
                let indices =
                    scanner::scan(&self.records, predicate, &self.operators, options.limit)?;
                indices
                    .into_iter()
                    .map(|i| self.records[i].clone())
                    .collect::<Vec<Record>>()
            }
            ExecutionMode::Parallel { workers } => {
                let outcomes =
                    scanner::evaluate_parallel(&self.records, predicate, &self.operators, workers)?;
                self.records
                    .iter()
                    .zip(outcomes)
                    .filter(|(_, matched)| *matched)
                    .map(|(record, _)| record.clone())
                    .take(options.limit.unwrap_or(usize::MAX))
                    .collect()
            }
        };

        Logger::trace(
            "query_complete",
            &[
                ("matched", matched.len().to_string()),
                ("mode", self.mode.as_str().to_string()),
                ("total", self.records.len().to_string()),
            ],
        );
        Ok(matched)
    }

    /// Evaluates the predicate for every record, returning the boolean
    /// vector aligned index-for-index with the records.
    ///
    /// Uses the worker pool when the collection is in parallel mode and
    /// an ordered scan otherwise.
    pub fn evaluate(&self, predicate: &Predicate) -> QueryResult<Vec<bool>> {
        match self.mode {
            ExecutionMode::Parallel { workers } => {
                scanner::evaluate_parallel(&self.records, predicate, &self.operators, workers)
            }
            ExecutionMode::Sequential => self
                .records
                .iter()
                .map(|record| predicate.matches(record, &self.operators))
                .collect(),
        }
    }
}

impl Index<usize> for Collection {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
