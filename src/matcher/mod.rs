//! Record matcher subsystem
//!
//! Evaluates one predicate against one record, producing a boolean.
//!
//! # Evaluation contract
//!
//! - All predicate fields are combined with AND; all operator clauses
//!   under one field are combined with AND.
//! - Evaluation short-circuits on the first failing qualifier.
//! - A field absent from the record is a `MissingField` error, not a
//!   silent non-match.
//! - An operator symbol absent from the table is an `UnknownOperator`
//!   error that aborts the whole query.
//! - Matching is a pure function of predicate and record; neither is
//!   mutated.

mod predicate;

pub use predicate::{Predicate, Qualifier, TestFn};
