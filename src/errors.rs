//! # Query Engine Errors
//!
//! Unified error taxonomy for predicate evaluation and input acquisition.
//! No error is swallowed or retried; every fault is surfaced synchronously
//! to the caller of the failing operation.

use thiserror::Error;

/// Result type for engine operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Query engine errors
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// Predicate references an operator symbol absent from the table.
    /// Fail-fast: aborts the whole query, never a silent non-match.
    #[error("'{0}' is not a valid operator")]
    UnknownOperator(String),

    /// Predicate references a field absent from a record under evaluation.
    /// Usually indicates a predicate/schema mismatch the caller should see.
    #[error("record has no field '{field}'")]
    MissingField { field: String },

    /// An ordering or membership operator was applied to incomparable types
    #[error("operator '{operator}' cannot be applied to {left} and {right}")]
    TypeMismatch {
        operator: String,
        left: &'static str,
        right: &'static str,
    },

    /// Input was neither a record sequence, a parseable document, nor a
    /// readable path. Raised at construction time, before any query runs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Engine-side failure (e.g. the worker pool could not be started)
    #[error("internal error: {0}")]
    Internal(String),
}

impl QueryError {
    /// Create an unknown operator error
    pub fn unknown_operator(symbol: impl Into<String>) -> Self {
        Self::UnknownOperator(symbol.into())
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        operator: impl Into<String>,
        left: &'static str,
        right: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            operator: operator.into(),
            left,
            right,
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_operator_display() {
        let err = QueryError::unknown_operator("$bogus");
        assert_eq!(err.to_string(), "'$bogus' is not a valid operator");
    }

    #[test]
    fn test_missing_field_display() {
        let err = QueryError::missing_field("age");
        assert_eq!(err.to_string(), "record has no field 'age'");
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = QueryError::type_mismatch("$lt", "number", "string");
        assert_eq!(
            err.to_string(),
            "operator '$lt' cannot be applied to number and string"
        );
    }
}
