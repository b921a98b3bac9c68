//! Predicate representation and per-record evaluation
//!
//! Qualifier shape (literal vs. operator clause vs. test function) is
//! resolved once, when the predicate is built, instead of being
//! re-inspected for every record.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::{QueryError, QueryResult};
use crate::operators::OperatorTable;
use crate::Record;

/// A caller-supplied test applied to a record's field value.
///
/// Must be side-effect-free; the engine documents but does not enforce
/// this precondition.
pub type TestFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// What a predicate field matches against
#[derive(Clone)]
pub enum Qualifier {
    /// Exact equality with a literal value, no coercion
    Literal(Value),
    /// Operator symbol -> comparand pairs, all conjoined
    Clause(Vec<(String, Value)>),
    /// Caller-supplied test function over the field value
    Test(TestFn),
}

impl fmt::Debug for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qualifier::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Qualifier::Clause(ops) => f.debug_tuple("Clause").field(ops).finish(),
            Qualifier::Test(_) => f.write_str("Test(..)"),
        }
    }
}

/// A declarative filter: field -> qualifier pairs, all conjoined
#[derive(Debug, Clone, Default)]
pub struct Predicate {
    fields: Vec<(String, Qualifier)>,
}

impl Predicate {
    /// Creates an empty predicate (matches every record)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a predicate from a Mongo-flavored JSON mapping.
    ///
    /// Each top-level entry becomes one field qualifier: an object value
    /// is read as an operator clause (`{"age": {"$gte": 10, "$lte": 20}}`),
    /// anything else as a literal equality match. Test functions have no
    /// JSON form and are attached with [`Predicate::test`].
    ///
    /// Operator symbols are not checked here: the table is owned by the
    /// engine and may be extended after the predicate is built, so an
    /// unknown symbol surfaces at evaluation time instead.
    pub fn from_value(value: Value) -> QueryResult<Self> {
        let Value::Object(mapping) = value else {
            return Err(QueryError::invalid_input(
                "predicate must be a JSON object",
            ));
        };

        let mut predicate = Self::new();
        for (field, qualifier) in mapping {
            let qualifier = match qualifier {
                Value::Object(clause) => Qualifier::Clause(clause.into_iter().collect()),
                literal => Qualifier::Literal(literal),
            };
            predicate.fields.push((field, qualifier));
        }
        Ok(predicate)
    }

    /// Adds a field qualifier
    pub fn with_field(mut self, field: impl Into<String>, qualifier: Qualifier) -> Self {
        self.fields.push((field.into(), qualifier));
        self
    }

    /// Adds a literal equality qualifier
    pub fn literal(self, field: impl Into<String>, value: Value) -> Self {
        self.with_field(field, Qualifier::Literal(value))
    }

    /// Adds one operator to the field's clause, creating the clause if the
    /// field is not present yet
    pub fn op(
        mut self,
        field: impl Into<String>,
        symbol: impl Into<String>,
        comparand: Value,
    ) -> Self {
        let field = field.into();
        let entry = (symbol.into(), comparand);
        let existing = self
            .fields
            .iter()
            .position(|(name, qualifier)| *name == field && matches!(qualifier, Qualifier::Clause(_)));
        match existing {
            Some(i) => {
                if let Qualifier::Clause(ops) = &mut self.fields[i].1 {
                    ops.push(entry);
                }
            }
            None => self.fields.push((field, Qualifier::Clause(vec![entry]))),
        }
        self
    }

    /// Adds a test-function qualifier
    pub fn test<F>(self, field: impl Into<String>, test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.with_field(field, Qualifier::Test(Arc::new(test)))
    }

    /// Returns the field qualifiers in predicate order
    pub fn fields(&self) -> &[(String, Qualifier)] {
        &self.fields
    }

    /// Returns true if the predicate has no qualifiers
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Evaluates this predicate against a single record.
    ///
    /// Short-circuits on the first failing qualifier; later fields and
    /// later operators within a clause are not evaluated.
    pub fn matches(&self, record: &Record, table: &OperatorTable) -> QueryResult<bool> {
        for (field, qualifier) in &self.fields {
            let value = record
                .get(field)
                .ok_or_else(|| QueryError::missing_field(field.as_str()))?;

            match qualifier {
                Qualifier::Clause(ops) => {
                    for (symbol, comparand) in ops {
                        let op = table
                            .get(symbol)
                            .ok_or_else(|| QueryError::unknown_operator(symbol.as_str()))?;
                        if !op(value, comparand)? {
                            return Ok(false);
                        }
                    }
                }
                Qualifier::Test(test) => {
                    if !test(value) {
                        return Ok(false);
                    }
                }
                Qualifier::Literal(literal) => {
                    if value != literal {
                        return Ok(false);
                    }
                }
            }
        }
        Ok(true)
    }
}
