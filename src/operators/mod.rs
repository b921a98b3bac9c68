//! Operator table for predicate evaluation
//!
//! Maps `$`-notation operator symbols to binary comparison functions.
//! The table is owned by the engine instance, built with the standard
//! operators and optionally extended by the caller; there is no
//! process-wide mutable state.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::{QueryError, QueryResult};

/// A binary comparison: `(record value, comparand) -> bool`.
///
/// Operator functions must be pure; fallibility exists so that ordering
/// operators can surface type mismatches instead of swallowing them.
pub type OperatorFn = Arc<dyn Fn(&Value, &Value) -> QueryResult<bool> + Send + Sync>;

/// Symbol -> comparison function mapping, one per engine instance
#[derive(Clone)]
pub struct OperatorTable {
    ops: HashMap<String, OperatorFn>,
}

impl OperatorTable {
    /// Creates an empty table with no operators at all
    pub fn empty() -> Self {
        Self {
            ops: HashMap::new(),
        }
    }

    /// Registers an operator, replacing any previous binding for the symbol.
    ///
    /// Extending the table is part of the public contract:
    ///
    /// ```
    /// use memquery::OperatorTable;
    /// use serde_json::json;
    ///
    /// let mut table = OperatorTable::default();
    /// table.register("$strlen", |x, y| {
    ///     Ok(x.as_str().map(|s| s.len() as u64) == y.as_u64())
    /// });
    /// assert!(table.contains("$strlen"));
    /// ```
    pub fn register<F>(&mut self, symbol: impl Into<String>, op: F)
    where
        F: Fn(&Value, &Value) -> QueryResult<bool> + Send + Sync + 'static,
    {
        self.ops.insert(symbol.into(), Arc::new(op));
    }

    /// Looks up an operator by symbol
    pub fn get(&self, symbol: &str) -> Option<&OperatorFn> {
        self.ops.get(symbol)
    }

    /// Returns true if the symbol is registered
    pub fn contains(&self, symbol: &str) -> bool {
        self.ops.contains_key(symbol)
    }

    /// Returns the registered symbols in unspecified order
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.ops.keys().map(String::as_str)
    }
}

impl Default for OperatorTable {
    /// Builds the standard operator set
    fn default() -> Self {
        let mut table = Self::empty();
        table.register("$eq", |x, y| Ok(x == y));
        table.register("$neq", |x, y| Ok(x != y));
        table.register("$lt", |x, y| Ok(compare("$lt", x, y)?.is_lt()));
        table.register("$lte", |x, y| Ok(compare("$lte", x, y)?.is_le()));
        table.register("$gt", |x, y| Ok(compare("$gt", x, y)?.is_gt()));
        table.register("$gte", |x, y| Ok(compare("$gte", x, y)?.is_ge()));
        table.register("$in", |x, y| member_of("$in", x, y));
        table.register("$nin", |x, y| member_of("$nin", x, y).map(|m| !m));
        table
    }
}

impl std::fmt::Debug for OperatorTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut symbols: Vec<&str> = self.symbols().collect();
        symbols.sort_unstable();
        f.debug_struct("OperatorTable")
            .field("symbols", &symbols)
            .finish()
    }
}

/// Orders two values for the range operators.
///
/// Numbers order numerically (f64 first, i64 fallback for magnitudes f64
/// cannot hold exactly) and strings lexicographically. Any other pairing
/// is a type mismatch surfaced to the caller.
fn compare(operator: &str, left: &Value, right: &Value) -> QueryResult<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(af), Some(bf)) = (a.as_f64(), b.as_f64()) {
                if let Some(ord) = af.partial_cmp(&bf) {
                    return Ok(ord);
                }
            }
            if let (Some(ai), Some(bi)) = (a.as_i64(), b.as_i64()) {
                return Ok(ai.cmp(&bi));
            }
            Err(QueryError::type_mismatch(
                operator,
                type_name(left),
                type_name(right),
            ))
        }
        (Value::String(a), Value::String(b)) => Ok(a.as_str().cmp(b.as_str())),
        _ => Err(QueryError::type_mismatch(
            operator,
            type_name(left),
            type_name(right),
        )),
    }
}

/// Membership test for `$in`/`$nin`.
///
/// The comparand must be an array (element membership) or, when the record
/// value is also a string, a string (substring containment).
fn member_of(operator: &str, value: &Value, comparand: &Value) -> QueryResult<bool> {
    match comparand {
        Value::Array(items) => Ok(items.contains(value)),
        Value::String(haystack) => match value {
            Value::String(needle) => Ok(haystack.contains(needle.as_str())),
            _ => Err(QueryError::type_mismatch(
                operator,
                type_name(value),
                type_name(comparand),
            )),
        },
        _ => Err(QueryError::type_mismatch(
            operator,
            type_name(value),
            type_name(comparand),
        )),
    }
}

/// JSON type name for error messages
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eval(table: &OperatorTable, symbol: &str, x: Value, y: Value) -> QueryResult<bool> {
        table.get(symbol).expect("registered")(&x, &y)
    }

    #[test]
    fn test_standard_symbols_present() {
        let table = OperatorTable::default();
        for symbol in ["$eq", "$neq", "$lt", "$lte", "$gt", "$gte", "$in", "$nin"] {
            assert!(table.contains(symbol), "missing {}", symbol);
        }
        assert!(!table.contains("$bogus"));
    }

    #[test]
    fn test_eq_no_coercion() {
        let table = OperatorTable::default();
        assert!(eval(&table, "$eq", json!(123), json!(123)).unwrap());
        // String "123" must not match integer 123
        assert!(!eval(&table, "$eq", json!(123), json!("123")).unwrap());
        assert!(eval(&table, "$neq", json!(123), json!("123")).unwrap());
    }

    #[test]
    fn test_numeric_ordering() {
        let table = OperatorTable::default();
        assert!(eval(&table, "$lt", json!(19), json!(20)).unwrap());
        assert!(!eval(&table, "$lt", json!(20), json!(20)).unwrap());
        assert!(eval(&table, "$lte", json!(20), json!(20)).unwrap());
        assert!(eval(&table, "$gt", json!(240), json!(42)).unwrap());
        assert!(eval(&table, "$gte", json!(42), json!(42)).unwrap());
        // Mixed integer/float comparison is still numeric
        assert!(eval(&table, "$gte", json!(19.5), json!(10)).unwrap());
    }

    #[test]
    fn test_string_ordering() {
        let table = OperatorTable::default();
        assert!(eval(&table, "$lt", json!("apple"), json!("mango")).unwrap());
        assert!(eval(&table, "$gte", json!("zebra"), json!("zebra")).unwrap());
    }

    #[test]
    fn test_ordering_type_mismatch_is_error() {
        let table = OperatorTable::default();
        let err = eval(&table, "$lt", json!(10), json!("ten")).unwrap_err();
        assert!(matches!(err, QueryError::TypeMismatch { .. }));

        let err = eval(&table, "$gte", json!(null), json!(1)).unwrap_err();
        assert!(matches!(err, QueryError::TypeMismatch { .. }));
    }

    #[test]
    fn test_membership() {
        let table = OperatorTable::default();
        assert!(eval(&table, "$in", json!("earth"), json!(["earth", "mars"])).unwrap());
        assert!(!eval(&table, "$in", json!("pluto"), json!(["earth", "mars"])).unwrap());
        assert!(eval(&table, "$nin", json!("pluto"), json!(["earth", "mars"])).unwrap());
        // Substring containment when both sides are strings
        assert!(eval(&table, "$in", json!("art"), json!("earth")).unwrap());
    }

    #[test]
    fn test_membership_requires_container() {
        let table = OperatorTable::default();
        let err = eval(&table, "$in", json!(1), json!(2)).unwrap_err();
        assert!(matches!(err, QueryError::TypeMismatch { .. }));
    }

    #[test]
    fn test_register_custom_operator() {
        let mut table = OperatorTable::default();
        table.register("$mod_zero", |x, y| {
            match (x.as_i64(), y.as_i64()) {
                (Some(x), Some(y)) if y != 0 => Ok(x % y == 0),
                _ => Err(QueryError::type_mismatch(
                    "$mod_zero",
                    type_name(x),
                    type_name(y),
                )),
            }
        });
        assert!(eval(&table, "$mod_zero", json!(10), json!(5)).unwrap());
        assert!(!eval(&table, "$mod_zero", json!(10), json!(3)).unwrap());
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut table = OperatorTable::default();
        table.register("$eq", |_, _| Ok(true));
        assert!(eval(&table, "$eq", json!(1), json!(2)).unwrap());
    }
}
