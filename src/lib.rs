//! memquery - in-memory Mongo-flavored queries over JSON records
//!
//! Query collections of records (field -> JSON value mappings) already held
//! in memory, using `$`-notation predicates, without a database.
//!
//! ```
//! use memquery::{Collection, Predicate};
//! use serde_json::json;
//!
//! let data = Collection::from_json(r#"[
//!     {"_id": "ABC", "name": "Arthur Dent", "age": 42, "current_planet": "earth"},
//!     {"_id": "DE2", "name": "Penny Lane", "age": 19, "current_planet": "earth"},
//!     {"_id": "123", "name": "Ford Prefect", "age": 240, "current_planet": "Brontitall"}
//! ]"#).unwrap();
//!
//! let predicate = Predicate::from_value(json!({
//!     "current_planet": "earth",
//!     "age": {"$lte": 20, "$gte": 10}
//! })).unwrap();
//!
//! let teenage_earthlings = data.query(&predicate).unwrap();
//! assert_eq!(teenage_earthlings.len(), 1);
//! assert_eq!(teenage_earthlings[0]["name"], json!("Penny Lane"));
//! ```

pub mod collection;
pub mod errors;
pub mod matcher;
pub mod observability;
pub mod operators;
pub mod scanner;
pub mod source;

pub use collection::{Collection, QueryOptions};
pub use errors::{QueryError, QueryResult};
pub use matcher::{Predicate, Qualifier};
pub use operators::OperatorTable;
pub use scanner::ExecutionMode;
pub use source::{CsvTable, RowSource};

/// One item in a queried collection: a field -> value mapping.
///
/// Records are owned by the caller and never mutated by the engine.
pub type Record = serde_json::Map<String, serde_json::Value>;
