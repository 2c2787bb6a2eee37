//! Build boolean filter predicates over typed record collections at runtime.
//!
//! A caller supplies criteria as (field path, operator, raw value, optional
//! target type) tuples - typically decoded from a generic list/search
//! request - and the compiler resolves each path against the record type's
//! static schema, coerces the operands to a common type through a closed
//! conversion table, validates the operator, and folds everything into one
//! conjunctive predicate. Errors are compile-time and typed; the compiled
//! predicate itself never fails at the type level.
//!
//! ```
//! use dynfilter::{Criterion, DynFilterExt, FieldDef, FieldType, Filterable, Schema, Value, ValueType};
//!
//! static USER: Schema = Schema {
//!     name: "User",
//!     fields: &[FieldDef::new("id", FieldType::I64), FieldDef::new("name", FieldType::String)],
//! };
//!
//! struct User { id: i64, name: String }
//!
//! impl Filterable for User {
//!     fn schema() -> &'static Schema { &USER }
//!     fn value(&self, field: &str) -> Option<Value> {
//!         match field {
//!             "id" => Some(Value::I64(self.id)),
//!             "name" => Some(self.name.clone().into()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let users = vec![User { id: 1, name: "Al".into() }, User { id: 2, name: "Bo".into() }];
//! // Compare the numeric id against client-supplied text
//! let criteria = [Criterion::eq("id", "1").coerced_to(ValueType::String)];
//! let matched: Vec<_> = users.into_iter().where_all(&criteria).unwrap().collect();
//! assert_eq!(matched.len(), 1);
//! assert_eq!(matched[0].name, "Al");
//! ```

pub mod apply;
pub mod ast;
pub mod compile;
pub mod error;
pub mod filter;
pub mod resolve;
pub mod schema;
pub mod value;

pub use apply::{apply_filter, apply_filters, DynFilterExt, Filtered};
pub use ast::{Criterion, FieldPath, FilterOp, Predicate};
pub use compile::{compile, compile_one, CompiledFilter};
pub use error::FilterError;
pub use filter::{evaluate_predicate, EvalError, FilterIterator, FilterResult};
pub use resolve::{resolve, ResolvedField};
pub use schema::{FieldDef, FieldType, Filterable, Schema};
pub use value::{CoerceError, Value, ValueType};
