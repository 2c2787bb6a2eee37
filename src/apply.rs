//! Public surface for applying dynamic filters to record sequences: free
//! functions mirroring the classic list-endpoint service calls, and a fluent
//! extension trait over any iterator of filterable records. Compilation is
//! fail-fast; the returned iterator itself cannot fail.

use crate::ast::{Criterion, FieldPath, FilterOp};
use crate::compile::{compile, CompiledFilter};
use crate::error::FilterError;
use crate::schema::Filterable;
use crate::value::Value;

/// Records from `iter` that pass a compiled filter. Per-record evaluation
/// errors are dropped; use [`crate::filter::FilterIterator`] to observe them.
#[derive(Debug)]
pub struct Filtered<I, R: Filterable> {
    iter: I,
    filter: CompiledFilter<R>,
}

impl<I, R> Iterator for Filtered<I, R>
where
    I: Iterator<Item = R>,
    R: Filterable,
{
    type Item = R;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = self.iter.next()?;
            if self.filter.matches(&record) {
                return Some(record);
            }
        }
    }
}

/// Filter a sequence by a single criterion.
pub fn apply_filter<I, R>(
    iter: I,
    path: impl Into<FieldPath>,
    value: impl Into<Value>,
    op: FilterOp,
) -> Result<Filtered<I, R>, FilterError>
where
    I: Iterator<Item = R>,
    R: Filterable,
{
    apply_filters(iter, &[Criterion::new(path, value, op)])
}

/// Filter a sequence by the conjunction of all criteria. An empty list
/// passes everything through.
pub fn apply_filters<I, R>(iter: I, criteria: &[Criterion]) -> Result<Filtered<I, R>, FilterError>
where
    I: Iterator<Item = R>,
    R: Filterable,
{
    let filter = compile::<R>(criteria)?;
    Ok(Filtered { iter, filter })
}

/// Fluent equivalents of [`apply_filter`]/[`apply_filters`] on any iterator
/// of filterable records.
pub trait DynFilterExt: Iterator + Sized
where
    Self::Item: Filterable,
{
    fn where_dynamic(
        self,
        path: impl Into<FieldPath>,
        value: impl Into<Value>,
        op: FilterOp,
    ) -> Result<Filtered<Self, Self::Item>, FilterError> {
        apply_filter(self, path, value, op)
    }

    fn where_all(self, criteria: &[Criterion]) -> Result<Filtered<Self, Self::Item>, FilterError> {
        apply_filters(self, criteria)
    }
}

impl<I> DynFilterExt for I
where
    I: Iterator + Sized,
    I::Item: Filterable,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDef, FieldType, Schema};
    use crate::value::ValueType;

    static DOC: Schema = Schema {
        name: "Doc",
        fields: &[FieldDef::new("id", FieldType::I64), FieldDef::new("title", FieldType::String)],
    };

    #[derive(Debug, Clone, PartialEq)]
    struct Doc {
        id: i64,
        title: String,
    }

    impl Filterable for Doc {
        fn schema() -> &'static Schema { &DOC }

        fn value(&self, field: &str) -> Option<Value> {
            match field {
                "id" => Some(Value::I64(self.id)),
                "title" => Some(self.title.clone().into()),
                _ => None,
            }
        }
    }

    fn docs() -> Vec<Doc> {
        vec![
            Doc { id: 1, title: "alpha".to_string() },
            Doc { id: 2, title: "beta".to_string() },
            Doc { id: 3, title: "gamma".to_string() },
        ]
    }

    #[test]
    fn test_apply_filter_single() {
        let passed: Vec<_> = apply_filter(docs().into_iter(), "title", "beta", FilterOp::Equal).unwrap().collect();
        assert_eq!(passed, vec![Doc { id: 2, title: "beta".to_string() }]);
    }

    #[test]
    fn test_where_dynamic() {
        let passed: Vec<_> = docs().into_iter().where_dynamic("id", 2i64, FilterOp::GreaterThanOrEqual).unwrap().collect();
        assert_eq!(passed.len(), 2);
    }

    #[test]
    fn test_where_all() {
        let criteria = [
            Criterion::new("title", "a", FilterOp::EndsWith),
            Criterion::eq("id", "3").coerced_to(ValueType::String),
        ];
        let passed: Vec<_> = docs().into_iter().where_all(&criteria).unwrap().collect();
        assert_eq!(passed, vec![Doc { id: 3, title: "gamma".to_string() }]);
    }

    #[test]
    fn test_where_all_empty_passes_everything() {
        let passed: Vec<_> = docs().into_iter().where_all(&[]).unwrap().collect();
        assert_eq!(passed, docs());
    }

    #[test]
    fn test_compile_error_propagates() {
        let err = docs().into_iter().where_dynamic("missing", 1i64, FilterOp::Equal).unwrap_err();
        assert!(matches!(err, FilterError::FieldNotFound { .. }));
    }
}
