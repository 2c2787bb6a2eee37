//! Evaluate compiled predicates against records. This is the in-memory
//! execution path - for data that was not pre-filtered by a storage layer,
//! or to validate/supplement whatever the storage layer returned.

use crate::ast::{FilterOp, Predicate};
use crate::schema::Filterable;
use crate::value::{CoerceError, Value};
use std::cmp::Ordering;
use thiserror::Error;

/// Per-record evaluation failure. Type-level mismatches are ruled out at
/// compile time; what remains is record data the schema did not promise.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    /// The record does not carry a field its schema declares.
    #[error("field missing: {0}")]
    FieldMissing(String),
    /// The field's value could not be coerced to the comparison type
    /// (e.g. non-numeric text under an integer target).
    #[error(transparent)]
    Coerce(#[from] CoerceError),
}

/// Evaluate a predicate against one record. `And` short-circuits.
pub fn evaluate_predicate<R: Filterable>(record: &R, predicate: &Predicate) -> Result<bool, EvalError> {
    match predicate {
        Predicate::True => Ok(true),
        Predicate::And(left, right) => Ok(evaluate_predicate(record, left)? && evaluate_predicate(record, right)?),
        Predicate::Comparison { path, op, ty, value } => {
            let field = path.extract_value(record).ok_or_else(|| EvalError::FieldMissing(path.to_string()))?;

            // Absent field: equal only to null, ordered against nothing,
            // contained in nothing.
            let field = match field {
                Value::Null => {
                    return Ok(match op {
                        FilterOp::Equal => value.is_null(),
                        FilterOp::NotEqual => !value.is_null(),
                        _ => false,
                    })
                }
                present => present.coerce_to(*ty)?,
            };

            Ok(compare(&field, value, *op))
        }
    }
}

/// Apply one comparison to operands already aligned to the same type.
/// Text matching is case-sensitive, byte-wise substring/prefix/suffix.
fn compare(left: &Value, right: &Value, op: FilterOp) -> bool {
    match op {
        FilterOp::Equal => left == right,
        FilterOp::NotEqual => left != right,
        FilterOp::Contains => text(left, right, |l, r| l.contains(r)),
        FilterOp::StartsWith => text(left, right, |l, r| l.starts_with(r)),
        FilterOp::EndsWith => text(left, right, |l, r| l.ends_with(r)),
        FilterOp::GreaterThan => matches!(left.compare(right), Some(Ordering::Greater)),
        FilterOp::GreaterThanOrEqual => matches!(left.compare(right), Some(Ordering::Greater | Ordering::Equal)),
        FilterOp::LessThan => matches!(left.compare(right), Some(Ordering::Less)),
        FilterOp::LessThanOrEqual => matches!(left.compare(right), Some(Ordering::Less | Ordering::Equal)),
    }
}

fn text(left: &Value, right: &Value, matcher: impl Fn(&str, &str) -> bool) -> bool {
    match (left, right) {
        (Value::String(l), Value::String(r)) => matcher(l, r),
        _ => false,
    }
}

/// Outcome of filtering one record, keeping the record either way.
#[derive(Debug, PartialEq)]
pub enum FilterResult<R> {
    Pass(R),
    Skip(R),
    Error(R, EvalError),
}

/// Iterator adapter yielding a [`FilterResult`] per record, for callers that
/// need to observe per-record evaluation errors instead of dropping those
/// records.
pub struct FilterIterator<I> {
    iter: I,
    predicate: Predicate,
}

impl<I, R> FilterIterator<I>
where
    I: Iterator<Item = R>,
    R: Filterable,
{
    pub fn new(iter: I, predicate: Predicate) -> Self { Self { iter, predicate } }
}

impl<I, R> Iterator for FilterIterator<I>
where
    I: Iterator<Item = R>,
    R: Filterable,
{
    type Item = FilterResult<R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|record| match evaluate_predicate(&record, &self.predicate) {
            Ok(true) => FilterResult::Pass(record),
            Ok(false) => FilterResult::Skip(record),
            Err(e) => FilterResult::Error(record, e),
        })
    }
}
