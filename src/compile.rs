//! Predicate compilation: turn filter criteria into a typed predicate tree.
//! Type resolution, value coercion, and operator validation all happen here,
//! so the emitted predicate cannot hit a type-level mismatch at evaluation.

use crate::ast::{Criterion, Predicate};
use crate::error::FilterError;
use crate::filter::{evaluate_predicate, EvalError};
use crate::resolve::resolve;
use crate::schema::Filterable;
use crate::value::{Value, ValueType};
use std::marker::PhantomData;

/// Compile one criterion against the record type's schema.
///
/// The comparison type is the explicit target when given, otherwise the
/// resolved field's own scalar type. The operator is validated against that
/// type, then the raw value is coerced to it. A null raw value is legal only
/// against a field that can be absent.
pub fn compile_one<R: Filterable>(criterion: &Criterion) -> Result<Predicate, FilterError> {
    let field = resolve(R::schema(), &criterion.path)?;

    let field_ty = field
        .ty
        .scalar()
        .ok_or(FilterError::UnsupportedOperator { op: criterion.op, ty: field.ty.name() })?;
    let ty = criterion.target.unwrap_or(field_ty);

    let op = criterion.op;
    if op.is_text() && ty != ValueType::String {
        return Err(FilterError::TypeMismatch { op, ty: ty.name() });
    }
    if op.is_ordering() && !ty.is_ordered() {
        return Err(FilterError::UnsupportedOperator { op, ty: ty.name() });
    }

    let value = if criterion.value.is_null() {
        if !field.optional {
            return Err(FilterError::NullValue { field: criterion.path.to_string() });
        }
        Value::Null
    } else {
        criterion.value.coerce_to(ty)?
    };

    tracing::trace!(path = %criterion.path, %op, ty = %ty, "compiled criterion");
    Ok(Predicate::Comparison { path: criterion.path.clone(), op, ty, value })
}

/// Compile a criteria list into one conjunctive filter.
///
/// Zero criteria compile to the accept-everything predicate. Otherwise each
/// criterion is compiled and the results are folded with logical AND,
/// left-to-right; the first failing criterion aborts the whole compilation.
pub fn compile<R: Filterable>(criteria: &[Criterion]) -> Result<CompiledFilter<R>, FilterError> {
    let mut combined: Option<Predicate> = None;
    for criterion in criteria {
        let one = compile_one::<R>(criterion)?;
        combined = Some(match combined {
            None => one,
            Some(acc) => Predicate::And(Box::new(acc), Box::new(one)),
        });
    }

    let predicate = combined.unwrap_or(Predicate::True);
    tracing::debug!(criteria = criteria.len(), record = R::schema().name, "compiled filter");
    Ok(CompiledFilter { predicate, _marker: PhantomData })
}

/// A predicate compiled against one record type.
///
/// Pure and stateless: safe to apply repeatedly and concurrently. Evaluation
/// never panics; per-record value failures are reported by [`evaluate`] and
/// mapped to non-matches by [`matches`].
///
/// [`evaluate`]: CompiledFilter::evaluate
/// [`matches`]: CompiledFilter::matches
pub struct CompiledFilter<R: Filterable> {
    predicate: Predicate,
    _marker: PhantomData<fn(&R) -> bool>,
}

impl<R: Filterable> CompiledFilter<R> {
    /// The underlying predicate tree, for translators targeting an external
    /// query engine.
    pub fn predicate(&self) -> &Predicate { &self.predicate }

    pub fn into_predicate(self) -> Predicate { self.predicate }

    /// Evaluate against one record, surfacing per-record errors.
    pub fn evaluate(&self, record: &R) -> Result<bool, EvalError> { evaluate_predicate(record, &self.predicate) }

    /// True if the record passes the filter. Per-record evaluation errors
    /// count as non-matches; use [`CompiledFilter::evaluate`] to observe them.
    pub fn matches(&self, record: &R) -> bool { self.evaluate(record).unwrap_or(false) }
}

impl<R: Filterable> Clone for CompiledFilter<R> {
    fn clone(&self) -> Self { Self { predicate: self.predicate.clone(), _marker: PhantomData } }
}

impl<R: Filterable> std::fmt::Debug for CompiledFilter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledFilter").field("predicate", &self.predicate).finish()
    }
}
