use crate::ast::FilterOp;
use crate::value::CoerceError;
use thiserror::Error;

/// Compile-time failure for one filter criterion. Every variant is a
/// deterministic function of (schema, criterion); there is no partial
/// success - the caller decides whether to drop the criterion or abort.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    /// A path segment does not name a field on the type reached so far.
    #[error("field not found: {field} on {record}")]
    FieldNotFound { field: String, record: &'static str },
    /// The raw value (or the field accessor) has no conversion to the needed
    /// type under the closed coercion table.
    #[error(transparent)]
    ConversionFailed(#[from] CoerceError),
    /// A text-only operator was applied to non-text operands.
    #[error("operator {op} requires text operands, got {ty}")]
    TypeMismatch { op: FilterOp, ty: &'static str },
    /// The operator has no valid comparison for the resolved type.
    #[error("operator {op} has no comparison for {ty}")]
    UnsupportedOperator { op: FilterOp, ty: &'static str },
    /// A null raw value was supplied for a field that cannot be absent.
    #[error("null value for non-optional field {field}")]
    NullValue { field: String },
}
