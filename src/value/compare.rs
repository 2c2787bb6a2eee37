use super::{Value, ValueType};
use std::cmp::Ordering;

impl ValueType {
    /// Whether the type has a total order the range operators can use.
    pub fn is_ordered(self) -> bool { !matches!(self, ValueType::Bool) }
}

impl Value {
    /// Ordering between two values of the same scalar type. `None` for
    /// mismatched or unordered operands (including NaN on either side) -
    /// the compiler aligns both sides to one type, so `None` at evaluation
    /// means the comparison is simply false.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::I32(a), Value::I32(b)) => Some(a.cmp(b)),
            (Value::I64(a), Value::I64(b)) => Some(a.cmp(b)),
            (Value::F64(a), Value::F64(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}
