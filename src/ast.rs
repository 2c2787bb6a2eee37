use crate::value::{Value, ValueType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dotted path identifying a (possibly nested) field on a record type,
/// e.g. `address.city`. Segments are resolved left-to-right against the
/// record's schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    pub steps: Vec<String>,
}

impl FieldPath {
    /// Split a dotted path into its segments.
    pub fn parse(path: &str) -> Self { Self { steps: path.split('.').map(String::from).collect() } }

    /// A single-segment path.
    pub fn simple(name: &str) -> Self { Self { steps: vec![name.to_string()] } }

    pub fn first(&self) -> &str { self.steps.first().map(String::as_str).unwrap_or("") }

    pub fn is_simple(&self) -> bool { self.steps.len() == 1 }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self { Self::parse(path) }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self { Self::parse(&path) }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.steps.join(".")) }
}

/// Comparison operator for a single filter criterion.
///
/// `Contains`/`StartsWith`/`EndsWith` are defined only when both operands are
/// text; the ordering operators require an ordered operand type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOp {
    Equal,              // =
    NotEqual,           // <> or !=
    Contains,           // substring
    StartsWith,         // prefix
    EndsWith,           // suffix
    GreaterThan,        // >
    GreaterThanOrEqual, // >=
    LessThan,           // <
    LessThanOrEqual,    // <=
}

impl FilterOp {
    /// Parse an operator name from a wire-level string.
    ///
    /// Intentionally lenient: unrecognized names fall back to `Equal`, which
    /// is what callers of the generic list endpoint have historically relied
    /// on. Typed (serde) decoding of the enum stays strict.
    pub fn parse_lenient(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "ne" | "neq" | "notequal" | "not_equal" | "!=" | "<>" => FilterOp::NotEqual,
            "contains" | "like" => FilterOp::Contains,
            "startswith" | "starts_with" | "prefix" => FilterOp::StartsWith,
            "endswith" | "ends_with" | "suffix" => FilterOp::EndsWith,
            "gt" | ">" | "greaterthan" | "greater_than" => FilterOp::GreaterThan,
            "gte" | ">=" | "greaterthanorequal" => FilterOp::GreaterThanOrEqual,
            "lt" | "<" | "lessthan" | "less_than" => FilterOp::LessThan,
            "lte" | "<=" | "lessthanorequal" => FilterOp::LessThanOrEqual,
            _ => FilterOp::Equal,
        }
    }

    /// True for the substring/prefix/suffix operators, which require text
    /// operands on both sides.
    pub fn is_text(self) -> bool { matches!(self, FilterOp::Contains | FilterOp::StartsWith | FilterOp::EndsWith) }

    /// True for the operators that require an ordered operand type.
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            FilterOp::GreaterThan | FilterOp::GreaterThanOrEqual | FilterOp::LessThan | FilterOp::LessThanOrEqual
        )
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FilterOp::Equal => "=",
            FilterOp::NotEqual => "!=",
            FilterOp::Contains => "CONTAINS",
            FilterOp::StartsWith => "STARTS WITH",
            FilterOp::EndsWith => "ENDS WITH",
            FilterOp::GreaterThan => ">",
            FilterOp::GreaterThanOrEqual => ">=",
            FilterOp::LessThan => "<",
            FilterOp::LessThanOrEqual => "<=",
        };
        write!(f, "{}", s)
    }
}

/// One filter criterion: which field to compare, what to compare it against,
/// how, and optionally the type both operands should be aligned to before
/// comparing. Constructed per query and consumed by compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub path: FieldPath,
    pub value: Value,
    pub op: FilterOp,
    /// Explicit comparison type. When absent, the resolved field's own type
    /// is used and the raw value is coerced to it.
    pub target: Option<ValueType>,
}

impl Criterion {
    pub fn new(path: impl Into<FieldPath>, value: impl Into<Value>, op: FilterOp) -> Self {
        Self { path: path.into(), value: value.into(), op, target: None }
    }

    /// Equality criterion - the default operator.
    pub fn eq(path: impl Into<FieldPath>, value: impl Into<Value>) -> Self {
        Self::new(path, value, FilterOp::Equal)
    }

    /// Align both operands to `target` before comparing.
    pub fn coerced_to(mut self, target: ValueType) -> Self {
        self.target = Some(target);
        self
    }
}

/// Compiled filter predicate over a record type.
///
/// The compiler emits this tagged tree rather than closures so that an
/// external translator can walk it and target a remote query engine instead
/// of the in-memory evaluator. Comparisons carry the type both operands were
/// aligned to at compile time; evaluation cannot hit a type-level mismatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Accepts every record. The combination of zero criteria.
    True,
    Comparison {
        path: FieldPath,
        op: FilterOp,
        ty: ValueType,
        value: Value,
    },
    And(Box<Predicate>, Box<Predicate>),
}
