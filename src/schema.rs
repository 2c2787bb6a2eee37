//! Static record-type descriptors. Where the original dynamic query layers
//! reach for runtime reflection, records here register an explicit schema
//! once: an ordered list of (field name, field type) with an optionality
//! flag, nested via `FieldType::Struct`.

use crate::value::{Value, ValueType};

/// Descriptor for one record type: its name and its fields, in declaration
/// order.
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

impl Schema {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|def| def.name == name)
    }
}

#[derive(Debug)]
pub struct FieldDef {
    pub name: &'static str,
    pub ty: FieldType,
    pub optional: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str, ty: FieldType) -> Self { Self { name, ty, optional: false } }

    /// A field whose value may be absent (`Value::Null`).
    pub const fn optional(name: &'static str, ty: FieldType) -> Self { Self { name, ty, optional: true } }
}

/// Declared type of a schema field. Scalars map onto `ValueType`; `Struct`
/// nests another record type for dotted-path traversal.
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    I32,
    I64,
    F64,
    Bool,
    String,
    Struct(&'static Schema),
}

impl FieldType {
    /// The scalar comparison type of this field, if it has one.
    pub fn scalar(self) -> Option<ValueType> {
        match self {
            FieldType::I32 => Some(ValueType::I32),
            FieldType::I64 => Some(ValueType::I64),
            FieldType::F64 => Some(ValueType::F64),
            FieldType::Bool => Some(ValueType::Bool),
            FieldType::String => Some(ValueType::String),
            FieldType::Struct(_) => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldType::I32 => "i32",
            FieldType::I64 => "i64",
            FieldType::F64 => "f64",
            FieldType::Bool => "bool",
            FieldType::String => "string",
            FieldType::Struct(schema) => schema.name,
        }
    }
}

impl PartialEq for FieldType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Schemas are 'static singletons; identity comparison is enough
            (FieldType::Struct(a), FieldType::Struct(b)) => std::ptr::eq(*a, *b),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

/// Record types that can be filtered dynamically.
///
/// `value` returns the typed value of a top-level field. Optional fields
/// that are currently unset must return `Some(Value::Null)` - returning
/// `None` means the record does not carry the field at all, which surfaces
/// as a per-record evaluation error rather than a non-match.
pub trait Filterable {
    /// Static descriptor for this record type.
    fn schema() -> &'static Schema
    where
        Self: Sized;

    fn value(&self, field: &str) -> Option<Value>;
}
