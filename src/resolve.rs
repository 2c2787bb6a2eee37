//! Field resolution: walk a dotted path through a record schema, strictly
//! left-to-right, to the leaf field's declared type. An unresolvable segment
//! is an error - never a silently kept previous type.

use crate::ast::FieldPath;
use crate::error::FilterError;
use crate::schema::{FieldType, Filterable, Schema};
use crate::value::Value;

/// A resolved leaf field: its declared type, and whether any segment on the
/// way to it (or the leaf itself) may be absent. Recomputed per compile
/// call; schemas are static so there is nothing to invalidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedField {
    pub ty: FieldType,
    pub optional: bool,
}

/// Resolve a field path against a schema.
///
/// Each segment must name a field on the schema reached so far, and every
/// non-leaf segment must be a nested struct. Optionality accumulates: a path
/// through an optional segment yields an optional field, and its accessor
/// short-circuits to `Value::Null` when the intermediate is absent.
pub fn resolve(schema: &'static Schema, path: &FieldPath) -> Result<ResolvedField, FilterError> {
    if path.steps.is_empty() {
        return Err(FilterError::FieldNotFound { field: String::new(), record: schema.name });
    }

    let mut current = schema;
    let mut optional = false;
    let last = path.steps.len() - 1;

    for (i, step) in path.steps.iter().enumerate() {
        let def = current
            .field(step)
            .ok_or_else(|| FilterError::FieldNotFound { field: step.clone(), record: current.name })?;
        optional |= def.optional;

        if i == last {
            return Ok(ResolvedField { ty: def.ty, optional });
        }

        match def.ty {
            FieldType::Struct(inner) => current = inner,
            // Dotted into a scalar: the next segment cannot exist
            other => {
                return Err(FilterError::FieldNotFound { field: path.steps[i + 1].clone(), record: other.name() })
            }
        }
    }

    unreachable!("loop returns on the last segment")
}

impl FieldPath {
    /// Read the value at this path from a record, traversing nested struct
    /// values. `None` means a segment the schema promised is not carried by
    /// the record; an absent optional intermediate short-circuits to
    /// `Some(Value::Null)`.
    pub fn extract_value<R: Filterable>(&self, record: &R) -> Option<Value> {
        let mut current = record.value(self.first())?;
        for step in &self.steps[1..] {
            match &current {
                Value::Null => return Some(Value::Null),
                Value::Struct(_) => {
                    let next = current.get(step)?.clone();
                    current = next;
                }
                _ => return None,
            }
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDef;
    use crate::value::ValueType;

    static ADDRESS: Schema = Schema {
        name: "Address",
        fields: &[FieldDef::new("city", FieldType::String), FieldDef::new("zip", FieldType::I64)],
    };

    static USER: Schema = Schema {
        name: "User",
        fields: &[
            FieldDef::new("id", FieldType::I64),
            FieldDef::new("name", FieldType::String),
            FieldDef::optional("address", FieldType::Struct(&ADDRESS)),
        ],
    };

    struct User {
        id: i64,
        name: String,
        address: Option<(String, i64)>,
    }

    impl Filterable for User {
        fn schema() -> &'static Schema { &USER }

        fn value(&self, field: &str) -> Option<Value> {
            match field {
                "id" => Some(Value::I64(self.id)),
                "name" => Some(self.name.clone().into()),
                "address" => Some(match &self.address {
                    Some((city, zip)) => Value::record([("city", Value::from(city.clone())), ("zip", Value::I64(*zip))]),
                    None => Value::Null,
                }),
                _ => None,
            }
        }
    }

    #[test]
    fn test_resolve_simple() {
        let field = resolve(&USER, &FieldPath::simple("id")).unwrap();
        assert_eq!(field.ty.scalar(), Some(ValueType::I64));
        assert!(!field.optional);
    }

    #[test]
    fn test_resolve_nested() {
        let field = resolve(&USER, &"address.city".into()).unwrap();
        assert_eq!(field.ty.scalar(), Some(ValueType::String));
        // Optionality of the intermediate segment carries through
        assert!(field.optional);
    }

    #[test]
    fn test_resolve_nested_equals_stepwise() {
        // Resolving "address.zip" equals resolving "address", then "zip" on
        // the resulting schema.
        let direct = resolve(&USER, &"address.zip".into()).unwrap();
        let step1 = resolve(&USER, &FieldPath::simple("address")).unwrap();
        let inner = match step1.ty {
            FieldType::Struct(schema) => schema,
            other => panic!("expected struct, got {:?}", other),
        };
        let step2 = resolve(inner, &FieldPath::simple("zip")).unwrap();
        assert_eq!(direct.ty, step2.ty);
    }

    #[test]
    fn test_resolve_missing_field() {
        let err = resolve(&USER, &FieldPath::simple("missing")).unwrap_err();
        assert_eq!(err, FilterError::FieldNotFound { field: "missing".to_string(), record: "User" });
    }

    #[test]
    fn test_resolve_missing_middle_segment() {
        // An invalid middle segment is FieldNotFound, never a silently wrong
        // type.
        let err = resolve(&USER, &"address.country".into()).unwrap_err();
        assert_eq!(err, FilterError::FieldNotFound { field: "country".to_string(), record: "Address" });
    }

    #[test]
    fn test_resolve_through_scalar() {
        let err = resolve(&USER, &"name.length".into()).unwrap_err();
        assert_eq!(err, FilterError::FieldNotFound { field: "length".to_string(), record: "string" });
    }

    #[test]
    fn test_resolve_empty_path() {
        assert!(matches!(
            resolve(&USER, &FieldPath { steps: vec![] }),
            Err(FilterError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_extract_nested() {
        let user = User { id: 1, name: "Al".to_string(), address: Some(("Berlin".to_string(), 10115)) };
        let path: FieldPath = "address.city".into();
        assert_eq!(path.extract_value(&user), Some(Value::String("Berlin".to_string())));
    }

    #[test]
    fn test_extract_absent_intermediate_short_circuits() {
        let user = User { id: 1, name: "Al".to_string(), address: None };
        let path: FieldPath = "address.city".into();
        assert_eq!(path.extract_value(&user), Some(Value::Null));
    }

    #[test]
    fn test_extract_unknown_field() {
        let user = User { id: 1, name: "Al".to_string(), address: None };
        assert_eq!(FieldPath::simple("missing").extract_value(&user), None);
    }
}
