use super::{Value, ValueType};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoerceError {
    #[error("cannot coerce {from} to {to}")]
    Incompatible { from: &'static str, to: ValueType },
    #[error("invalid format {value:?} for type {target}")]
    InvalidFormat { value: String, target: ValueType },
    #[error("numeric overflow: {value} does not fit in {target}")]
    NumericOverflow { value: String, target: ValueType },
}

impl Value {
    /// Coerce this value to the target scalar type.
    ///
    /// The conversion table is closed and checked in order, first match wins:
    /// identity, integer to decimal text, text to base-10 integer, textual
    /// rendering of the remaining scalars, then the generic numeric/boolean
    /// conversions with range checks. Anything outside the table is an error
    /// - there is no silent passthrough of an unconverted value.
    ///
    /// `Null` is not coercible here; absence is decided by the compiler
    /// against the field's optionality.
    pub fn coerce_to(&self, target: ValueType) -> Result<Value, CoerceError> {
        if ValueType::of(self) == Some(target) {
            return Ok(self.clone());
        }

        match (self, target) {
            // Integer to canonical decimal text. Must match how a backing
            // execution layer would render the same integer, since text
            // comparison against a rendered number is the common case.
            (Value::I32(n), ValueType::String) => Ok(Value::String(n.to_string())),
            (Value::I64(n), ValueType::String) => Ok(Value::String(n.to_string())),

            // Text to base-10 integer
            (Value::String(s), ValueType::I32) => match s.parse::<i32>() {
                Ok(n) => Ok(Value::I32(n)),
                Err(_) => Err(CoerceError::InvalidFormat { value: s.clone(), target: ValueType::I32 }),
            },
            (Value::String(s), ValueType::I64) => match s.parse::<i64>() {
                Ok(n) => Ok(Value::I64(n)),
                Err(_) => Err(CoerceError::InvalidFormat { value: s.clone(), target: ValueType::I64 }),
            },

            // Remaining textual renderings
            (Value::F64(n), ValueType::String) => Ok(Value::String(n.to_string())),
            (Value::Bool(b), ValueType::String) => Ok(Value::String(b.to_string())),

            // Integer widening
            (Value::I32(n), ValueType::I64) => Ok(Value::I64(*n as i64)),
            (Value::I32(n), ValueType::F64) => Ok(Value::F64(*n as f64)),
            (Value::I64(n), ValueType::F64) => Ok(Value::F64(*n as f64)),

            // Integer narrowing with range check
            (Value::I64(n), ValueType::I32) => {
                if *n >= i32::MIN as i64 && *n <= i32::MAX as i64 {
                    Ok(Value::I32(*n as i32))
                } else {
                    Err(CoerceError::NumericOverflow { value: n.to_string(), target: ValueType::I32 })
                }
            }
            (Value::F64(n), ValueType::I32) => {
                if n.is_finite() && *n >= i32::MIN as f64 && *n <= i32::MAX as f64 {
                    Ok(Value::I32(*n as i32))
                } else {
                    Err(CoerceError::NumericOverflow { value: n.to_string(), target: ValueType::I32 })
                }
            }
            (Value::F64(n), ValueType::I64) => {
                if n.is_finite() && *n >= i64::MIN as f64 && *n <= i64::MAX as f64 {
                    Ok(Value::I64(*n as i64))
                } else {
                    Err(CoerceError::NumericOverflow { value: n.to_string(), target: ValueType::I64 })
                }
            }

            // Text to the remaining scalars
            (Value::String(s), ValueType::F64) => match s.parse::<f64>() {
                Ok(n) => Ok(Value::F64(n)),
                Err(_) => Err(CoerceError::InvalidFormat { value: s.clone(), target: ValueType::F64 }),
            },
            (Value::String(s), ValueType::Bool) => match s.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
                "false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
                _ => Err(CoerceError::InvalidFormat { value: s.clone(), target: ValueType::Bool }),
            },

            // Bool to numeric (0/1)
            (Value::Bool(b), ValueType::I32) => Ok(Value::I32(if *b { 1 } else { 0 })),
            (Value::Bool(b), ValueType::I64) => Ok(Value::I64(if *b { 1 } else { 0 })),
            (Value::Bool(b), ValueType::F64) => Ok(Value::F64(if *b { 1.0 } else { 0.0 })),

            // Numeric to bool (0 = false, non-zero = true)
            (Value::I32(n), ValueType::Bool) => Ok(Value::Bool(*n != 0)),
            (Value::I64(n), ValueType::Bool) => Ok(Value::Bool(*n != 0)),
            (Value::F64(n), ValueType::Bool) => Ok(Value::Bool(*n != 0.0)),

            // Structs and nulls have no scalar conversion
            _ => Err(CoerceError::Incompatible { from: self.type_name(), to: target }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let value = Value::I64(42);
        assert_eq!(value.coerce_to(ValueType::I64).unwrap(), value);
        let value = Value::String("x".to_string());
        assert_eq!(value.coerce_to(ValueType::String).unwrap(), value);
    }

    #[test]
    fn test_integer_to_text() {
        assert_eq!(Value::I64(1).coerce_to(ValueType::String).unwrap(), Value::String("1".to_string()));
        assert_eq!(Value::I32(-7).coerce_to(ValueType::String).unwrap(), Value::String("-7".to_string()));
    }

    #[test]
    fn test_text_to_integer() {
        assert_eq!(Value::from("42").coerce_to(ValueType::I64).unwrap(), Value::I64(42));
        assert_eq!(Value::from("-3").coerce_to(ValueType::I32).unwrap(), Value::I32(-3));
        assert!(matches!(
            Value::from("abc").coerce_to(ValueType::I64),
            Err(CoerceError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_integer_text_roundtrip() {
        for n in [0i64, 1, -1, 42, i64::MIN, i64::MAX] {
            let text = Value::I64(n).coerce_to(ValueType::String).unwrap();
            assert_eq!(text.coerce_to(ValueType::I64).unwrap(), Value::I64(n));
        }
    }

    #[test]
    fn test_textual_rendering() {
        assert_eq!(Value::F64(1.5).coerce_to(ValueType::String).unwrap(), Value::String("1.5".to_string()));
        assert_eq!(Value::Bool(true).coerce_to(ValueType::String).unwrap(), Value::String("true".to_string()));
    }

    #[test]
    fn test_widening() {
        assert_eq!(Value::I32(7).coerce_to(ValueType::I64).unwrap(), Value::I64(7));
        assert_eq!(Value::I32(7).coerce_to(ValueType::F64).unwrap(), Value::F64(7.0));
        assert_eq!(Value::I64(7).coerce_to(ValueType::F64).unwrap(), Value::F64(7.0));
    }

    #[test]
    fn test_narrowing_overflow() {
        assert_eq!(Value::I64(7).coerce_to(ValueType::I32).unwrap(), Value::I32(7));
        assert!(matches!(
            Value::I64(i64::MAX).coerce_to(ValueType::I32),
            Err(CoerceError::NumericOverflow { .. })
        ));
        assert!(matches!(
            Value::F64(f64::NAN).coerce_to(ValueType::I64),
            Err(CoerceError::NumericOverflow { .. })
        ));
    }

    #[test]
    fn test_string_to_bool() {
        assert_eq!(Value::from("true").coerce_to(ValueType::Bool).unwrap(), Value::Bool(true));
        assert_eq!(Value::from("0").coerce_to(ValueType::Bool).unwrap(), Value::Bool(false));
        assert!(matches!(
            Value::from("maybe").coerce_to(ValueType::Bool),
            Err(CoerceError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_incompatible() {
        let value = Value::record([("a", Value::I64(1))]);
        assert!(matches!(
            value.coerce_to(ValueType::I64),
            Err(CoerceError::Incompatible { from: "struct", .. })
        ));
        assert!(matches!(
            Value::Null.coerce_to(ValueType::String),
            Err(CoerceError::Incompatible { from: "null", .. })
        ));
    }
}
