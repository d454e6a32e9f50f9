//! Literal and DDL type mapping for the four semantic types

use chrono::Utc;
use sqlmocker_core::{SemanticType, Value, TIMESTAMP_FORMAT};

/// Errors raised while synthesizing SQL
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthError {
    #[error("Unsupported type '{type_name}'")]
    UnsupportedType { type_name: String },

    #[error("Unsupported type '{type_name}' for field '{field}'")]
    UnsupportedField { field: String, type_name: String },

    #[error("Value of type {actual} cannot be written as {expected}")]
    TypeMismatch { expected: String, actual: String },
}

/// Maps semantic values to dialect literals
pub struct ValueFormatter;

impl ValueFormatter {
    /// Literal text for a value
    ///
    /// Text is wrapped in single quotes without escaping embedded quotes.
    pub fn literal(value: &Value) -> String {
        match value {
            Value::Integer(v) => v.to_string(),
            Value::Decimal(v) => format!("{:.3}", v),
            Value::Text(v) => format!("'{}'", v),
            Value::Timestamp(at) => {
                format!("'{}'", at.with_timezone(&Utc).format(TIMESTAMP_FORMAT))
            }
        }
    }

    /// Literal text for a value declared with `ty`
    pub fn format(ty: &SemanticType, value: &Value) -> Result<String, SynthError> {
        if let SemanticType::Unsupported(name) = ty {
            return Err(SynthError::UnsupportedType {
                type_name: name.clone(),
            });
        }

        let actual = value.semantic_type();
        if &actual != ty {
            return Err(SynthError::TypeMismatch {
                expected: ty.to_string(),
                actual: actual.to_string(),
            });
        }

        Ok(Self::literal(value))
    }
}

/// Column type used in CREATE TABLE for a semantic type
pub fn ddl_type(ty: &SemanticType) -> Result<&'static str, SynthError> {
    match ty {
        SemanticType::Integer => Ok("INT"),
        SemanticType::Text => Ok("VARCHAR(255)"),
        SemanticType::Decimal => Ok("DECIMAL(10, 2)"),
        SemanticType::Timestamp => Ok("TIMESTAMP"),
        SemanticType::Unsupported(name) => Err(SynthError::UnsupportedType {
            type_name: name.clone(),
        }),
    }
}
