//! Declarative model files
//!
//! A model file registers a record type without Rust code. Used by the CLI.
//!
//! ```toml
//! table = "hotel"
//! naming = "snake"
//!
//! [[fields]]
//! name = "ID"
//! type = "integer"
//! skip = true
//!
//! [[fields]]
//! name = "CreatedAt"
//! type = "timestamp"
//! create = "CREATEAT"
//! ```

use crate::config::ConfigError;
use crate::naming::NamingConvention;
use crate::schema::{FieldDescriptor, TypeDescriptor};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A table plus the record type stored in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Table name
    pub table: String,

    /// Naming convention for columns without an override
    #[serde(default)]
    pub naming: NamingConvention,

    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl ModelDefinition {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::from_fields(self.fields.clone())
    }

    /// Read rows for this model from a JSON array of arrays
    ///
    /// Cells follow field order; `null` marks an absent value.
    pub fn rows_from_json(&self, json: &str) -> Result<Vec<Vec<Option<Value>>>, ConfigError> {
        let raw: Vec<Vec<serde_json::Value>> =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        raw.iter()
            .enumerate()
            .map(|(i, row)| {
                if row.len() != self.fields.len() {
                    return Err(ConfigError::ParseError(format!(
                        "row {} has {} cells, model '{}' has {} fields",
                        i,
                        row.len(),
                        self.table,
                        self.fields.len()
                    )));
                }

                row.iter()
                    .zip(&self.fields)
                    .map(|(cell, field)| {
                        if cell.is_null() {
                            return Ok(None);
                        }
                        Value::from_json(&field.semantic_type, cell)
                            .map(Some)
                            .map_err(|e| {
                                ConfigError::ParseError(format!("row {}, field {}: {}", i, field.name, e))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect()
    }
}
