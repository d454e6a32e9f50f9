//! Field and type descriptors derived from record definitions

use crate::naming::NamingConvention;
use crate::value::SemanticType;
use serde::{Deserialize, Serialize};

/// One field of a record type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name as declared on the record
    pub name: String,

    /// Semantic type
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,

    /// Explicit column name, wins over the naming convention
    #[serde(default, rename = "create", skip_serializing_if = "Option::is_none")]
    pub column_override: Option<String>,

    /// Leave this field out of INSERT statements
    #[serde(default, rename = "skip")]
    pub skip_on_insert: bool,
}

impl FieldDescriptor {
    /// Create a field with no override and no insert skip
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            column_override: None,
            skip_on_insert: false,
        }
    }

    /// Set the column name override
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column_override = Some(column.into());
        self
    }

    /// Mark the field as skipped on insert
    pub fn skip_on_insert(mut self) -> Self {
        self.skip_on_insert = true;
        self
    }

    /// Column name: the override if present, else the converted field name
    pub fn column_name(&self, convention: NamingConvention) -> String {
        match &self.column_override {
            Some(column) => column.clone(),
            None => convention.apply(&self.name),
        }
    }
}

/// Ordered field list of one record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Create a descriptor from fields in declaration order
    pub fn from_fields(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// Find a field by its declared name
    pub fn find_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Resolved column names of every field
    pub fn column_names(&self, convention: NamingConvention) -> Vec<String> {
        self.fields.iter().map(|f| f.column_name(convention)).collect()
    }

    /// Resolved column names of the fields that take part in inserts
    pub fn insert_column_names(&self, convention: NamingConvention) -> Vec<String> {
        self.insert_fields().map(|f| f.column_name(convention)).collect()
    }

    /// Fields that take part in inserts, in declaration order
    pub fn insert_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.skip_on_insert)
    }

    /// First field whose type has no SQL mapping
    pub fn first_unsupported(&self) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| !f.semantic_type.is_supported())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
