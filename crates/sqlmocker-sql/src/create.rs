//! CREATE TABLE synthesis

use crate::format::{ddl_type, SynthError};
use sqlmocker_core::{NamingConvention, Record, TypeDescriptor};

/// Builds CREATE TABLE statements from type descriptors
pub struct SchemaSynthesizer;

impl SchemaSynthesizer {
    /// `CREATE TABLE IF NOT EXISTS <table> (<col> <TYPE>, ...);`
    ///
    /// Columns follow declaration order. The column override wins over the
    /// naming convention. Duplicate column names are not detected. The first
    /// field with an unsupported type fails the whole statement.
    pub fn synthesize(
        table: &str,
        descriptor: &TypeDescriptor,
        convention: NamingConvention,
    ) -> Result<String, SynthError> {
        if let Some(field) = descriptor.first_unsupported() {
            return Err(SynthError::UnsupportedField {
                field: field.name.clone(),
                type_name: field.semantic_type.to_string(),
            });
        }

        let mut sql = String::with_capacity(32 + descriptor.len() * 24);
        sql.push_str("CREATE TABLE IF NOT EXISTS ");
        sql.push_str(table);
        sql.push_str(" (");

        for (i, field) in descriptor.fields.iter().enumerate() {
            let column_type = ddl_type(&field.semantic_type)?;

            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&field.column_name(convention));
            sql.push(' ');
            sql.push_str(column_type);
        }

        sql.push_str(");");
        tracing::debug!(table, columns = descriptor.len(), "synthesized CREATE TABLE");
        Ok(sql)
    }

    /// Same as [`synthesize`](Self::synthesize) for a [`Record`] type
    pub fn for_record<R: Record>(table: &str, convention: NamingConvention) -> Result<String, SynthError> {
        Self::synthesize(table, &R::descriptor(), convention)
    }
}

/// Shorthand for [`SchemaSynthesizer::synthesize`]
pub fn synthesize_create_table(
    table: &str,
    descriptor: &TypeDescriptor,
    convention: NamingConvention,
) -> Result<String, SynthError> {
    SchemaSynthesizer::synthesize(table, descriptor, convention)
}
