//! Multi-row INSERT synthesis

use crate::format::ValueFormatter;
use sqlmocker_core::{NamingConvention, Record, TypeDescriptor, Value};

/// Literal written for an absent field value
const ABSENT: &str = "NULL";

/// Builds one INSERT statement for a batch of records
pub struct BulkWriter;

impl BulkWriter {
    /// `INSERT INTO <table> (c1, c2) VALUES (v1, v2), (v3, v4);`
    ///
    /// The column list comes from the record type, minus skipped fields, and
    /// is shared by every row. An empty batch yields `";"`.
    pub fn synthesize<R: Record>(table: &str, records: &[R], convention: NamingConvention) -> String {
        let rows: Vec<Vec<Option<Value>>> = records.iter().map(Record::values).collect();
        Self::synthesize_rows(table, &R::descriptor(), &rows, convention)
    }

    /// Same as [`synthesize`](Self::synthesize) over raw value rows
    ///
    /// Rows are expected to follow `descriptor`; this is not re-checked per
    /// row. Missing or `None` cells are written as `NULL` so every tuple
    /// lines up with the column list.
    ///
    /// A field's column override names its INSERT column too, the same as in
    /// CREATE TABLE and SELECT. Generators that ignore the override on insert
    /// write the converted field name instead and miss a renamed column.
    pub fn synthesize_rows(
        table: &str,
        descriptor: &TypeDescriptor,
        rows: &[Vec<Option<Value>>],
        convention: NamingConvention,
    ) -> String {
        if rows.is_empty() {
            return ";".to_string();
        }

        let included: Vec<usize> = descriptor
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.skip_on_insert)
            .map(|(i, _)| i)
            .collect();

        let columns = descriptor.insert_column_names(convention).join(", ");

        let tuples: Vec<String> = rows
            .iter()
            .map(|row| {
                let values: Vec<String> = included
                    .iter()
                    .map(|&i| match row.get(i).and_then(Option::as_ref) {
                        Some(value) => ValueFormatter::literal(value),
                        None => ABSENT.to_string(),
                    })
                    .collect();
                format!("({})", values.join(", "))
            })
            .collect();

        tracing::debug!(table, rows = rows.len(), columns = included.len(), "synthesized INSERT");
        format!("INSERT INTO {} ({}) VALUES {};", table, columns, tuples.join(", "))
    }
}

/// Shorthand for [`BulkWriter::synthesize`]
pub fn synthesize_insert<R: Record>(table: &str, records: &[R], convention: NamingConvention) -> String {
    BulkWriter::synthesize(table, records, convention)
}
