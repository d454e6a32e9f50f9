//! SELECT synthesis

use sqlmocker_core::{NamingConvention, Record, TypeDescriptor};

/// Builds a projection of every column of a record type
pub struct ProjectionSynthesizer;

impl ProjectionSynthesizer {
    /// `SELECT c1, c2 FROM <table>;`
    ///
    /// Lists every field, skipped-on-insert ones included, so the projection
    /// matches the CREATE TABLE column order.
    pub fn synthesize(table: &str, descriptor: &TypeDescriptor, convention: NamingConvention) -> String {
        format!(
            "SELECT {} FROM {};",
            descriptor.column_names(convention).join(", "),
            table
        )
    }

    pub fn for_record<R: Record>(table: &str, convention: NamingConvention) -> String {
        Self::synthesize(table, &R::descriptor(), convention)
    }
}

/// Shorthand for [`ProjectionSynthesizer::synthesize`]
pub fn synthesize_select(table: &str, descriptor: &TypeDescriptor, convention: NamingConvention) -> String {
    ProjectionSynthesizer::synthesize(table, descriptor, convention)
}
