//! SQL synthesis from record descriptors
//!
//! This crate turns a [`TypeDescriptor`](sqlmocker_core::TypeDescriptor) into:
//! - CREATE TABLE statements
//! - multi-row INSERT statements
//! - SELECT projections
//! - DROP / TRUNCATE cleanup statements
//!
//! Column names resolve the same way everywhere: an explicit override first,
//! then the naming convention applied to the field name.

pub mod format;
pub mod create;
pub mod insert;
pub mod select;
pub mod erase;

pub use format::{ddl_type, SynthError, ValueFormatter};
pub use create::{synthesize_create_table, SchemaSynthesizer};
pub use insert::{synthesize_insert, BulkWriter};
pub use select::{synthesize_select, ProjectionSynthesizer};
pub use erase::{synthesize_erase, EraseAction};
