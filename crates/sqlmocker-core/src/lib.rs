//! sqlmocker core
//!
//! Domain model shared by the synthesizers, the fixture loader and the
//! comparator: semantic types and values, record descriptors, captured
//! snapshots, the store interface and configuration.

pub mod naming;
pub mod value;
pub mod schema;
pub mod record;
pub mod model;
pub mod snapshot;
pub mod store;
pub mod config;

pub use naming::NamingConvention;
pub use value::{SemanticType, Value, TIMESTAMP_FORMAT};
pub use schema::{FieldDescriptor, TypeDescriptor};
pub use record::{FieldType, Record};
pub use model::ModelDefinition;
pub use snapshot::TabularSnapshot;
pub use store::{describe_args, Store, StoreError};
pub use config::{ConfigError, DataSource, DbOptions, FixtureLocation, MockOptions, MockerOptions};
