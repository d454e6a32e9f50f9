//! Store trait implemented by the stand-in and by real database clients

use crate::snapshot::TabularSnapshot;
use crate::value::Value;

/// Errors raised by a store
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("No expectation matches query: {0}")]
    NoExpectation(String),

    #[error("Arguments do not match for query {query}: expected {expected}, got {actual}")]
    ArgumentMismatch {
        query: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid expectation pattern: {0}")]
    InvalidPattern(String),

    #[error("Driver error: {0}")]
    Driver(String),
}

/// Synchronous query interface consumed by the toolkit
///
/// Results come back as text cells so before/after states can be compared
/// without caring about driver types.
pub trait Store {
    /// Adapter name (e.g. "Stub", "MySQL")
    fn name(&self) -> &'static str;

    /// Run a query and capture its rows
    fn query(&mut self, sql: &str, args: &[Value]) -> Result<TabularSnapshot, StoreError>;

    /// Run a statement and return the affected row count
    fn exec(&mut self, sql: &str, args: &[Value]) -> Result<u64, StoreError>;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn query(&mut self, sql: &str, args: &[Value]) -> Result<TabularSnapshot, StoreError> {
        (**self).query(sql, args)
    }

    fn exec(&mut self, sql: &str, args: &[Value]) -> Result<u64, StoreError> {
        (**self).exec(sql, args)
    }
}

/// Render arguments the way error messages show them
pub fn describe_args(args: &[Value]) -> String {
    let parts: Vec<String> = args.iter().map(|a| format!("{:?}", a)).collect();
    format!("[{}]", parts.join(", "))
}
