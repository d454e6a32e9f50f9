//! In-memory stand-in store
//!
//! The stub answers queries from registered expectations and never touches a
//! real database. It is what the mocker uses when no database is configured.
//!
//! ## Usage
//!
//! ```rust
//! use sqlmocker_core::Store;
//! use sqlmocker_fixture::{QueryExpectation, StubStore};
//!
//! let mut store = StubStore::builder()
//!     .expect(
//!         QueryExpectation::expect_query(regex::escape("SELECT 1"))
//!             .will_return(vec!["n".into()], vec![vec![7.into()]]),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let snapshot = store.query("SELECT 1", &[]).unwrap();
//! assert_eq!(snapshot.rows(), &[vec!["7".to_string()]]);
//! assert!(store.expectations_were_met().is_ok());
//! ```
//!
//! ## Matching
//!
//! Each call takes the first unconsumed expectation, in registration order,
//! whose pattern matches the SQL text and whose arguments are equal to the
//! call's arguments. A matched expectation is consumed.
//!
//! Cells come back as text. A NULL cell reads as `NULL`.

use crate::registry::{ExpectationRegistry, ExpectedResult, QueryExpectation};
use regex::Regex;
use sqlmocker_core::{describe_args, Store, StoreError, TabularSnapshot, Value};

/// Text of a NULL cell
const NULL_CELL: &str = "NULL";

struct Entry {
    matcher: Regex,
    expectation: QueryExpectation,
    consumed: bool,
}

impl Entry {
    fn answers_rows(&self) -> bool {
        matches!(self.expectation.result, ExpectedResult::Rows { .. })
    }
}

/// Stand-in store driven by expectations
pub struct StubStore {
    entries: Vec<Entry>,

    /// Name to return from name()
    store_name: &'static str,
}

impl StubStore {
    /// Create a stub with no expectations
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            store_name: "Stub",
        }
    }

    pub fn builder() -> StubStoreBuilder {
        StubStoreBuilder::new()
    }

    /// Set a custom store name
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.store_name = name;
        self
    }

    /// Number of registered expectations, consumed or not
    pub fn expectation_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of expectations still waiting for a call
    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.consumed).count()
    }

    /// Fails with the first expectation that was never consumed
    pub fn expectations_were_met(&self) -> Result<(), StoreError> {
        match self.entries.iter().find(|e| !e.consumed) {
            Some(entry) => Err(StoreError::NoExpectation(format!(
                "expectation {} with arguments {} was not met",
                entry.expectation.pattern,
                describe_args(&entry.expectation.arguments)
            ))),
            None => Ok(()),
        }
    }

    /// Drop every expectation, consumed or not
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn take(&mut self, sql: &str, args: &[Value], rows: bool) -> Result<ExpectedResult, StoreError> {
        let mut mismatch: Option<String> = None;
        let mut found: Option<usize> = None;

        for (index, entry) in self.entries.iter().enumerate() {
            if entry.consumed || entry.answers_rows() != rows || !entry.matcher.is_match(sql) {
                continue;
            }
            if entry.expectation.arguments.as_slice() == args {
                found = Some(index);
                break;
            }
            if mismatch.is_none() {
                mismatch = Some(describe_args(&entry.expectation.arguments));
            }
        }

        if let Some(index) = found {
            let entry = &mut self.entries[index];
            entry.consumed = true;
            tracing::debug!(pattern = %entry.expectation.pattern, "stub expectation matched");
            return Ok(entry.expectation.result.clone());
        }

        Err(match mismatch {
            Some(expected) => StoreError::ArgumentMismatch {
                query: sql.to_string(),
                expected,
                actual: describe_args(args),
            },
            None => StoreError::NoExpectation(sql.to_string()),
        })
    }
}

impl Default for StubStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpectationRegistry for StubStore {
    fn register(&mut self, expectation: QueryExpectation) -> Result<(), StoreError> {
        let matcher = Regex::new(&expectation.pattern)
            .map_err(|e| StoreError::InvalidPattern(format!("{}: {}", expectation.pattern, e)))?;

        self.entries.push(Entry {
            matcher,
            expectation,
            consumed: false,
        });
        Ok(())
    }
}

impl Store for StubStore {
    fn name(&self) -> &'static str {
        self.store_name
    }

    fn query(&mut self, sql: &str, args: &[Value]) -> Result<TabularSnapshot, StoreError> {
        match self.take(sql, args, true)? {
            ExpectedResult::Rows { columns, rows } => {
                let cells = rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|cell| match cell {
                                Some(value) => value.to_string(),
                                None => NULL_CELL.to_string(),
                            })
                            .collect()
                    })
                    .collect();
                Ok(TabularSnapshot::with_columns(columns, cells))
            }
            ExpectedResult::Affected(_) => Err(StoreError::NoExpectation(sql.to_string())),
        }
    }

    fn exec(&mut self, sql: &str, args: &[Value]) -> Result<u64, StoreError> {
        match self.take(sql, args, false)? {
            ExpectedResult::Affected(count) => Ok(count),
            ExpectedResult::Rows { .. } => Err(StoreError::NoExpectation(sql.to_string())),
        }
    }
}

/// Builder for a [`StubStore`] with expectations
///
/// Patterns are compiled in [`build`](Self::build), so a bad pattern
/// surfaces there.
pub struct StubStoreBuilder {
    expectations: Vec<QueryExpectation>,
    store_name: &'static str,
}

impl StubStoreBuilder {
    pub fn new() -> Self {
        Self {
            expectations: Vec::new(),
            store_name: "Stub",
        }
    }

    pub fn expect(mut self, expectation: QueryExpectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.store_name = name;
        self
    }

    pub fn build(self) -> Result<StubStore, StoreError> {
        let mut store = StubStore::new().with_name(self.store_name);
        for expectation in self.expectations {
            store.register(expectation)?;
        }
        Ok(store)
    }
}

impl Default for StubStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
