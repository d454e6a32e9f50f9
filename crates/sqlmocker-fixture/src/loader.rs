//! Fixture file loading and registration
//!
//! A fixture file is a JSON list of entries:
//!
//! ```json
//! [
//!   {
//!     "matchPattern": "SELECT id, name FROM hotels WHERE city = ?;",
//!     "arguments": ["New York"],
//!     "returnRows": [
//!       { "columns": ["id", "name"], "rows": [[1, "Grand Hotel"]] }
//!     ]
//!   }
//! ]
//! ```
//!
//! `qureyString` and `queryString` are accepted for `matchPattern`, and
//! `queryArgs` for `arguments`, so older fixture files keep loading.

use crate::decode::{decode_cells, decode_values};
use crate::registry::{ExpectationRegistry, QueryExpectation};
use serde::Deserialize;
use sqlmocker_core::{FixtureLocation, StoreError, Value};
use std::path::Path;

/// Errors raised while loading or registering fixtures
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Registration failed: {0}")]
    Registration(#[from] StoreError),
}

/// One block of rows answered for a fixture entry
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnRows {
    pub columns: Vec<String>,

    /// Cells in column order; `null` in the file decodes to `None`
    pub rows: Vec<Vec<Option<Value>>>,
}

/// One fixture entry as read from file
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureSet {
    /// SQL text to match, taken literally
    pub match_pattern: String,

    pub arguments: Vec<Value>,

    /// Each block becomes its own expectation
    pub return_rows: Vec<ReturnRows>,
}

impl FixtureSet {
    /// Expectations for this entry, one per `returnRows` block
    pub fn expectations(&self) -> Vec<QueryExpectation> {
        let pattern = regex::escape(&self.match_pattern);
        self.return_rows
            .iter()
            .map(|block| {
                QueryExpectation::expect_query(pattern.clone())
                    .with_arguments(self.arguments.clone())
                    .will_return_cells(block.columns.clone(), block.rows.clone())
            })
            .collect()
    }
}

#[derive(Deserialize)]
struct RawFixtureSet {
    #[serde(rename = "matchPattern", alias = "qureyString", alias = "queryString")]
    match_pattern: String,

    #[serde(default, alias = "queryArgs")]
    arguments: Vec<serde_json::Value>,

    #[serde(default, rename = "returnRows")]
    return_rows: Vec<RawReturnRows>,
}

#[derive(Deserialize)]
struct RawReturnRows {
    #[serde(default)]
    columns: Vec<String>,

    #[serde(default)]
    rows: Vec<Vec<serde_json::Value>>,
}

impl RawFixtureSet {
    fn decode(self, index: usize) -> Result<FixtureSet, FixtureError> {
        let context = |e: String| FixtureError::ParseError(format!("entry {}: {}", index, e));

        let arguments = decode_values(&self.arguments).map_err(context)?;

        let mut return_rows = Vec::with_capacity(self.return_rows.len());
        for block in self.return_rows {
            let rows = block
                .rows
                .iter()
                .map(|row| decode_cells(row))
                .collect::<Result<Vec<_>, _>>()
                .map_err(context)?;
            return_rows.push(ReturnRows {
                columns: block.columns,
                rows,
            });
        }

        Ok(FixtureSet {
            match_pattern: self.match_pattern,
            arguments,
            return_rows,
        })
    }
}

/// Reads fixture files below a [`FixtureLocation`]
#[derive(Debug, Clone)]
pub struct FixtureLoader {
    location: FixtureLocation,
}

impl FixtureLoader {
    pub fn new(location: FixtureLocation) -> Self {
        Self { location }
    }

    pub fn location(&self) -> &FixtureLocation {
        &self.location
    }

    /// Read and decode one fixture file
    pub fn load(&self, file: impl AsRef<Path>) -> Result<Vec<FixtureSet>, FixtureError> {
        let path = self.location.resolve(file);
        let content = std::fs::read_to_string(&path)
            .map_err(|e| FixtureError::IoError(format!("{}: {}", path.display(), e)))?;

        let sets = self.load_str(&content).map_err(|e| match e {
            FixtureError::ParseError(msg) => {
                FixtureError::ParseError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        tracing::info!(path = %path.display(), entries = sets.len(), "loaded fixture file");
        Ok(sets)
    }

    /// Decode fixture entries from JSON text
    pub fn load_str(&self, content: &str) -> Result<Vec<FixtureSet>, FixtureError> {
        let raw: Vec<RawFixtureSet> =
            serde_json::from_str(content).map_err(|e| FixtureError::ParseError(e.to_string()))?;

        raw.into_iter()
            .enumerate()
            .map(|(index, set)| set.decode(index))
            .collect()
    }

    /// Register every entry in file order
    ///
    /// Returns how many expectations were registered. Stops at the first
    /// registry error.
    pub fn register<R: ExpectationRegistry + ?Sized>(
        &self,
        sets: &[FixtureSet],
        registry: &mut R,
    ) -> Result<usize, FixtureError> {
        let mut count = 0;
        for set in sets {
            for expectation in set.expectations() {
                tracing::debug!(
                    pattern = %set.match_pattern,
                    arguments = set.arguments.len(),
                    "registering expectation"
                );
                registry.register(expectation)?;
                count += 1;
            }
        }
        Ok(count)
    }

    /// [`load`](Self::load) followed by [`register`](Self::register)
    pub fn load_and_register<R: ExpectationRegistry + ?Sized>(
        &self,
        file: impl AsRef<Path>,
        registry: &mut R,
    ) -> Result<usize, FixtureError> {
        let sets = self.load(file)?;
        self.register(&sets, registry)
    }
}
