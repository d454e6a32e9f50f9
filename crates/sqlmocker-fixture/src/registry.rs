//! Expectation registration interface

use sqlmocker_core::{StoreError, Value};

/// What a matched expectation answers with
#[derive(Debug, Clone, PartialEq)]
pub enum ExpectedResult {
    /// Rows for `query`; `None` cells are NULL
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<Option<Value>>>,
    },

    /// Affected row count for `exec`
    Affected(u64),
}

/// One "when this query runs with these arguments, answer this" entry
///
/// Built fluently:
///
/// ```rust
/// use sqlmocker_fixture::QueryExpectation;
///
/// let expectation = QueryExpectation::expect_query("SELECT 1")
///     .with_arguments(vec![])
///     .will_return(vec!["n".into()], vec![vec![7.into()]]);
/// assert_eq!(expectation.pattern, "SELECT 1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryExpectation {
    /// Regular expression matched against the SQL text
    pub pattern: String,

    /// Arguments that must match exactly
    pub arguments: Vec<Value>,

    pub result: ExpectedResult,
}

impl QueryExpectation {
    /// Start an expectation for `pattern` with no arguments and an empty result
    pub fn expect_query(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            arguments: Vec::new(),
            result: ExpectedResult::Rows {
                columns: Vec::new(),
                rows: Vec::new(),
            },
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<Value>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn will_return(self, columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let cells = rows
            .into_iter()
            .map(|row| row.into_iter().map(Some).collect())
            .collect();
        self.will_return_cells(columns, cells)
    }

    /// Like [`will_return`](Self::will_return) with nullable cells
    pub fn will_return_cells(mut self, columns: Vec<String>, rows: Vec<Vec<Option<Value>>>) -> Self {
        self.result = ExpectedResult::Rows { columns, rows };
        self
    }

    pub fn will_return_affected(mut self, affected: u64) -> Self {
        self.result = ExpectedResult::Affected(affected);
        self
    }
}

/// Sink for expectations, in registration order
///
/// Implementations are single-writer: order matters when several
/// expectations share a pattern.
pub trait ExpectationRegistry {
    fn register(&mut self, expectation: QueryExpectation) -> Result<(), StoreError>;
}

impl ExpectationRegistry for Vec<QueryExpectation> {
    fn register(&mut self, expectation: QueryExpectation) -> Result<(), StoreError> {
        self.push(expectation);
        Ok(())
    }
}
