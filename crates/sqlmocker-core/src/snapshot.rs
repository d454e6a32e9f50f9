//! Captured query results

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Ordered rows of text cells captured from one query execution
///
/// Immutable once built: there are no mutating accessors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "SnapshotRepr")]
pub struct TabularSnapshot {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Accepts either a bare grid or `{columns, rows}`
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotRepr {
    Grid(Vec<Vec<String>>),
    Table {
        #[serde(default)]
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl From<SnapshotRepr> for TabularSnapshot {
    fn from(repr: SnapshotRepr) -> Self {
        match repr {
            SnapshotRepr::Grid(rows) => Self::from_rows(rows),
            SnapshotRepr::Table { columns, rows } => Self::with_columns(columns, rows),
        }
    }
}

impl TabularSnapshot {
    /// Capture a grid with no column names
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            columns: Vec::new(),
            rows,
        }
    }

    /// Capture a grid along with its column names
    pub fn with_columns(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Column names, empty when the source did not report them
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// SHA-256 of the cell grid, hex encoded
    ///
    /// Cells are length-prefixed so `["ab", "c"]` and `["a", "bc"]` differ.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for row in &self.rows {
            hasher.update((row.len() as u64).to_le_bytes());
            for cell in row {
                hasher.update((cell.len() as u64).to_le_bytes());
                hasher.update(cell.as_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl From<Vec<Vec<String>>> for TabularSnapshot {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::from_rows(rows)
    }
}
