//! Before/after snapshot comparison
//!
//! Compares two captured query results cell by cell. Structural mismatches
//! (row count, row length) stop the scan immediately. Value mismatches do
//! not: every differing cell is reported.

use serde::{Deserialize, Serialize};
use sqlmocker_core::TabularSnapshot;

/// Index used when a mismatch is structural at that level
pub const STRUCTURAL: i64 = -1;

/// Overall outcome of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Equal,
    LengthMismatch,
    ValueMismatch,
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Equal => write!(f, "equal"),
            Condition::LengthMismatch => write!(f, "length mismatch"),
            Condition::ValueMismatch => write!(f, "value mismatch"),
        }
    }
}

/// One place where the snapshots disagree
///
/// `row_index` and/or `column_index` are [`STRUCTURAL`] for length
/// mismatches, which carry empty values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferenceRecord {
    pub row_index: i64,
    pub column_index: i64,
    pub before_value: String,
    pub after_value: String,
}

impl DifferenceRecord {
    pub fn new(
        row_index: i64,
        column_index: i64,
        before_value: impl Into<String>,
        after_value: impl Into<String>,
    ) -> Self {
        Self {
            row_index,
            column_index,
            before_value: before_value.into(),
            after_value: after_value.into(),
        }
    }

    fn structural(row_index: i64) -> Self {
        Self::new(row_index, STRUCTURAL, "", "")
    }

    /// Whether this records a length mismatch rather than a cell value
    pub fn is_structural(&self) -> bool {
        self.column_index == STRUCTURAL
    }
}

impl std::fmt::Display for DifferenceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.row_index, self.column_index) {
            (STRUCTURAL, _) => write!(f, "row count differs"),
            (row, STRUCTURAL) => write!(f, "row {}: column count differs", row),
            (row, column) => write!(
                f,
                "row {}, column {}: {:?} -> {:?}",
                row, column, self.before_value, self.after_value
            ),
        }
    }
}

/// Result of [`SnapshotComparator::compare`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub same: bool,
    pub condition: Condition,
    pub differences: Vec<DifferenceRecord>,
}

impl Comparison {
    fn equal() -> Self {
        Self {
            same: true,
            condition: Condition::Equal,
            differences: Vec::new(),
        }
    }

    /// Only the cell-level differences
    pub fn value_differences(&self) -> impl Iterator<Item = &DifferenceRecord> {
        self.differences.iter().filter(|d| !d.is_structural())
    }
}

/// Compares captured snapshots
pub struct SnapshotComparator;

impl SnapshotComparator {
    /// Compare `before` against `after`
    ///
    /// A row-length mismatch is appended after any value differences found
    /// in earlier rows, and ends the scan.
    pub fn compare(before: &TabularSnapshot, after: &TabularSnapshot) -> Comparison {
        Self::compare_rows(before.rows(), after.rows())
    }

    /// Same as [`compare`](Self::compare) over raw grids
    pub fn compare_rows(before: &[Vec<String>], after: &[Vec<String>]) -> Comparison {
        if before.len() != after.len() {
            return Comparison {
                same: false,
                condition: Condition::LengthMismatch,
                differences: vec![DifferenceRecord::new(STRUCTURAL, STRUCTURAL, "", "")],
            };
        }

        let mut result = Comparison::equal();

        for (i, (row_before, row_after)) in before.iter().zip(after).enumerate() {
            if row_before.len() != row_after.len() {
                result.differences.push(DifferenceRecord::structural(i as i64));
                result.same = false;
                result.condition = Condition::LengthMismatch;
                return result;
            }

            for (j, (cell_before, cell_after)) in row_before.iter().zip(row_after).enumerate() {
                if cell_before != cell_after {
                    result.differences.push(DifferenceRecord::new(
                        i as i64,
                        j as i64,
                        cell_before.as_str(),
                        cell_after.as_str(),
                    ));
                    result.condition = Condition::ValueMismatch;
                }
            }
        }

        result.same = result.differences.is_empty();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid(rows: &[&[&str]]) -> TabularSnapshot {
        TabularSnapshot::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_equal_results() {
        let a = grid(&[&["a", "b"], &["c", "d"]]);
        let result = SnapshotComparator::compare(&a, &a.clone());

        assert_eq!(result, Comparison::equal());
    }

    #[test]
    fn test_empty_snapshots_are_equal() {
        let result = SnapshotComparator::compare(&grid(&[]), &grid(&[]));
        assert!(result.same);
        assert_eq!(result.condition, Condition::Equal);
    }

    #[test]
    fn test_single_value_difference() {
        let before = grid(&[&["a", "b"], &["c", "d"]]);
        let after = grid(&[&["a", "b"], &["e", "d"]]);

        let result = SnapshotComparator::compare(&before, &after);
        assert!(!result.same);
        assert_eq!(result.condition, Condition::ValueMismatch);
        assert_eq!(result.differences, vec![DifferenceRecord::new(1, 0, "c", "e")]);
    }

    #[test]
    fn test_all_value_differences_are_collected() {
        let before = grid(&[&["a", "b", "c"], &["j", "k", "l"], &["w", "x", "y"]]);
        let after = grid(&[&["a", "b", "x"], &["j", "z", "l"], &["w", "x", "z"]]);

        let result = SnapshotComparator::compare(&before, &after);
        assert_eq!(result.condition, Condition::ValueMismatch);
        assert_eq!(
            result.differences,
            vec![
                DifferenceRecord::new(0, 2, "c", "x"),
                DifferenceRecord::new(1, 1, "k", "z"),
                DifferenceRecord::new(2, 2, "y", "z"),
            ]
        );
    }

    #[test]
    fn test_row_count_mismatch() {
        let before = grid(&[&["a"], &["b"]]);
        let after = grid(&[&["x"]]);

        let result = SnapshotComparator::compare(&before, &after);
        assert!(!result.same);
        assert_eq!(result.condition, Condition::LengthMismatch);
        assert_eq!(result.differences, vec![DifferenceRecord::new(-1, -1, "", "")]);
        assert_eq!(result.value_differences().count(), 0);
    }

    #[test]
    fn test_row_length_mismatch_stops_scan() {
        let before = grid(&[&["a", "b"], &["c", "d"], &["e", "f"]]);
        let after = grid(&[&["a", "x"], &["c"], &["z", "z"]]);

        let result = SnapshotComparator::compare(&before, &after);
        assert!(!result.same);
        assert_eq!(result.condition, Condition::LengthMismatch);
        assert_eq!(
            result.differences,
            vec![
                DifferenceRecord::new(0, 1, "b", "x"),
                DifferenceRecord::new(1, -1, "", ""),
            ]
        );
    }

    #[test]
    fn test_difference_display() {
        assert_eq!(DifferenceRecord::new(-1, -1, "", "").to_string(), "row count differs");
        assert_eq!(DifferenceRecord::new(3, -1, "", "").to_string(), "row 3: column count differs");
        assert_eq!(
            DifferenceRecord::new(2, 3, "4.20", "X").to_string(),
            "row 2, column 3: \"4.20\" -> \"X\""
        );
    }
}
