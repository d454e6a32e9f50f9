//! sqlmocker engine
//!
//! This crate ties the toolkit together:
//! - Snapshot comparison for before/after checks
//! - The mocker, switching between fixture-driven stub and real store

pub mod compare;
pub mod mocker;

pub use compare::{Comparison, Condition, DifferenceRecord, SnapshotComparator, STRUCTURAL};
pub use mocker::{Mocker, MockerError};
