//! Fixture loading and the in-memory stand-in store
//!
//! Fixture files describe which rows a query answers with. The loader decodes
//! them without numeric precision loss and registers one expectation per
//! returned block, in file order, into any [`ExpectationRegistry`]. The
//! [`StubStore`] is the registry the mocker uses when no database is in play.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sqlmocker_core::{FixtureLocation, Store};
//! use sqlmocker_fixture::{FixtureLoader, StubStore};
//!
//! let loader = FixtureLoader::new(FixtureLocation::new("tests/mock").with_sub_folder("basic"));
//! let mut store = StubStore::new();
//! loader.load_and_register("select_once.json", &mut store)?;
//!
//! let snapshot = store.query("SELECT 1", &[])?;
//! ```

pub mod decode;
pub mod registry;
pub mod loader;
pub mod stub;

pub use decode::{decode_cell, decode_cells, decode_number, decode_value, decode_values};
pub use registry::{ExpectationRegistry, ExpectedResult, QueryExpectation};
pub use loader::{FixtureError, FixtureLoader, FixtureSet, ReturnRows};
pub use stub::{StubStore, StubStoreBuilder};
