//! Mode switch between the stand-in store and a real database
//!
//! A [`Mocker`] is built from [`MockerOptions`]. With `use_db = false` it
//! creates a [`StubStore`] and registers every configured fixture file into
//! it. With `use_db = true` the caller hands over a store connected to the
//! configured data source, and destructive cleanup becomes available.

use sqlmocker_core::{MockerOptions, Store, StoreError, TabularSnapshot, Value};
use sqlmocker_fixture::{FixtureError, FixtureLoader, StubStore};
use sqlmocker_sql::{synthesize_erase, EraseAction};

/// Errors raised by the mocker
#[derive(Debug, thiserror::Error)]
pub enum MockerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

enum Backend {
    Stub(StubStore),
    Genuine(Box<dyn Store>),
}

/// Test database handle in stub or genuine mode
pub struct Mocker {
    backend: Backend,
    options: MockerOptions,
    dsn: String,
}

impl Mocker {
    /// Build a stub-mode mocker and load its fixture files
    ///
    /// Fails when the options ask for a real database, since no store is
    /// available to connect with. Use [`genuine`](Self::genuine) instead.
    pub fn new(options: MockerOptions) -> Result<Self, MockerError> {
        if options.use_db {
            return Err(MockerError::Config(
                "use_db is set; pass a connected store to Mocker::genuine".to_string(),
            ));
        }

        let loader = FixtureLoader::new(options.mock.location.clone());
        let mut stub = StubStore::new();
        for file in &options.mock.files {
            loader.load_and_register(file, &mut stub)?;
        }

        tracing::info!(
            files = options.mock.files.len(),
            expectations = stub.expectation_count(),
            "mocker ready in stub mode"
        );

        Ok(Self {
            backend: Backend::Stub(stub),
            options,
            dsn: String::new(),
        })
    }

    /// Build a genuine-mode mocker over a store for the configured data source
    pub fn genuine(options: MockerOptions, store: Box<dyn Store>) -> Result<Self, MockerError> {
        if !options.use_db {
            return Err(MockerError::Config(
                "use_db is not set; stub mode is built with Mocker::new".to_string(),
            ));
        }

        let dsn = options.db.data_source.dsn();
        tracing::info!(store = store.name(), driver = %options.db.data_source.driver, "mocker ready in genuine mode");

        Ok(Self {
            backend: Backend::Genuine(store),
            options,
            dsn,
        })
    }

    /// Connection string for the data source, empty in stub mode
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    pub fn options(&self) -> &MockerOptions {
        &self.options
    }

    pub fn is_genuine(&self) -> bool {
        matches!(self.backend, Backend::Genuine(_))
    }

    /// The stand-in store, when in stub mode
    pub fn stub(&self) -> Option<&StubStore> {
        match &self.backend {
            Backend::Stub(stub) => Some(stub),
            Backend::Genuine(_) => None,
        }
    }

    pub fn stub_mut(&mut self) -> Option<&mut StubStore> {
        match &mut self.backend {
            Backend::Stub(stub) => Some(stub),
            Backend::Genuine(_) => None,
        }
    }

    fn store(&mut self) -> &mut dyn Store {
        match &mut self.backend {
            Backend::Stub(stub) => stub as &mut dyn Store,
            Backend::Genuine(store) => &mut **store,
        }
    }

    pub fn query(&mut self, sql: &str, args: &[Value]) -> Result<TabularSnapshot, MockerError> {
        Ok(self.store().query(sql, args)?)
    }

    pub fn exec(&mut self, sql: &str, args: &[Value]) -> Result<u64, MockerError> {
        Ok(self.store().exec(sql, args)?)
    }

    /// Drop or truncate `tables` in `database`
    ///
    /// This destroys data. It only runs in genuine mode and is a no-op
    /// against the stand-in.
    pub fn erase_table(
        &mut self,
        action: EraseAction,
        database: &str,
        tables: &[&str],
    ) -> Result<(), MockerError> {
        if !self.is_genuine() {
            tracing::debug!(database, "skipping table erase in stub mode");
            return Ok(());
        }
        if tables.is_empty() {
            return Ok(());
        }

        let sql = synthesize_erase(action, database, tables);
        tracing::warn!(%sql, "erasing tables");
        self.store().exec(&sql, &[])?;
        Ok(())
    }

    /// Clear `tables` in the configured database
    ///
    /// Truncates when `db.truncate_table` is set, drops otherwise.
    pub fn reset_tables(&mut self, tables: &[&str]) -> Result<(), MockerError> {
        let action = if self.options.db.truncate_table {
            EraseAction::TruncateTable
        } else {
            EraseAction::DropTable
        };
        let database = self.options.db.data_source.db_name.clone();
        self.erase_table(action, &database, tables)
    }
}
