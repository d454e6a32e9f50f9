//! Mocker configuration (sqlmocker.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted when the data source omits a password
pub const PASSWORD_ENV: &str = "SQLMOCKER_DB_PASSWORD";

/// Where fixture files live
///
/// Passed explicitly to the loader; there is no process-wide location.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FixtureLocation {
    /// Primary directory
    #[serde(default)]
    pub root: PathBuf,

    /// Optional sub folder under `root`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_folder: Option<PathBuf>,
}

impl FixtureLocation {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sub_folder: None,
        }
    }

    pub fn with_sub_folder(mut self, sub_folder: impl Into<PathBuf>) -> Self {
        self.sub_folder = Some(sub_folder.into());
        self
    }

    /// Full path of a fixture file
    ///
    /// A leading `/` on the sub folder is treated as relative to `root`.
    pub fn resolve(&self, file: impl AsRef<Path>) -> PathBuf {
        let mut path = self.root.clone();
        if let Some(sub) = &self.sub_folder {
            path.push(sub.strip_prefix("/").unwrap_or(sub.as_path()));
        }
        path.push(file);
        path
    }
}

/// Stand-in store options
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MockOptions {
    /// Fixture directory
    #[serde(flatten)]
    pub location: FixtureLocation,

    /// Fixture files loaded in order
    #[serde(default)]
    pub files: Vec<String>,
}

/// Connection settings for a real store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub driver: String,
    pub user: String,
    #[serde(default)]
    pub password: Option<String>,
    pub protocol: String,
    pub ip: String,
    pub port: String,
    pub db_name: String,
}

impl Default for DataSource {
    fn default() -> Self {
        Self {
            driver: "mysql".to_string(),
            user: "root".to_string(),
            password: None,
            protocol: "tcp".to_string(),
            ip: "127.0.0.1".to_string(),
            port: "3306".to_string(),
            db_name: String::new(),
        }
    }
}

impl DataSource {
    /// Password from the config, else from `SQLMOCKER_DB_PASSWORD`
    pub fn resolved_password(&self) -> String {
        self.password
            .clone()
            .or_else(|| std::env::var(PASSWORD_ENV).ok())
            .unwrap_or_default()
    }

    /// `user:password@protocol(ip:port)/db_name`
    pub fn dsn(&self) -> String {
        format!(
            "{}:{}@{}({}:{})/{}",
            self.user,
            self.resolved_password(),
            self.protocol,
            self.ip,
            self.port,
            self.db_name
        )
    }
}

/// Real store options
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DbOptions {
    /// Truncate tables between runs instead of dropping them
    #[serde(default)]
    pub truncate_table: bool,

    #[serde(default)]
    pub data_source: DataSource,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MockerOptions {
    /// Use a real store instead of the stand-in
    #[serde(default)]
    pub use_db: bool,

    #[serde(default)]
    pub mock: MockOptions,

    #[serde(default)]
    pub db: DbOptions,
}

impl MockerOptions {
    /// Stand-in options loading `files` from `location`
    pub fn stub(location: FixtureLocation, files: Vec<String>) -> Self {
        Self {
            use_db: false,
            mock: MockOptions { location, files },
            db: DbOptions::default(),
        }
    }

    /// Real-store options for a data source
    pub fn genuine(data_source: DataSource) -> Self {
        Self {
            use_db: true,
            mock: MockOptions::default(),
            db: DbOptions {
                truncate_table: false,
                data_source,
            },
        }
    }

    /// Load config from TOML file
    ///
    /// A relative fixture root is resolved against the config file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        let mut options = Self::from_toml(&contents)?;

        if let Some(parent) = path.parent() {
            if options.mock.location.root.is_relative() {
                options.mock.location.root = parent.join(&options.mock.location.root);
            }
        }

        Ok(options)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
