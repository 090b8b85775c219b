//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DirectoryError, DirectoryResult};
use crate::store::{Database, DatabaseOptions};

use super::seed::{SeedSummary, seed_database};
use super::types::{CompensationPolicy, ServerConfig, ServiceConfig};

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "service.yaml";

/// Loads and provides access to the service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── service.yaml          # Server, seed and compensation settings
/// └── seed/
///     ├── employees.json    # Optional seed employees
///     └── compensation.json # Optional seed compensation
/// ```
///
/// # Example
///
/// ```no_run
/// use employee_directory::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// let db = loader.build_database();
/// loader.seed(&db)?;
/// println!("Listening on {}", loader.server().bind_address);
/// # Ok::<(), employee_directory::error::DirectoryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ServiceConfig,
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Loads `service.yaml` from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or:
    /// - `ConfigNotFound` when the file is missing or unreadable
    /// - `ConfigParseError` when it is not valid YAML for [`ServiceConfig`]
    pub fn load<P: AsRef<Path>>(path: P) -> DirectoryResult<Self> {
        let base_dir = path.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE_NAME);
        let path_str = config_path.display().to_string();

        let content = fs::read_to_string(&config_path).map_err(|_| {
            DirectoryError::ConfigNotFound {
                path: path_str.clone(),
            }
        })?;

        let config = serde_yaml::from_str(&content).map_err(|e| {
            DirectoryError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            }
        })?;

        Ok(Self { config, base_dir })
    }

    /// Wraps an already-built configuration. Seed paths resolve against
    /// `base_dir`.
    pub fn from_config(config: ServiceConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            base_dir: base_dir.into(),
        }
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the HTTP server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Returns the compensation policy.
    pub fn compensation_policy(&self) -> CompensationPolicy {
        self.config.compensation
    }

    /// Creates an empty database configured by the compensation policy.
    pub fn build_database(&self) -> Database {
        Database::with_options(DatabaseOptions {
            unique_employee_index: self.config.compensation.unique_employee_index,
        })
    }

    /// Loads the configured seed files into `db`.
    pub fn seed(&self, db: &Database) -> DirectoryResult<SeedSummary> {
        let employees = self.resolve(self.config.seed.employees.as_deref());
        let compensation = self.resolve(self.config.seed.compensation.as_deref());
        seed_database(db, employees.as_deref(), compensation.as_deref())
    }

    fn resolve(&self, relative: Option<&str>) -> Option<PathBuf> {
        relative.map(|path| self.base_dir.join(path))
    }
}
