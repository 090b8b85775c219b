//! Configuration loading for the directory service.
//!
//! This module loads the service configuration from YAML and seeds the
//! in-memory database from JSON files.
//!
//! # Example
//!
//! ```no_run
//! use employee_directory::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Binding to {}", config.server().bind_address);
//! ```

mod loader;
mod seed;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use seed::{SeedSummary, seed_database};
pub use types::{CompensationPolicy, DEFAULT_BIND_ADDRESS, SeedConfig, ServerConfig, ServiceConfig};
