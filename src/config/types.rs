//! Configuration types for the directory service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `service.yaml`. Every section is optional and falls
//! back to its defaults.

use serde::Deserialize;

/// Default address the HTTP server binds to.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Seed data files, loaded into empty tables at startup.
    pub seed: SeedConfig,
    /// Compensation policy switches.
    pub compensation: CompensationPolicy,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on, e.g. `0.0.0.0:8080`.
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

/// Seed data file locations, relative to the configuration directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// JSON array of employees.
    pub employees: Option<String>,
    /// JSON array of compensation records.
    pub compensation: Option<String>,
}

/// Compensation policy switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompensationPolicy {
    /// Reject effective dates that are not `YYYY-MM-DD`.
    pub strict_effective_date: bool,
    /// Enforce one compensation row per employee in the store.
    pub unique_employee_index: bool,
}

impl Default for CompensationPolicy {
    fn default() -> Self {
        Self {
            strict_effective_date: false,
            unique_employee_index: true,
        }
    }
}
