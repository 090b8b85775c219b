//! Application state for the directory API.
//!
//! The state holds the shared database. Every request opens its own store
//! sessions through the service constructors below, so staged changes never
//! leak between requests.

use crate::config::CompensationPolicy;
use crate::services::{CompensationManager, EmployeeManager, ReportingStructureCalculator};
use crate::store::{CompensationSession, Database, EmployeeSession};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    db: Database,
    policy: CompensationPolicy,
}

impl AppState {
    /// Creates a new application state over the given database.
    pub fn new(db: Database, policy: CompensationPolicy) -> Self {
        Self { db, policy }
    }

    /// Returns the shared database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Returns an employee manager over a fresh session.
    pub fn employee_manager(&self) -> EmployeeManager<EmployeeSession> {
        EmployeeManager::new(self.db.employees())
    }

    /// Returns a reporting structure calculator over a fresh session.
    pub fn reporting_calculator(&self) -> ReportingStructureCalculator<EmployeeSession> {
        ReportingStructureCalculator::new(self.db.employees())
    }

    /// Returns a compensation manager over fresh sessions.
    pub fn compensation_manager(&self) -> CompensationManager<EmployeeSession, CompensationSession> {
        CompensationManager::new(self.db.employees(), self.db.compensation())
            .with_strict_effective_date(self.policy.strict_effective_date)
    }
}
