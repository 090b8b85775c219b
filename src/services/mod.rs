//! Directory services.
//!
//! Each service receives its store handles at construction: the reporting
//! structure calculator walks the direct-report graph, the compensation
//! manager runs the create/replace protocol, and the employee manager
//! creates and replaces employee records.

mod compensation;
mod employee;
mod reporting_structure;

pub use compensation::{CompensationManager, EFFECTIVE_DATE_FORMAT};
pub use employee::EmployeeManager;
pub use reporting_structure::{ReportingStructureCalculator, count_reports, reaches};
