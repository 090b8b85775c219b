//! Core data models for the employee directory.
//!
//! This module contains the records held by the stores and the types
//! derived from them.

mod compensation;
mod employee;
mod reporting_structure;

pub use compensation::{Compensation, CompensationRequest};
pub use employee::{Employee, EmployeeUpdate, NewEmployee};
pub use reporting_structure::ReportingStructure;
