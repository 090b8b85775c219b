//! Seed data loading.
//!
//! Seed files are JSON arrays of [`Employee`] and [`Compensation`] records
//! with their ids already set. A table is seeded only while it is empty.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::{DirectoryError, DirectoryResult};
use crate::models::{Compensation, Employee};
use crate::store::{CompensationStore, Database, EmployeeStore};

/// Number of records loaded by [`seed_database`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Employees inserted.
    pub employees: usize,
    /// Compensation records inserted.
    pub compensation: usize,
}

/// Loads seed files into the empty tables of `db`.
///
/// Direct reports naming employees absent from the seed file are dropped,
/// and compensation rows for unknown employees are skipped.
pub fn seed_database(
    db: &Database,
    employees_path: Option<&Path>,
    compensation_path: Option<&Path>,
) -> DirectoryResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    if let Some(path) = employees_path {
        if db.employee_count()? == 0 {
            let employees: Vec<Employee> = read_json(path)?;
            summary.employees = insert_employees(db, employees)?;
        }
    }

    if let Some(path) = compensation_path {
        if db.compensation_count()? == 0 {
            let compensation: Vec<Compensation> = read_json(path)?;
            summary.compensation = insert_compensation(db, compensation)?;
        }
    }

    info!(
        employees = summary.employees,
        compensation = summary.compensation,
        "seed data loaded"
    );
    Ok(summary)
}

fn insert_employees(db: &Database, mut employees: Vec<Employee>) -> DirectoryResult<usize> {
    let known: HashSet<String> = employees.iter().map(|e| e.id.clone()).collect();

    for employee in &mut employees {
        employee.direct_reports.retain(|report| {
            let resolves = known.contains(report);
            if !resolves {
                warn!(
                    employee_id = %employee.id,
                    report_id = %report,
                    "dropping unresolved direct report from seed data"
                );
            }
            resolves
        });
    }

    let session = db.employees();
    let count = employees.len();
    for employee in employees {
        session.add(employee)?;
    }
    session.save()?;
    Ok(count)
}

fn insert_compensation(db: &Database, records: Vec<Compensation>) -> DirectoryResult<usize> {
    let employees = db.employees();
    let session = db.compensation();
    let mut count = 0;

    for record in records {
        if employees.get_by_id(&record.employee_id)?.is_none() {
            warn!(
                compensation_id = %record.id,
                employee_id = %record.employee_id,
                "skipping seed compensation for unknown employee"
            );
            continue;
        }
        session.add(record)?;
        count += 1;
    }
    session.save()?;
    Ok(count)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> DirectoryResult<T> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|e| DirectoryError::SeedDataError {
        path: path_str.clone(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| DirectoryError::SeedDataError {
        path: path_str,
        message: e.to_string(),
    })
}
