//! Employee create, lookup and replace.

use tracing::info;

use crate::error::{DirectoryError, DirectoryResult};
use crate::models::{Employee, EmployeeUpdate, NewEmployee};
use crate::store::EmployeeStore;

use super::reporting_structure::reaches;

/// Manages employee records over an injected store.
pub struct EmployeeManager<E> {
    employees: E,
}

impl<E: EmployeeStore> EmployeeManager<E> {
    /// Creates a manager over the given employee store.
    pub fn new(employees: E) -> Self {
        Self { employees }
    }

    /// Adds a new employee with a generated id.
    ///
    /// Every direct report must name an existing employee.
    pub fn create(&self, new: NewEmployee) -> DirectoryResult<Employee> {
        self.ensure_reports_exist(&new.direct_reports)?;

        let added = self.employees.add(new.into())?;
        self.employees.save()?;

        info!(employee_id = %added.id, name = %added.full_name(), "employee created");
        Ok(added)
    }

    /// Looks up an employee. Empty and unknown ids both yield `None`.
    pub fn get(&self, id: &str) -> DirectoryResult<Option<Employee>> {
        if id.is_empty() {
            return Ok(None);
        }
        Ok(self.employees.get_by_id(id)?)
    }

    /// Replaces an employee's fields, keeping the id.
    ///
    /// Direct reports are kept unless the update supplies them; supplied
    /// reports must exist and must not lead back to the employee. The old
    /// row is removed and committed before the replacement is inserted under
    /// the same id.
    pub fn replace(&self, id: &str, update: EmployeeUpdate) -> DirectoryResult<Employee> {
        if id.trim().is_empty() {
            return Err(DirectoryError::validation("employeeId", "is required"));
        }

        let existing =
            self.employees
                .get_by_id(id)?
                .ok_or_else(|| DirectoryError::EmployeeNotFound {
                    id: id.to_string(),
                })?;

        if let Some(reports) = &update.direct_reports {
            if reports.iter().any(|report| report == &existing.id) {
                return Err(DirectoryError::validation(
                    "directReports",
                    "an employee cannot report to themselves",
                ));
            }
            self.ensure_reports_exist(reports)?;
            if reaches(&self.employees, reports, &existing.id)? {
                return Err(DirectoryError::validation(
                    "directReports",
                    format!("would make '{}' report to themselves", existing.id),
                ));
            }
        }

        let replacement = update.apply_to(&existing);
        self.employees.remove(&existing)?;
        self.employees.save()?;
        let added = self.employees.add(replacement)?;
        self.employees.save()?;

        info!(employee_id = %added.id, "employee replaced");
        Ok(added)
    }

    fn ensure_reports_exist(&self, reports: &[String]) -> DirectoryResult<()> {
        for report in reports {
            if self.employees.get_by_id(report)?.is_none() {
                return Err(DirectoryError::validation(
                    "directReports",
                    format!("unknown employee '{}'", report),
                ));
            }
        }
        Ok(())
    }
}
