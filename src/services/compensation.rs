//! Compensation create/replace protocol.
//!
//! An employee has at most one current compensation record. Creating a
//! compensation for an employee who already has one replaces it:
//!
//! 1. stage the removal of the existing record
//! 2. save
//! 3. stage the insert of the new record, with a fresh id
//! 4. save
//!
//! The two saves are separate commits. Nothing isolates the sequence from a
//! concurrent create for the same employee; see `tests/concurrency.rs` for
//! the interleavings and what each leaves behind.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{DirectoryError, DirectoryResult};
use crate::models::{Compensation, CompensationRequest};
use crate::store::{CompensationStore, EmployeeStore};

/// Accepted format for effective dates when strict validation is on.
pub const EFFECTIVE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Creates and reads compensation records over injected stores.
pub struct CompensationManager<E, C> {
    employees: E,
    compensation: C,
    strict_effective_date: bool,
}

impl<E: EmployeeStore, C: CompensationStore> CompensationManager<E, C> {
    /// Creates a manager over the given stores, passing effective dates
    /// through unchecked.
    pub fn new(employees: E, compensation: C) -> Self {
        Self {
            employees,
            compensation,
            strict_effective_date: false,
        }
    }

    /// Requires effective dates to parse as `YYYY-MM-DD` when `strict` is set.
    pub fn with_strict_effective_date(mut self, strict: bool) -> Self {
        self.strict_effective_date = strict;
        self
    }

    /// Creates the current compensation for an employee, replacing any
    /// existing one.
    ///
    /// # Returns
    ///
    /// The new record with its `employee` populated, or:
    /// - `Validation` when `employee_id` is blank, `salary` is negative, or
    ///   (strict mode) `effective_date` is not a date
    /// - `EmployeeNotFound` when the employee does not exist
    /// - `Store(_)` when any store call fails; the remaining steps are skipped
    ///
    /// # Example
    ///
    /// ```
    /// use employee_directory::models::{CompensationRequest, Employee};
    /// use employee_directory::services::CompensationManager;
    /// use employee_directory::store::{Database, EmployeeStore};
    /// use rust_decimal::Decimal;
    ///
    /// let db = Database::new();
    /// let employees = db.employees();
    /// employees.add(Employee {
    ///     id: "ringo".to_string(),
    ///     first_name: "Ringo".to_string(),
    ///     last_name: "Starr".to_string(),
    ///     department: "Engineering".to_string(),
    ///     position: "Developer V".to_string(),
    ///     direct_reports: vec![],
    /// })?;
    /// employees.save()?;
    ///
    /// let manager = CompensationManager::new(db.employees(), db.compensation());
    /// let created = manager.create(CompensationRequest {
    ///     employee_id: "ringo".to_string(),
    ///     salary: Decimal::new(90_000, 0),
    ///     effective_date: "2023-06-15".to_string(),
    /// })?;
    ///
    /// assert_eq!(created.employee_id, "ringo");
    /// assert!(!created.id.is_empty());
    /// # Ok::<(), employee_directory::error::DirectoryError>(())
    /// ```
    pub fn create(&self, request: CompensationRequest) -> DirectoryResult<Compensation> {
        self.validate(&request)?;

        let employee = self
            .employees
            .get_by_id(&request.employee_id)?
            .ok_or_else(|| DirectoryError::EmployeeNotFound {
                id: request.employee_id.clone(),
            })?;

        let record = Compensation {
            id: String::new(),
            employee_id: request.employee_id,
            salary: request.salary,
            effective_date: request.effective_date,
            employee: Some(employee.clone()),
        };

        let created = match self.compensation.get_by_employee_id(&record.employee_id)? {
            None => self.insert(record)?,
            Some(existing) => self.replace(existing, record)?,
        };

        Ok(Compensation {
            employee: Some(employee),
            ..created
        })
    }

    /// Returns the current compensation for an employee with its employee
    /// populated, or `None` when `employee_id` is empty or has none.
    pub fn get_by_employee_id(&self, employee_id: &str) -> DirectoryResult<Option<Compensation>> {
        if employee_id.is_empty() {
            return Ok(None);
        }

        let Some(mut compensation) = self.compensation.get_by_employee_id(employee_id)? else {
            return Ok(None);
        };
        compensation.employee = self.employees.get_by_id(&compensation.employee_id)?;
        Ok(Some(compensation))
    }

    fn validate(&self, request: &CompensationRequest) -> DirectoryResult<()> {
        if request.employee_id.trim().is_empty() {
            return Err(DirectoryError::validation("employeeId", "is required"));
        }

        if request.salary < Decimal::ZERO {
            return Err(DirectoryError::validation(
                "salary",
                format!("must not be negative, got {}", request.salary),
            ));
        }

        if self.strict_effective_date
            && NaiveDate::parse_from_str(&request.effective_date, EFFECTIVE_DATE_FORMAT).is_err()
        {
            return Err(DirectoryError::validation(
                "effectiveDate",
                format!("'{}' is not a YYYY-MM-DD date", request.effective_date),
            ));
        }

        Ok(())
    }

    fn insert(&self, record: Compensation) -> DirectoryResult<Compensation> {
        let added = self.compensation.add(record)?;
        self.compensation.save()?;

        info!(
            compensation_id = %added.id,
            employee_id = %added.employee_id,
            "compensation created"
        );
        Ok(added)
    }

    fn replace(
        &self,
        existing: Compensation,
        mut record: Compensation,
    ) -> DirectoryResult<Compensation> {
        self.compensation.remove(&existing)?;
        // The removal must be committed before the insert: the unique employee
        // index is checked against committed rows.
        self.compensation.save()?;
        debug!(
            compensation_id = %existing.id,
            employee_id = %existing.employee_id,
            "superseded compensation removed"
        );

        record.employee_id = existing.employee_id.clone();
        let added = self.compensation.add(record)?;
        self.compensation.save()?;

        info!(
            compensation_id = %added.id,
            replaced_id = %existing.id,
            employee_id = %added.employee_id,
            "compensation replaced"
        );
        Ok(added)
    }
}
