//! Store interfaces consumed by the directory services.
//!
//! Services receive store handles explicitly; there is no global store. A
//! handle is a unit of work: `add` and `remove` are staged and become durable
//! on `save`, and reads through the same handle see its staged changes.
//!
//! The in-memory [`Database`] is the implementation used by the server and
//! the tests.

mod memory;

pub use memory::{CompensationSession, Database, DatabaseOptions, EmployeeSession};

use crate::error::StoreResult;
use crate::models::{Compensation, Employee};

/// Employee records and their direct-report links.
pub trait EmployeeStore {
    /// Looks up an employee by id.
    fn get_by_id(&self, id: &str) -> StoreResult<Option<Employee>>;

    /// Stages an insert. Assigns a fresh id when the record has none.
    fn add(&self, employee: Employee) -> StoreResult<Employee>;

    /// Stages the removal of an existing employee.
    fn remove(&self, employee: &Employee) -> StoreResult<Employee>;

    /// Commits staged changes.
    fn save(&self) -> StoreResult<()>;
}

/// Compensation records with a lookup-by-employee index.
pub trait CompensationStore {
    /// Stages an insert. Assigns a fresh id when the record has none.
    fn add(&self, compensation: Compensation) -> StoreResult<Compensation>;

    /// Looks up the current compensation for an employee.
    fn get_by_employee_id(&self, employee_id: &str) -> StoreResult<Option<Compensation>>;

    /// Stages the removal of an existing compensation record.
    fn remove(&self, compensation: &Compensation) -> StoreResult<Compensation>;

    /// Commits staged changes.
    fn save(&self) -> StoreResult<()>;
}

impl<S: EmployeeStore + ?Sized> EmployeeStore for &S {
    fn get_by_id(&self, id: &str) -> StoreResult<Option<Employee>> {
        (**self).get_by_id(id)
    }

    fn add(&self, employee: Employee) -> StoreResult<Employee> {
        (**self).add(employee)
    }

    fn remove(&self, employee: &Employee) -> StoreResult<Employee> {
        (**self).remove(employee)
    }

    fn save(&self) -> StoreResult<()> {
        (**self).save()
    }
}

impl<S: CompensationStore + ?Sized> CompensationStore for &S {
    fn add(&self, compensation: Compensation) -> StoreResult<Compensation> {
        (**self).add(compensation)
    }

    fn get_by_employee_id(&self, employee_id: &str) -> StoreResult<Option<Compensation>> {
        (**self).get_by_employee_id(employee_id)
    }

    fn remove(&self, compensation: &Compensation) -> StoreResult<Compensation> {
        (**self).remove(compensation)
    }

    fn save(&self) -> StoreResult<()> {
        (**self).save()
    }
}
