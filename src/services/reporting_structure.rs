//! Reporting structure calculation.
//!
//! Counts every employee reachable through direct-report links below a given
//! employee. The walk uses an explicit stack and a visited set, so deep
//! hierarchies cannot overflow the call stack and a cycle or a shared report
//! is never counted twice.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{DirectoryError, DirectoryResult};
use crate::models::{Employee, ReportingStructure};
use crate::store::EmployeeStore;

/// Computes reporting structures over an injected employee store.
///
/// # Example
///
/// ```
/// use employee_directory::models::Employee;
/// use employee_directory::services::ReportingStructureCalculator;
/// use employee_directory::store::{Database, EmployeeStore};
///
/// fn employee(id: &str, reports: &[&str]) -> Employee {
///     Employee {
///         id: id.to_string(),
///         first_name: id.to_string(),
///         last_name: "Test".to_string(),
///         department: "Engineering".to_string(),
///         position: "Developer".to_string(),
///         direct_reports: reports.iter().map(|r| r.to_string()).collect(),
///     }
/// }
///
/// let db = Database::new();
/// let session = db.employees();
/// session.add(employee("john", &["paul", "ringo"]))?;
/// session.add(employee("paul", &[]))?;
/// session.add(employee("ringo", &[]))?;
/// session.save()?;
///
/// let calculator = ReportingStructureCalculator::new(db.employees());
/// let structure = calculator.compute("john")?.unwrap();
/// assert_eq!(structure.number_of_reports, 2);
/// # Ok::<(), employee_directory::error::DirectoryError>(())
/// ```
pub struct ReportingStructureCalculator<E> {
    employees: E,
}

impl<E: EmployeeStore> ReportingStructureCalculator<E> {
    /// Creates a calculator reading from the given employee store.
    pub fn new(employees: E) -> Self {
        Self { employees }
    }

    /// Computes the reporting structure for an employee.
    ///
    /// # Returns
    ///
    /// - `Ok(None)` when `employee_id` is empty
    /// - `Err(EmployeeNotFound)` when no employee has that id
    /// - `Err(Store(_))` when a store lookup fails
    pub fn compute(&self, employee_id: &str) -> DirectoryResult<Option<ReportingStructure>> {
        if employee_id.is_empty() {
            return Ok(None);
        }

        let employee = self.employees.get_by_id(employee_id)?.ok_or_else(|| {
            DirectoryError::EmployeeNotFound {
                id: employee_id.to_string(),
            }
        })?;

        let number_of_reports = count_reports(&self.employees, &employee)?;
        debug!(
            employee_id = %employee.id,
            number_of_reports,
            "computed reporting structure"
        );

        Ok(Some(ReportingStructure {
            employee,
            number_of_reports,
        }))
    }
}

/// Counts the distinct employees reachable below `root`.
///
/// Each visited employee counts once; `root` itself is excluded. Direct
/// report ids that do not resolve are skipped.
pub fn count_reports<E>(employees: &E, root: &Employee) -> DirectoryResult<usize>
where
    E: EmployeeStore + ?Sized,
{
    let mut visited: HashSet<String> = HashSet::from([root.id.clone()]);
    let mut stack: Vec<String> = root.direct_reports.iter().rev().cloned().collect();
    let mut count = 0;

    while let Some(id) = stack.pop() {
        if !visited.insert(id.clone()) {
            warn!(
                root_id = %root.id,
                employee_id = %id,
                "employee reached twice in reporting graph, not counted again"
            );
            continue;
        }

        let Some(report) = employees.get_by_id(&id)? else {
            warn!(root_id = %root.id, employee_id = %id, "direct report does not resolve");
            continue;
        };

        count += 1;
        stack.extend(report.direct_reports.iter().rev().cloned());
    }

    Ok(count)
}

/// Returns true if `target` is among `from` or reachable below any of them.
///
/// Uses the same stack-and-visited walk as [`count_reports`]; ids that do not
/// resolve end their branch.
pub fn reaches<E>(employees: &E, from: &[String], target: &str) -> DirectoryResult<bool>
where
    E: EmployeeStore + ?Sized,
{
    let mut visited: HashSet<String> = HashSet::new();
    let mut stack: Vec<String> = from.iter().rev().cloned().collect();

    while let Some(id) = stack.pop() {
        if id == target {
            return Ok(true);
        }
        if !visited.insert(id.clone()) {
            continue;
        }
        if let Some(report) = employees.get_by_id(&id)? {
            stack.extend(report.direct_reports.iter().rev().cloned());
        }
    }

    Ok(false)
}
