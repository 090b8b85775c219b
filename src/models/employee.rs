//! Employee model and related request types.
//!
//! Employees form an arena keyed by id; `direct_reports` holds the ids of the
//! employees reporting to this one, resolved through the employee store on
//! demand rather than embedded.

use serde::{Deserialize, Serialize};

/// Represents an employee in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier, assigned by the store when the employee is added.
    #[serde(rename = "employeeId", default)]
    pub id: String,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The department the employee works in.
    #[serde(default)]
    pub department: String,
    /// The employee's position or title.
    #[serde(default)]
    pub position: String,
    /// Ids of the employees reporting directly to this one, in order.
    #[serde(default)]
    pub direct_reports: Vec<String>,
}

impl Employee {
    /// Returns true if nobody reports to this employee.
    ///
    /// # Examples
    ///
    /// ```
    /// use employee_directory::models::Employee;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     first_name: "Pete".to_string(),
    ///     last_name: "Best".to_string(),
    ///     department: "Engineering".to_string(),
    ///     position: "Developer II".to_string(),
    ///     direct_reports: vec![],
    /// };
    /// assert!(employee.is_leaf());
    /// ```
    pub fn is_leaf(&self) -> bool {
        self.direct_reports.is_empty()
    }

    /// Returns the employee's display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Fields accepted when creating an employee. The id is always generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The department the employee works in.
    #[serde(default)]
    pub department: String,
    /// The employee's position or title.
    #[serde(default)]
    pub position: String,
    /// Ids of existing employees reporting to the new one.
    #[serde(default)]
    pub direct_reports: Vec<String>,
}

impl From<NewEmployee> for Employee {
    fn from(new: NewEmployee) -> Self {
        Employee {
            id: String::new(),
            first_name: new.first_name,
            last_name: new.last_name,
            department: new.department,
            position: new.position,
            direct_reports: new.direct_reports,
        }
    }
}

/// Replacement fields for an existing employee.
///
/// The id never changes. `direct_reports` is kept from the existing record
/// when the update leaves it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The department the employee works in.
    #[serde(default)]
    pub department: String,
    /// The employee's position or title.
    #[serde(default)]
    pub position: String,
    /// Replacement direct reports, or `None` to keep the current ones.
    #[serde(default)]
    pub direct_reports: Option<Vec<String>>,
}

impl EmployeeUpdate {
    /// Applies the update on top of `existing`, keeping its id.
    pub fn apply_to(self, existing: &Employee) -> Employee {
        Employee {
            id: existing.id.clone(),
            first_name: self.first_name,
            last_name: self.last_name,
            department: self.department,
            position: self.position,
            direct_reports: self
                .direct_reports
                .unwrap_or_else(|| existing.direct_reports.clone()),
        }
    }
}
