//! Compensation model and the create request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Employee;

/// A compensation record for one employee.
///
/// The `employee` reference is denormalized: stores persist the record
/// without it and the compensation service fills it in on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compensation {
    /// Unique identifier, assigned by the store when the record is added.
    #[serde(rename = "compensationId", default)]
    pub id: String,
    /// The employee this compensation belongs to.
    pub employee_id: String,
    /// The salary amount.
    pub salary: Decimal,
    /// The date the salary takes effect, kept as the caller supplied it.
    #[serde(default)]
    pub effective_date: String,
    /// The associated employee, populated on read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
}

impl Compensation {
    /// Returns a copy without the denormalized employee, as stored.
    pub fn detached(&self) -> Self {
        Self {
            employee: None,
            ..self.clone()
        }
    }
}

/// Request to create (or replace) an employee's current compensation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationRequest {
    /// The employee the compensation is for. Missing decodes as empty.
    #[serde(default)]
    pub employee_id: String,
    /// The salary amount.
    pub salary: Decimal,
    /// The date the salary takes effect.
    #[serde(default)]
    pub effective_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_request_with_string_salary() {
        let json = r#"{
            "employeeId": "03aa1462-ffa9-4978-901b-7c001562cf6f",
            "salary": "90000.00",
            "effectiveDate": "2023-06-15"
        }"#;

        let request: CompensationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_id, "03aa1462-ffa9-4978-901b-7c001562cf6f");
        assert_eq!(request.salary, Decimal::new(9_000_000, 2));
        assert_eq!(request.effective_date, "2023-06-15");
    }

    #[test]
    fn test_missing_employee_id_decodes_as_empty() {
        let json = r#"{ "salary": "100" }"#;
        let request: CompensationRequest = serde_json::from_str(json).unwrap();
        assert!(request.employee_id.is_empty());
        assert!(request.effective_date.is_empty());
    }

    #[test]
    fn test_serialize_compensation_skips_missing_employee() {
        let compensation = Compensation {
            id: "c1".to_string(),
            employee_id: "e1".to_string(),
            salary: Decimal::new(100_000, 0),
            effective_date: "2023-03-15".to_string(),
            employee: None,
        };

        let json = serde_json::to_value(&compensation).unwrap();
        assert_eq!(json["compensationId"], "c1");
        assert_eq!(json["employeeId"], "e1");
        assert_eq!(json["salary"], "100000");
        assert!(json.get("employee").is_none());
    }

    #[test]
    fn test_detached_drops_employee() {
        let compensation = Compensation {
            id: "c1".to_string(),
            employee_id: "e1".to_string(),
            salary: Decimal::ONE,
            effective_date: String::new(),
            employee: Some(Employee {
                id: "e1".to_string(),
                first_name: "Paul".to_string(),
                last_name: "McCartney".to_string(),
                department: "Engineering".to_string(),
                position: "Developer I".to_string(),
                direct_reports: vec![],
            }),
        };

        let detached = compensation.detached();
        assert!(detached.employee.is_none());
        assert_eq!(detached.id, "c1");
    }
}
