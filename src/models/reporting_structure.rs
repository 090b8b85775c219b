//! Reporting structure, derived from the direct-report graph.

use serde::{Deserialize, Serialize};

use super::Employee;

/// An employee together with the size of their reporting subtree.
///
/// Never persisted; computed per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingStructure {
    /// The employee at the root of the subtree.
    pub employee: Employee,
    /// Count of every distinct employee reachable through direct reports,
    /// excluding the root itself.
    pub number_of_reports: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_number_of_reports_camel_case() {
        let structure = ReportingStructure {
            employee: Employee {
                id: "e1".to_string(),
                first_name: "Ringo".to_string(),
                last_name: "Starr".to_string(),
                department: "Engineering".to_string(),
                position: "Developer V".to_string(),
                direct_reports: vec!["e2".to_string(), "e3".to_string()],
            },
            number_of_reports: 2,
        };

        let json = serde_json::to_value(&structure).unwrap();
        assert_eq!(json["numberOfReports"], 2);
        assert_eq!(json["employee"]["lastName"], "Starr");
    }
}
