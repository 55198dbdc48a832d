//! The employee record and its wire representation.
//!
//! Field names follow the upstream collection API (PascalCase, `PersonID`,
//! `SSN`). The `Status` field has been observed on the wire as a number, a
//! boolean, and a string; [`Status::is_active`] collapses every accepted
//! encoding to a binary active/inactive.

use crate::identity::Timestamp;
use serde::{Deserialize, Serialize};

/// Wire status of an employee record.
///
/// Binary in effect: anything that is not an accepted "active" encoding is
/// inactive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Status {
    Number(i64),
    Flag(bool),
    Text(String),
}

impl Status {
    /// Canonical outbound encoding for an active/inactive flag.
    pub fn from_active(active: bool) -> Self {
        Status::Number(if active { 1 } else { 0 })
    }

    /// Normalize to a boolean. Accepted active encodings: numeric `1`,
    /// boolean `true`, and the case-insensitive trimmed strings
    /// `"active"`, `"1"`, `"true"`. Everything else is inactive.
    pub fn is_active(&self) -> bool {
        match self {
            Status::Number(n) => *n == 1,
            Status::Flag(b) => *b,
            Status::Text(s) => {
                let s = s.trim().to_ascii_lowercase();
                s == "active" || s == "1" || s == "true"
            }
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Number(0)
    }
}

/// An employee record as exchanged with the remote collection resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "PersonID", default)]
    pub person_id: String,
    #[serde(rename = "FirstName", default)]
    pub first_name: String,
    #[serde(rename = "LastName", default)]
    pub last_name: String,
    #[serde(rename = "LastUpdatedBy", default)]
    pub last_updated_by: String,
    #[serde(rename = "LastUpdatedDate")]
    pub last_updated_date: Timestamp,
    #[serde(rename = "SSN", default)]
    pub ssn: String,
    #[serde(rename = "EmployeeNo", default)]
    pub employee_no: String,
    #[serde(rename = "EmploymentEndDate")]
    pub employment_end_date: Option<Timestamp>,
    #[serde(rename = "EmploymentStartDate")]
    pub employment_start_date: Timestamp,
    #[serde(rename = "Status", default)]
    pub status: Status,
}

impl Employee {
    /// First and last name joined with a single space, trimmed. Empty when
    /// both parts are blank.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_employee() -> Employee {
        Employee {
            person_id: "123e4567-e89b-42d3-a456-426614174000".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            last_updated_by: "admin".to_string(),
            last_updated_date: Utc::now(),
            ssn: "123456789".to_string(),
            employee_no: "EMP-123454321".to_string(),
            employment_end_date: None,
            employment_start_date: Utc::now(),
            status: Status::Number(1),
        }
    }

    // ========================================================================
    // Status normalization
    // ========================================================================

    #[test]
    fn active_encodings_normalize_to_active() {
        assert!(Status::Number(1).is_active());
        assert!(Status::Flag(true).is_active());
        assert!(Status::Text("active".to_string()).is_active());
        assert!(Status::Text("ACTIVE".to_string()).is_active());
        assert!(Status::Text(" Active ".to_string()).is_active());
        assert!(Status::Text("1".to_string()).is_active());
        assert!(Status::Text("true".to_string()).is_active());
    }

    #[test]
    fn everything_else_normalizes_to_inactive() {
        assert!(!Status::Number(0).is_active());
        assert!(!Status::Number(2).is_active());
        assert!(!Status::Flag(false).is_active());
        assert!(!Status::Text("inactive".to_string()).is_active());
        assert!(!Status::Text("".to_string()).is_active());
        assert!(!Status::default().is_active());
    }

    #[test]
    fn from_active_maps_to_numeric_encoding() {
        assert_eq!(Status::from_active(true), Status::Number(1));
        assert_eq!(Status::from_active(false), Status::Number(0));
    }

    // ========================================================================
    // Wire format
    // ========================================================================

    #[test]
    fn deserializes_heterogeneous_status_encodings() {
        for (raw, expected) in [
            ("1", true),
            ("true", true),
            ("\"active\"", true),
            ("\"TRUE\"", true),
            ("0", false),
            ("false", false),
            ("\"inactive\"", false),
            ("\"\"", false),
        ] {
            let json = format!(
                r#"{{"PersonID":"p1","FirstName":"A","LastName":"B",
                     "LastUpdatedBy":"admin","LastUpdatedDate":"2024-01-01T00:00:00Z",
                     "SSN":"123","EmployeeNo":"EMP-1","EmploymentEndDate":null,
                     "EmploymentStartDate":"2024-01-01T00:00:00Z","Status":{raw}}}"#
            );
            let employee: Employee = serde_json::from_str(&json).unwrap();
            assert_eq!(employee.status.is_active(), expected, "raw status {raw}");
        }
    }

    #[test]
    fn missing_status_defaults_to_inactive() {
        let json = r#"{"PersonID":"p1","FirstName":"A","LastName":"B",
                       "LastUpdatedBy":"admin","LastUpdatedDate":"2024-01-01T00:00:00Z",
                       "SSN":"123","EmployeeNo":"EMP-1","EmploymentEndDate":null,
                       "EmploymentStartDate":"2024-01-01T00:00:00Z"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(!employee.status.is_active());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let employee = sample_employee();
        let value = serde_json::to_value(&employee).unwrap();
        assert!(value.get("PersonID").is_some());
        assert!(value.get("FirstName").is_some());
        assert!(value.get("SSN").is_some());
        assert!(value.get("EmployeeNo").is_some());
        assert_eq!(value["Status"], serde_json::json!(1));
        assert_eq!(value["EmploymentEndDate"], serde_json::Value::Null);
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    #[test]
    fn full_name_trims_and_joins() {
        let mut employee = sample_employee();
        assert_eq!(employee.full_name(), "Ada Lovelace");

        employee.first_name = "  Ada ".to_string();
        employee.last_name = String::new();
        assert_eq!(employee.full_name(), "Ada");

        employee.first_name = String::new();
        assert_eq!(employee.full_name(), "");
    }
}
