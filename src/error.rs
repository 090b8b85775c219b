//! Error types for the employee directory.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the services and stores can report.

use thiserror::Error;

/// Failures raised by a record store.
///
/// Stores never retry; every failure is handed back to the caller, which
/// aborts whatever protocol step it was in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An insert collided with an existing row on a unique key.
    #[error("Unique constraint violated on {table} for key '{key}'")]
    UniqueViolation {
        /// The table that rejected the insert.
        table: &'static str,
        /// The conflicting key value.
        key: String,
    },

    /// A removal targeted a row that does not exist (or no longer exists).
    #[error("Record '{id}' does not exist in {table}")]
    MissingRecord {
        /// The table the removal was issued against.
        table: &'static str,
        /// The id of the missing row.
        id: String,
    },

    /// A table lock was poisoned by a panicking writer.
    #[error("Table {table} is unavailable: lock poisoned")]
    Poisoned {
        /// The table whose lock was poisoned.
        table: &'static str,
    },

    /// Any other backend failure.
    #[error("Store backend failure: {message}")]
    Backend {
        /// A description of the failure.
        message: String,
    },
}

/// The main error type for the employee directory.
///
/// # Example
///
/// ```
/// use employee_directory::error::DirectoryError;
///
/// let error = DirectoryError::EmployeeNotFound {
///     id: "missing".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: missing");
/// ```
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Caller input was malformed or missing a required value.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The offending field, using its wire name.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The referenced employee id does not resolve.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The id that was not found.
        id: String,
    },

    /// An underlying store call failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A seed data file could not be read or parsed.
    #[error("Failed to load seed data '{path}': {message}")]
    SeedDataError {
        /// The path to the seed file.
        path: String,
        /// A description of the failure.
        message: String,
    },
}

impl DirectoryError {
    /// Shorthand for a [`DirectoryError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return DirectoryError.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// A type alias for Results that return StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_displays_field_and_message() {
        let error = DirectoryError::validation("employeeId", "must not be empty");
        assert_eq!(
            error.to_string(),
            "Invalid field 'employeeId': must not be empty"
        );
    }

    #[test]
    fn test_employee_not_found_displays_id() {
        let error = DirectoryError::EmployeeNotFound {
            id: "Invalid_Id".to_string(),
        };
        assert_eq!(error.to_string(), "Employee not found: Invalid_Id");
    }

    #[test]
    fn test_store_error_is_transparent() {
        let error: DirectoryError = StoreError::UniqueViolation {
            table: "compensation",
            key: "emp_1".to_string(),
        }
        .into();
        assert_eq!(
            error.to_string(),
            "Unique constraint violated on compensation for key 'emp_1'"
        );
    }

    #[test]
    fn test_missing_record_displays_table_and_id() {
        let error = StoreError::MissingRecord {
            table: "employees",
            id: "abc".to_string(),
        };
        assert_eq!(error.to_string(), "Record 'abc' does not exist in employees");
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = DirectoryError::ConfigNotFound {
            path: "/missing/service.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/service.yaml"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<DirectoryError>();
        assert_error::<StoreError>();
    }

    #[test]
    fn test_store_error_propagates_with_question_mark() {
        fn fails() -> StoreResult<()> {
            Err(StoreError::Poisoned { table: "employees" })
        }

        fn propagates() -> DirectoryResult<()> {
            fails()?;
            Ok(())
        }

        assert!(matches!(
            propagates(),
            Err(DirectoryError::Store(StoreError::Poisoned { .. }))
        ));
    }
}
