//! Error types for fleetdb
//!
//! Provides structured error types with context for better debugging
//! and user-friendly error messages.

use crate::schema::RecordKind;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for fleetdb operations
#[derive(Debug, Error)]
pub enum Error {
    // ==========================================================================
    // Record Errors
    // ==========================================================================
    #[error("{kind} '{id}' not found")]
    RecordNotFound { kind: RecordKind, id: String },

    #[error("Unknown record kind '{name}'")]
    UnknownRecordKind { name: String },

    #[error("{kind} records have no report")]
    NoReport { kind: RecordKind },

    // ==========================================================================
    // Form Errors
    // ==========================================================================
    #[error("Missing required field '{field}' for {kind}")]
    MissingRequiredField { kind: RecordKind, field: String },

    #[error("Type mismatch for field '{field}': expected {expected}, got '{actual}'")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: String,
    },

    #[error("Unknown field '{field}' for {kind}")]
    UnknownField { kind: RecordKind, field: String },

    #[error("{kind} must reference a truck or a trailer, not both")]
    ConflictingReferences { kind: RecordKind },

    // ==========================================================================
    // IO Errors
    // ==========================================================================
    #[error("Failed to read file '{path}': {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ==========================================================================
    // Serialization Errors
    // ==========================================================================
    #[error("CSV error: {message}")]
    CsvError { message: String },

    #[error("Failed to parse YAML: {message}")]
    YamlParseError { message: String },

    #[error("Failed to parse JSON: {message}")]
    JsonParseError { message: String },

    #[error("Import payload rejected: {message}")]
    ImportPayload { message: String },

    // ==========================================================================
    // Catch-all
    // ==========================================================================
    #[error("{0}")]
    Other(String),
}

/// Result type alias for fleetdb operations
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Conversions from external error types
// =============================================================================

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::CsvError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::YamlParseError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonParseError {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Error Display Helpers
// =============================================================================

impl Error {
    /// Returns a user-friendly suggestion for fixing the error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::RecordNotFound { .. } => Some("Check the id with: fleetdb list <kind>"),
            Error::UnknownRecordKind { .. } => Some(
                "Use one of: drivers, trucks, trailers, maintenance, otr_repairs, pm_records, shop_jobs",
            ),
            Error::NoReport { .. } => Some("Reports exist for drivers, trucks and trailers"),
            Error::MissingRequiredField { .. } => {
                Some("Add the field with: --field <name>=<value>")
            }
            Error::TypeMismatch { .. } => Some("Numeric fields take plain decimal text, e.g. 125.50"),
            Error::ImportPayload { .. } => {
                Some("Import expects a JSON document produced by: fleetdb export")
            }
            _ => None,
        }
    }

    /// Returns true if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::RecordNotFound { .. }
                | Error::UnknownRecordKind { .. }
                | Error::NoReport { .. }
                | Error::MissingRequiredField { .. }
                | Error::TypeMismatch { .. }
                | Error::UnknownField { .. }
                | Error::ConflictingReferences { .. }
                | Error::ImportPayload { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::RecordNotFound {
            kind: RecordKind::Truck,
            id: "t001".to_string(),
        };
        assert_eq!(err.to_string(), "Truck 't001' not found");
    }

    #[test]
    fn test_error_suggestion() {
        let err = Error::MissingRequiredField {
            kind: RecordKind::Driver,
            field: "first_name".to_string(),
        };
        assert!(err.suggestion().is_some());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_io_errors_are_not_recoverable() {
        let err = Error::FileWriteError {
            path: PathBuf::from("tms_data/trucks.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("trucks.csv"));
    }
}
