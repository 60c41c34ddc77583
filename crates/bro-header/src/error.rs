//! Error types for Bro header reading and parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or parsing a Bro log header.
#[derive(Debug, Error)]
pub enum HeaderError {
    // === File System Errors ===
    /// Log file not found.
    #[error("log file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the log file.
    #[error("failed to read log file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Directive Errors ===
    /// A required `#` directive is absent from the header.
    #[error("missing header directive: expected {directive}")]
    MissingDirective { directive: &'static str },

    /// A required directive appears more than once.
    #[error("duplicate header directive: {directive}")]
    DuplicateDirective { directive: &'static str },

    /// A directive has no value after its marker.
    #[error("header directive {directive} has no value")]
    MissingValue { directive: &'static str },

    /// The `#separator` token could not be decoded.
    #[error("invalid separator '{token}': {reason}")]
    InvalidSeparator { token: String, reason: String },

    // === Column Errors ===
    /// `#fields` declares nothing beyond the timestamp column.
    #[error("header declares no fields after the timestamp column")]
    NoFields,

    /// `#fields` and `#types` disagree on the number of columns.
    #[error("column count mismatch: {fields} field names but {types} types")]
    ColumnCountMismatch { fields: usize, types: usize },

    /// A field name is empty.
    #[error("empty field name in column {column}")]
    EmptyFieldName { column: usize },
}

/// Result type alias for header operations.
pub type Result<T> = std::result::Result<T, HeaderError>;

impl HeaderError {
    /// Create an InvalidSeparator error.
    pub fn invalid_separator(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSeparator {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingDirective error.
    pub fn missing_directive(directive: &'static str) -> Self {
        Self::MissingDirective { directive }
    }

    /// Create a MissingValue error.
    pub fn missing_value(directive: &'static str) -> Self {
        Self::MissingValue { directive }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HeaderError::missing_directive("#fields");
        assert_eq!(
            format!("{err}"),
            "missing header directive: expected #fields"
        );

        let err = HeaderError::invalid_separator("09", "missing \\x prefix");
        assert_eq!(format!("{err}"), "invalid separator '09': missing \\x prefix");

        let err = HeaderError::ColumnCountMismatch {
            fields: 3,
            types: 2,
        };
        assert_eq!(
            format!("{err}"),
            "column count mismatch: 3 field names but 2 types"
        );
    }

    #[test]
    fn test_file_read_keeps_source() {
        let err = HeaderError::FileRead {
            path: PathBuf::from("conn.log"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(format!("{err}").contains("conn.log"));
    }
}
