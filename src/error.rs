//! Error types for the dataset core.
//!
//! Errors are classified by origin:
//! - NotFound: a lookup against a key that is not in the table
//! - Validation: reference data that violates an invariant, caught at load
//! - Io / Parse: loader-layer file and JSON failures
//!
//! All errors are returned as values; none are used for control flow. Every
//! aggregate operation is total over well-formed data and cannot fail.

use thiserror::Error;

/// Error type for table loading and queries.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    /// Lookup against a key absent from the named collection. Callers are
    /// expected to degrade (skip the drill-down panel), not crash.
    #[error("{collection}: no record under key '{key}'")]
    NotFound { collection: &'static str, key: String },

    /// Reference data rejected before any query can run: enum value outside
    /// the closed set, out-of-range percentage, duplicate id, or a dangling
    /// cross-reference.
    #[error("invalid reference data: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("failed to parse reference data: {0}")]
    Parse(String),
}

impl DataError {
    /// True for the missing-key outcome, the only recoverable query error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound { .. })
    }

    pub(crate) fn not_found(collection: &'static str, key: impl ToString) -> Self {
        DataError::NotFound {
            collection,
            key: key.to_string(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        DataError::Validation(message.into())
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_collection_and_key() {
        let err = DataError::not_found("regions", "ZZ");
        assert_eq!(err.to_string(), "regions: no record under key 'ZZ'");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_is_not_not_found() {
        let err = DataError::validation("score 140 out of range");
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("score 140"));
    }
}
