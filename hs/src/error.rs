//! Store error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving or querying collections
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Narrator not found: {narrator}")]
    NarratorNotFound { narrator: String },

    #[error("Hadith number {number} not found for narrator {narrator}")]
    RecordNotFound { narrator: String, number: i64 },

    #[error("Malformed collection for narrator {narrator}: {source}")]
    MalformedCollection {
        narrator: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Check if this error means the requested thing does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NarratorNotFound { .. } | StoreError::RecordNotFound { .. })
    }
}

/// Result alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        assert!(
            StoreError::NarratorNotFound {
                narrator: "bukhari".to_string()
            }
            .is_not_found()
        );
        assert!(
            StoreError::RecordNotFound {
                narrator: "bukhari".to_string(),
                number: 7
            }
            .is_not_found()
        );

        let err = StoreError::StorageUnavailable {
            path: PathBuf::from("/nonexistent"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_record_not_found_message() {
        let err = StoreError::RecordNotFound {
            narrator: "muslim".to_string(),
            number: 999,
        };

        let msg = err.to_string();
        assert!(msg.contains("999"));
        assert!(msg.contains("muslim"));
    }

    #[test]
    fn test_malformed_collection_message() {
        let source = serde_json::from_str::<Vec<u32>>("{not json").unwrap_err();
        let err = StoreError::MalformedCollection {
            narrator: "abu-daud".to_string(),
            source,
        };

        assert!(err.to_string().contains("abu-daud"));
    }
}
