//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds key context and categorization        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PosError (stockmate-pos) ← Maps to machine-readable codes             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller distinguishes validation failures from persistence failures    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The persistence class (I/O, serialization, schema version) is kept
//! distinct from domain failures: a persistence failure means in-memory and
//! on-disk state may disagree, which callers must surface differently from
//! a plain "insufficient stock".

use thiserror::Error;

use stockmate_core::CoreError;

/// Persistence and repository errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the repository.
    ///
    /// ## When This Occurs
    /// - Updating or deleting a product id that does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Reading or writing a key-value file failed.
    ///
    /// ## When This Occurs
    /// - Data directory missing or unwritable
    /// - Disk full
    #[error("I/O failure for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A payload could not be serialized or deserialized.
    #[error("Serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A persisted payload carries an unexpected schema version.
    ///
    /// ## When This Occurs
    /// - The data directory was written by a newer (or older) release.
    ///   Failing loudly here beats silently misparsing records.
    #[error("Schema version mismatch for key '{key}': found {found}, expected {expected}")]
    SchemaVersion { key: String, found: u32, expected: u32 },

    /// A domain rule failed inside a repository operation
    /// (e.g. insufficient stock discovered during the checkout deduction).
    #[error(transparent)]
    Domain(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates an Io error carrying the key it happened on.
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            key: key.into(),
            source,
        }
    }

    /// True for the persistence-failure class: I/O, serialization, and
    /// schema-version errors. These imply memory and disk may now disagree
    /// and must be surfaced distinctly from validation errors.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(
            self,
            StoreError::Io { .. } | StoreError::Serialization(_) | StoreError::SchemaVersion { .. }
        )
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::not_found("Product", "p-42");
        assert_eq!(err.to_string(), "Product not found: p-42");

        let err = StoreError::SchemaVersion {
            key: "stockmate_products".to_string(),
            found: 9,
            expected: 1,
        };
        assert_eq!(
            err.to_string(),
            "Schema version mismatch for key 'stockmate_products': found 9, expected 1"
        );
    }

    #[test]
    fn test_persistence_failure_classification() {
        let io = StoreError::io(
            "stockmate_products",
            std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        );
        assert!(io.is_persistence_failure());

        let schema = StoreError::SchemaVersion {
            key: "k".into(),
            found: 2,
            expected: 1,
        };
        assert!(schema.is_persistence_failure());

        let domain = StoreError::Domain(CoreError::EmptyCart);
        assert!(!domain.is_persistence_failure());

        let missing = StoreError::not_found("Product", "p-1");
        assert!(!missing.is_persistence_failure());
    }
}
