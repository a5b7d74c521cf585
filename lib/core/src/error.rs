use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Callers match on these,
// never on the human-readable message string.

/// Stable error code constants.
///
/// Codes never change; messages may be reworded.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VERSION_CONFLICT: &str = "VERSION_CONFLICT";
    pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
}

// ── StoreError ──────────────────────────────────────────────────────

/// Unified error type used by the entity store and all domain services.
///
/// Each variant maps to a stable error code (see [`error_code`]). Messages
/// carry the operation and key/predicate that failed.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No row for the given key.
    #[error("{0}")]
    NotFound(String),

    /// Optimistic-lock mismatch: the stored version no longer matches the
    /// version the caller read. Re-read and retry, or abort.
    #[error("{0}")]
    VersionConflict(String),

    /// Uniqueness pre-check failure (e.g. mobile already registered).
    #[error("{0}")]
    AlreadyExists(String),

    /// Malformed query request, such as an aggregate over an empty field
    /// name. Programmer error, not retried.
    #[error("{0}")]
    InvalidArgument(String),

    /// Underlying storage failure, wrapped with operation context.
    #[error("{0}")]
    Storage(String),
}

impl StoreError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => error_code::NOT_FOUND,
            StoreError::VersionConflict(_) => error_code::VERSION_CONFLICT,
            StoreError::AlreadyExists(_) => error_code::ALREADY_EXISTS,
            StoreError::InvalidArgument(_) => error_code::INVALID_ARGUMENT,
            StoreError::Storage(_) => error_code::STORAGE_ERROR,
        }
    }

    /// Whether a retry at the caller's level can succeed. VersionConflict
    /// is retryable after a re-read; the store itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::VersionConflict(_))
    }
}
