//! Error types for the identity locker.
//!
//! Anchoring failures are deliberately absent from this taxonomy: they are
//! reported as error-shaped receipts in the issuance response, never as
//! errors to the caller. Storage failures, by contrast, must abort the
//! operation — an unstored credential must never appear issued.

/// Locker error types covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum LockerError {
    /// The caller's request is missing required fields.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A credential or identity record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The durable store rejected a write or returned inconsistent data.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A persisted record exists but cannot be parsed.
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, LockerError>;
