//! Ledger error taxonomy.
//!
//! Four failure classes with uniform semantics across operations: missing
//! credentials, failed cryptographic proof, wrong identity, and storage
//! failure. Authentication and authorization failures deliberately carry no
//! detail about how close the caller was.

use thiserror::Error;

/// Errors surfaced by ledger operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// A required field was missing or empty. Recoverable by the client.
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// The cryptographic proof failed: the signature was malformed or did
    /// not recover to the expected address.
    #[error("invalid signature")]
    Authentication,

    /// The caller is not the configured administrator. Raised before any
    /// cryptographic work.
    #[error("access denied")]
    Authorization,

    /// The persistence layer failed. Fatal for the request, never retried.
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Errors raised by [`MessageStore`](crate::ports::outbound::MessageStore)
/// implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Underlying I/O failed.
    #[error("storage i/o error: {0}")]
    Io(String),

    /// Persisted data could not be decoded.
    #[error("storage data corrupt: {0}")]
    Corrupt(String),
}

impl From<StoreError> for LedgerError {
    fn from(e: StoreError) -> Self {
        LedgerError::Storage(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}
