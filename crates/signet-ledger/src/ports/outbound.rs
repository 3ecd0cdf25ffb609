//! # Outbound Ports (Driven Ports / Storage)
//!
//! The single storage abstraction behind the ledger. Concrete backends
//! (in-memory, file, relational) implement this trait and are selected by
//! configuration.

use crate::domain::entities::SignedMessage;
use crate::domain::errors::StoreError;
use async_trait::async_trait;
use signet_crypto::Address;

/// Append-only, insertion-ordered message store.
///
/// Implementations must be thread-safe (`Send + Sync`) and must guarantee:
///
/// - `append` is atomic: the record is fully durable before `Ok` is
///   returned, and concurrent appends never interleave partial writes
/// - assigned `created_at` values are monotonically non-decreasing in
///   insertion order
/// - `list_descending` observes a consistent snapshot, newest first
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist one accepted submission and return the stored record with its
    /// assigned id and timestamp.
    async fn append(
        &self,
        address: Address,
        text: String,
        signature: String,
    ) -> Result<SignedMessage, StoreError>;

    /// All records, ordered by creation time descending (most recent first).
    async fn list_descending(&self) -> Result<Vec<SignedMessage>, StoreError>;
}
