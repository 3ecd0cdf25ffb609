//! Ledger entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signet_crypto::Address;

/// One accepted submission. Immutable once written; the ledger has no update
/// or delete operation.
///
/// A record is persisted only if recovering the signer from
/// (`text`, `signature`) yields exactly `address`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMessage {
    /// Storage-assigned insertion index. Internal field: surfaced by the
    /// export dump, omitted from the list view.
    pub id: u64,
    /// Claimed (and verified) signer identity, canonicalized to lowercase.
    pub address: Address,
    /// User-supplied content, stored verbatim.
    pub text: String,
    /// Hex-encoded signature the signer produced over `text`.
    pub signature: String,
    /// Server-assigned acceptance time, monotonically non-decreasing in
    /// insertion order.
    pub created_at: DateTime<Utc>,
}
