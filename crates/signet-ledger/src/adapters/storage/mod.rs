//! Storage backends implementing the [`MessageStore`] port.
//!
//! [`MessageStore`]: crate::ports::outbound::MessageStore

mod file;
mod memory;

pub use file::FileMessageStore;
pub use memory::InMemoryMessageStore;

use crate::domain::entities::SignedMessage;
use chrono::Utc;
use signet_crypto::Address;

/// Build the next record for an insertion-ordered collection.
///
/// Ids are sequential; the timestamp is clamped to the previous record's so
/// `created_at` stays non-decreasing even if the wall clock steps backwards.
pub(crate) fn next_record(
    existing: &[SignedMessage],
    address: Address,
    text: String,
    signature: String,
) -> SignedMessage {
    let last = existing.last();
    let mut created_at = Utc::now();
    if let Some(prev) = last {
        if created_at < prev.created_at {
            created_at = prev.created_at;
        }
    }

    SignedMessage {
        id: last.map(|r| r.id + 1).unwrap_or(1),
        address,
        text,
        signature,
        created_at,
    }
}
