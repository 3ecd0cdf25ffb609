//! In-memory message store for tests and ephemeral deployments.

use super::next_record;
use crate::domain::entities::SignedMessage;
use crate::domain::errors::StoreError;
use crate::ports::outbound::MessageStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use signet_crypto::Address;

/// Message store backed by a process-local vector.
///
/// Appends serialize through the write lock; reads see a full snapshot.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    records: RwLock<Vec<SignedMessage>>,
}

impl InMemoryMessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(
        &self,
        address: Address,
        text: String,
        signature: String,
    ) -> Result<SignedMessage, StoreError> {
        let mut records = self.records.write();
        let record = next_record(&records, address, text, signature);
        records.push(record.clone());
        Ok(record)
    }

    async fn list_descending(&self) -> Result<Vec<SignedMessage>, StoreError> {
        // Records are kept in insertion (ascending-time) order.
        let mut snapshot = self.records.read().clone();
        snapshot.reverse();
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    #[tokio::test]
    async fn append_assigns_sequential_ids() {
        let store = InMemoryMessageStore::new();
        let a = store
            .append(addr(1), "first".into(), "0x01".into())
            .await
            .unwrap();
        let b = store
            .append(addr(2), "second".into(), "0x02".into())
            .await
            .unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(b.created_at >= a.created_at);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let store = InMemoryMessageStore::new();
        store.append(addr(1), "m1".into(), "0x01".into()).await.unwrap();
        store.append(addr(2), "m2".into(), "0x02".into()).await.unwrap();

        let listed = store.list_descending().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].text, "m2");
        assert_eq!(listed[1].text, "m1");
    }

    #[tokio::test]
    async fn concurrent_appends_keep_every_record() {
        let store = Arc::new(InMemoryMessageStore::new());

        let mut handles = Vec::new();
        for i in 0..32u8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .append(addr(i), format!("message {i}"), "0x00".into())
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let listed = store.list_descending().await.unwrap();
        assert_eq!(listed.len(), 32);

        // Ids are unique and timestamps never decrease in insertion order.
        let mut ids: Vec<_> = listed.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
        for pair in listed.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }
}
