//! File-backed message store.
//!
//! Persists the whole collection as one JSON document. Each accepted append
//! rewrites the file atomically (temp file, fsync, rename) under a critical
//! section, so a crash mid-write never leaves a partially written record
//! visible.

use super::next_record;
use crate::domain::entities::SignedMessage;
use crate::domain::errors::StoreError;
use crate::ports::outbound::MessageStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use signet_crypto::Address;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Message store persisted to a single JSON file on disk.
///
/// Suitable for light production use without a relational backend. The
/// in-memory copy is the source of truth between rewrites; it is only
/// updated after the rewrite has been durably renamed into place.
pub struct FileMessageStore {
    records: Mutex<Vec<SignedMessage>>,
    path: PathBuf,
}

impl FileMessageStore {
    /// Open a store at the given path, loading any existing records.
    ///
    /// A missing file is an empty store; an unreadable or undecodable file
    /// is a hard error rather than silent data loss.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let records = match std::fs::read(&path) {
            Ok(bytes) => {
                let records: Vec<SignedMessage> = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display())))?;
                tracing::info!(
                    path = %path.display(),
                    count = records.len(),
                    "loaded message store"
                );
                records
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no existing message store, starting empty");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            records: Mutex::new(records),
            path,
        })
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    fn persist(&self, records: &[SignedMessage]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|e| StoreError::Io(e.to_string()))?;

        // Write atomically via temp file + rename.
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        std::fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

#[async_trait]
impl MessageStore for FileMessageStore {
    async fn append(
        &self,
        address: Address,
        text: String,
        signature: String,
    ) -> Result<SignedMessage, StoreError> {
        let mut records = self.records.lock();
        let record = next_record(&records, address, text, signature);
        records.push(record.clone());

        if let Err(e) = self.persist(&records) {
            // The caller is told the write failed; roll back the copy so the
            // in-memory view matches what is on disk.
            records.pop();
            return Err(e);
        }

        Ok(record)
    }

    async fn list_descending(&self) -> Result<Vec<SignedMessage>, StoreError> {
        let mut snapshot = self.records.lock().clone();
        snapshot.reverse();
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");

        {
            let store = FileMessageStore::open(&path).unwrap();
            store.append(addr(1), "first".into(), "0x01".into()).await.unwrap();
            store.append(addr(2), "second".into(), "0x02".into()).await.unwrap();
        }

        let reopened = FileMessageStore::open(&path).unwrap();
        let listed = reopened.list_descending().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].text, "second");
        assert_eq!(listed[1].text, "first");

        // Ids continue from the persisted tail.
        let third = reopened
            .append(addr(3), "third".into(), "0x03".into())
            .await
            .unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileMessageStore::open(dir.path().join("fresh.json")).unwrap();
        assert!(store.is_empty());
        assert!(store.list_descending().await.unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");
        std::fs::write(&path, b"not json {{{{").unwrap();

        assert!(matches!(
            FileMessageStore::open(&path),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");

        let store = FileMessageStore::open(&path).unwrap();
        store.append(addr(1), "m".into(), "0x01".into()).await.unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
