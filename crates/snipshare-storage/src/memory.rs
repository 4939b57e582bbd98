use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use snipshare_core::error::StorageError;
use snipshare_core::repository::{ReadRepository, Repository, Result};
use snipshare_core::{ShareCode, SnippetRecord};
use std::collections::HashSet;

/// In-memory implementation of the repository contract using DashMap.
///
/// DashMap's sharded locks let concurrent lookups proceed without
/// blocking each other, while the entry API gives `insert` the
/// check-and-set atomicity the uniqueness invariant needs: no other
/// publisher can claim the same code between the liveness check and the
/// write.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<ShareCode, SnippetRecord>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored records, expired or not.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShareCode) -> Result<Option<SnippetRecord>> {
        Ok(self.storage.get(code).map(|entry| entry.value().clone()))
    }

    async fn live_codes(&self, now: Timestamp) -> Result<HashSet<ShareCode>> {
        Ok(self
            .storage
            .iter()
            .filter(|entry| entry.value().is_live(now))
            .map(|entry| entry.key().clone())
            .collect())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &ShareCode, record: SnippetRecord) -> Result<()> {
        // The entry guard holds the shard lock across check and write.
        match self.storage.entry(code.clone()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_live(record.created_at) {
                    return Err(StorageError::Conflict(code.to_string()));
                }
                // Expired holder: evict and reuse the code.
                occupied.insert(record);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(record);
            }
        }
        Ok(())
    }

    async fn sweep(&self, now: Timestamp) -> Result<u64> {
        let mut removed = 0u64;
        self.storage.retain(|_, record| {
            if record.is_expired(now) {
                removed += 1;
                false
            } else {
                true
            }
        });
        Ok(removed)
    }
}
