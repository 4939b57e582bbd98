use crate::error::StorageError;
use crate::record::SnippetRecord;
use crate::sharecode::ShareCode;
use async_trait::async_trait;
use jiff::Timestamp;
use std::collections::HashSet;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Read-only view of a snippet repository.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the record stored under a code, expired or not.
    ///
    /// This is a raw get-by-key; liveness classification belongs to the
    /// caller so lookup correctness never depends on backend expiry
    /// behavior or sweep timing.
    async fn get(&self, code: &ShareCode) -> Result<Option<SnippetRecord>>;

    /// Snapshot of the codes live at `now`, used to seed allocation.
    ///
    /// Advisory under concurrent writers; `insert` is the enforcement
    /// point for uniqueness.
    async fn live_codes(&self, now: Timestamp) -> Result<HashSet<ShareCode>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a record under a code.
    ///
    /// Fails with `Conflict` when a record that is still live at
    /// `record.created_at` already holds the code. An expired holder is
    /// evicted and replaced, so a swept-or-not expired entry never blocks
    /// code reuse. The insert must appear atomic to readers: they see
    /// either no record or the fully formed record.
    async fn insert(&self, code: &ShareCode, record: SnippetRecord) -> Result<()>;

    /// Removes every record with `expires_at <= now`, returning the
    /// count. Idempotent: a second run at the same `now` removes nothing.
    async fn sweep(&self, now: Timestamp) -> Result<u64>;
}
