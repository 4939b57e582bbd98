use crate::error::ShareError;
use crate::record::{PublishParams, SnippetRecord};
use crate::sharecode::ShareCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShareError>;

/// The share-code registry as seen by its hosting surface.
#[async_trait]
pub trait ShareStore: Send + Sync + 'static {
    /// Publishes a snippet and returns its freshly allocated share code.
    async fn publish(&self, params: PublishParams) -> Result<ShareCode>;

    /// Looks up a live record.
    ///
    /// Absent and expired records are both `None`; the caller cannot
    /// distinguish "never existed" from "expired".
    async fn lookup(&self, code: &ShareCode) -> Result<Option<SnippetRecord>>;

    /// Removes expired records, returning how many were swept.
    async fn sweep(&self) -> Result<u64>;
}
