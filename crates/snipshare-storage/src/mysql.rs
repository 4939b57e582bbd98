use async_trait::async_trait;
use jiff::Timestamp;
use snipshare_core::error::StorageError;
use snipshare_core::repository::{ReadRepository, Repository, Result};
use snipshare_core::{Language, ShareCode, SnippetRecord};
use sqlx::{MySqlPool, Row};
use std::collections::HashSet;

/// MySQL implementation of the repository contract.
///
/// Expected schema:
///
/// ```sql
/// CREATE TABLE snippets (
///     share_code CHAR(4)      NOT NULL,
///     title      TEXT         NOT NULL,
///     body       MEDIUMTEXT   NOT NULL,
///     language   VARCHAR(16)  NOT NULL,
///     created_at BIGINT       NOT NULL,
///     expires_at BIGINT       NOT NULL,
///     UNIQUE KEY uq_snippets_share_code (share_code)
/// );
/// ```
///
/// The UNIQUE key on `share_code` is the second uniqueness enforcement
/// layer for the networked deployment shape: the allocator's collision
/// check runs against a snapshot that is stale under concurrent
/// publishers, so the constraint is what actually guarantees that two
/// racing publishes cannot both claim a code. A unique violation against
/// an *expired* row is resolved by evicting that row and retrying the
/// insert once, mirroring the in-memory store's replace-over-expired.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    async fn try_insert(&self, code: &ShareCode, record: &SnippetRecord) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO snippets (share_code, title, body, language, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(code.as_str())
        .bind(&record.title)
        .bind(&record.body)
        .bind(record.language.as_str())
        .bind(record.created_at.as_second())
        .bind(record.expires_at.as_second())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Deletes the row holding `code` if it is expired as of `now`.
    /// Returns whether a row was evicted.
    async fn evict_expired(&self, code: &ShareCode, now: Timestamp) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM snippets
            WHERE share_code = ?
              AND expires_at <= ?
            "#,
        )
        .bind(code.as_str())
        .bind(now.as_second())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn parse_timestamp(field: &str, seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|e| {
        StorageError::InvalidData(format!("invalid {field} timestamp '{seconds}': {e}"))
    })
}

fn parse_language(raw: &str) -> Result<Language> {
    raw.parse()
        .map_err(|e| StorageError::InvalidData(format!("invalid language tag: {e}")))
}

fn parse_share_code(raw: String) -> Result<ShareCode> {
    ShareCode::new(raw).map_err(|e| StorageError::InvalidData(format!("invalid share code: {e}")))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn get(&self, code: &ShareCode) -> Result<Option<SnippetRecord>> {
        let row = sqlx::query(
            r#"
            SELECT title, body, language, created_at, expires_at
            FROM snippets
            WHERE share_code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let title: String = row.try_get("title").map_err(map_sqlx_error)?;
        let body: String = row.try_get("body").map_err(map_sqlx_error)?;
        let language_raw: String = row.try_get("language").map_err(map_sqlx_error)?;
        let created_at_raw: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
        let expires_at_raw: i64 = row.try_get("expires_at").map_err(map_sqlx_error)?;

        Ok(Some(SnippetRecord {
            title,
            body,
            language: parse_language(&language_raw)?,
            created_at: parse_timestamp("created_at", created_at_raw)?,
            expires_at: parse_timestamp("expires_at", expires_at_raw)?,
        }))
    }

    async fn live_codes(&self, now: Timestamp) -> Result<HashSet<ShareCode>> {
        let rows = sqlx::query(
            r#"
            SELECT share_code
            FROM snippets
            WHERE expires_at > ?
            "#,
        )
        .bind(now.as_second())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter()
            .map(|row| {
                let raw: String = row.try_get("share_code").map_err(map_sqlx_error)?;
                parse_share_code(raw)
            })
            .collect()
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, code: &ShareCode, record: SnippetRecord) -> Result<()> {
        match self.try_insert(code, &record).await {
            Ok(()) => return Ok(()),
            Err(err) if is_unique_violation(&err) => {}
            Err(err) => return Err(map_sqlx_error(err)),
        }

        // The code is held; only an expired holder may be displaced.
        if !self.evict_expired(code, record.created_at).await? {
            return Err(StorageError::Conflict(code.to_string()));
        }

        match self.try_insert(code, &record).await {
            Ok(()) => Ok(()),
            // A concurrent publisher re-claimed the code between the
            // eviction and the retry.
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(code.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn sweep(&self, now: Timestamp) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM snippets
            WHERE expires_at <= ?
            "#,
        )
        .bind(now.as_second())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
