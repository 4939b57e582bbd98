//! Core types and traits for the snipshare share-code registry.
//!
//! This crate provides the shared vocabulary used by the storage
//! backends, the registry service, and the HTTP gateway.

pub mod clock;
pub mod error;
pub mod record;
pub mod repository;
pub mod sharecode;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, ShareError, StorageError};
pub use record::{Language, PublishParams, SnippetRecord};
pub use repository::{ReadRepository, Repository};
pub use sharecode::ShareCode;
pub use store::ShareStore;
