//! Storage backends for the snipshare registry.
//!
//! Two deployment shapes share the `Repository` contract: an embedded
//! in-memory store for single-process use, and a MySQL store for a
//! networked service with concurrent publishers.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
