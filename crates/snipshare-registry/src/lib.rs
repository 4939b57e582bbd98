//! The share-code registry service.
//!
//! This crate provides the `ShareStore` implementation: code allocation,
//! publish/lookup with liveness checks, and the periodic sweep task.
//! Core types are re-exported from `snipshare_core`.

pub mod allocator;
pub mod registry;
pub mod sweeper;

pub use allocator::{CodeAllocator, RandomAllocator, KEYSPACE};
pub use registry::{ShareRegistry, DEFAULT_TTL};
pub use sweeper::{spawn_sweeper, DEFAULT_SWEEP_INTERVAL};
