use rand::Rng;
use snipshare_core::{ShareCode, ShareError};
use std::collections::HashSet;

/// Lowest code the allocator will issue.
pub const CODE_MIN: u16 = 1000;
/// Highest code the allocator will issue.
pub const CODE_MAX: u16 = 9999;
/// Size of the allocatable keyspace. Leading-zero codes are excluded by
/// construction, collapsing 10000 four-digit strings to 9000.
pub const KEYSPACE: usize = (CODE_MAX - CODE_MIN + 1) as usize;

/// Proposes share codes satisfying the uniqueness invariant.
///
/// Implementations are pure proposers that never touch storage:
/// allocation and reservation are separate steps, and the caller's
/// check-then-insert is what actually reserves a code.
pub trait CodeAllocator: Send + Sync + 'static {
    /// Returns a code absent from `live`.
    ///
    /// Fails with `CapacityExhausted` when `live` saturates the
    /// keyspace, rather than looping forever.
    fn allocate(&self, live: &HashSet<ShareCode>) -> Result<ShareCode, ShareError>;
}

/// Uniform random allocator over `[1000, 9999]`.
///
/// Re-draws on collision. With a keyspace of 9000 and a live set
/// bounded by 24-hour turnover, the expected retry count is O(1).
#[derive(Debug, Clone, Default)]
pub struct RandomAllocator;

impl RandomAllocator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeAllocator for RandomAllocator {
    fn allocate(&self, live: &HashSet<ShareCode>) -> Result<ShareCode, ShareError> {
        // At 9000 live entries every draw would collide.
        if live.len() >= KEYSPACE {
            return Err(ShareError::CapacityExhausted);
        }

        let mut rng = rand::rng();
        loop {
            let candidate =
                ShareCode::new_unchecked(rng.random_range(CODE_MIN..=CODE_MAX).to_string());
            if !live.contains(&candidate) {
                return Ok(candidate);
            }
        }
    }
}
