use jiff::{SignedDuration, Timestamp};
use std::sync::{Arc, Mutex};

/// A source of the current time.
///
/// The registry evaluates liveness against a clock rather than calling
/// `Timestamp::now()` inline so expiry behavior is testable.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current time of the clock.
    fn now(&self) -> Timestamp;
}

/// The wall clock.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
///
/// Backs deterministic expiry tests: publish at `T0`, advance past the
/// TTL, observe the record disappear.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Sets the clock to an absolute instant.
    pub fn set(&self, now: Timestamp) {
        *self
            .now
            .lock()
            .expect("manual clock lock should not be poisoned") = now;
    }

    /// Moves the clock forward (or backward) by a duration.
    pub fn advance(&self, delta: SignedDuration) {
        let mut now = self
            .now
            .lock()
            .expect("manual clock lock should not be poisoned");
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self
            .now
            .lock()
            .expect("manual clock lock should not be poisoned")
    }
}
