//! Time source for creation indexes and pin stamps.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Supplies the current time in milliseconds since the UNIX epoch.
pub trait Clock: Send {
    fn now_millis(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

/// A clock that only moves when told to. Clones share the same time, so a
/// test can keep a handle while the library owns another.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start)),
        }
    }

    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Advances by one millisecond on every read. Keeps creation order strict
/// when actions arrive faster than the wall clock ticks.
#[derive(Debug, Default, Clone)]
pub struct TickingClock {
    inner: ManualClock,
}

impl TickingClock {
    pub fn new(start: i64) -> Self {
        Self {
            inner: ManualClock::new(start),
        }
    }
}

impl Clock for TickingClock {
    fn now_millis(&self) -> i64 {
        self.inner.now.fetch_add(1, Ordering::SeqCst)
    }
}
