//! Cooperative cancellation for long solves.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// A shared, cloneable deadline.
///
/// The solver polls [`Deadline::is_expired`] at the top of every propagation
/// round and on every branching decision. A deadline expires either when its
/// instant passes or when any clone calls [`Deadline::expire_now`]; once
/// expired it stays expired.
#[derive(Clone, Debug, Default)]
pub struct Deadline {
    expired: Arc<AtomicBool>,
    at: Option<Instant>,
}

impl Deadline {
    /// A deadline that only expires through [`Deadline::expire_now`].
    pub fn never() -> Self {
        Self::default()
    }

    /// A deadline `duration` from now.
    pub fn after(duration: Duration) -> Self {
        Self {
            expired: Arc::default(),
            at: Instant::now().checked_add(duration),
        }
    }

    /// Like [`Deadline::after`], except that a zero duration means no limit.
    pub fn from_timeout(duration: Duration) -> Self {
        if duration.is_zero() {
            Self::never()
        } else {
            Self::after(duration)
        }
    }

    /// Expire the deadline for every clone of this handle.
    pub fn expire_now(&self) {
        self.expired.store(true, Ordering::Relaxed);
    }

    /// Whether the deadline has passed.
    pub fn is_expired(&self) -> bool {
        if self.expired.load(Ordering::Relaxed) {
            return true;
        }
        match self.at {
            Some(at) if Instant::now() >= at => {
                self.expired.store(true, Ordering::Relaxed);
                true
            }
            _ => false,
        }
    }

    /// Time left before expiry, `None` when there is no time limit.
    pub fn remaining(&self) -> Option<Duration> {
        if self.expired.load(Ordering::Relaxed) {
            return Some(Duration::ZERO);
        }
        self.at.map(|at| at.saturating_duration_since(Instant::now()))
    }
}
