//! Injectable clocks.
//!
//! The driver never reads time directly: it asks a [`Clock`] for `now()` and
//! awaits `sleep_until()`.  [`SystemClock`] maps a monotonic tokio timer onto
//! a wall-clock origin captured at construction, so timestamps are
//! calendar-meaningful but never run backwards.  [`VirtualClock`] only moves
//! when told to (or when a sleep asks it to), which makes playback
//! deterministic in tests.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::time::duration_micros;
use crate::Timestamp;

/// Source of "now" plus a way to wait for a future instant.
///
/// `sleep_until` must return promptly when `deadline <= now()`.  It is not
/// responsible for cancellation; callers race it against their own signal.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    fn sleep_until(&self, deadline: Timestamp) -> impl Future<Output = ()> + Send;
}

impl<C: Clock> Clock for Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn sleep_until(&self, deadline: Timestamp) -> impl Future<Output = ()> + Send {
        (**self).sleep_until(deadline)
    }
}

// ── SystemClock ───────────────────────────────────────────────────────────────

/// Real time: monotonic elapsed time added to the wall clock at creation.
///
/// Inside a runtime with paused time (`tokio::time::pause`) this clock
/// follows the paused timer, which is how the driver's cancellation tests run
/// without real waiting.
#[derive(Clone, Debug)]
pub struct SystemClock {
    wall_origin: Timestamp,
    mono_origin: tokio::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            wall_origin: Timestamp::from_datetime(chrono::Utc::now()),
            mono_origin: tokio::time::Instant::now(),
        }
    }

    /// The wall-clock instant this clock was created at.
    pub fn origin(&self) -> Timestamp {
        self.wall_origin
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        self.wall_origin + self.mono_origin.elapsed()
    }

    fn sleep_until(&self, deadline: Timestamp) -> impl Future<Output = ()> + Send {
        let target = self.mono_origin + deadline.saturating_since(self.wall_origin);
        tokio::time::sleep_until(target)
    }
}

// ── VirtualClock ──────────────────────────────────────────────────────────────

/// Manually driven time for deterministic tests.
///
/// `sleep_until` jumps the clock forward to the deadline (never backwards) and
/// yields once to the scheduler so other tasks (notably a canceller) get a
/// chance to run between events.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: AtomicU64,
}

impl VirtualClock {
    pub fn new(start: Timestamp) -> Self {
        Self { now: AtomicU64::new(start.0) }
    }

    /// Move time forward by `by`.
    pub fn advance(&self, by: std::time::Duration) {
        self.now.fetch_add(duration_micros(by), Ordering::SeqCst);
    }

    /// Set the current instant.  Ignored if `to` is earlier than now.
    pub fn advance_to(&self, to: Timestamp) {
        self.now.fetch_max(to.0, Ordering::SeqCst);
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.now.load(Ordering::SeqCst))
    }

    fn sleep_until(&self, deadline: Timestamp) -> impl Future<Output = ()> + Send {
        async move {
            self.advance_to(deadline);
            tokio::task::yield_now().await;
        }
    }
}
