//! Playback observer trait and run statistics.

use lr_core::{StreamId, Timestamp};
use lr_schedule::{Event, EventKind};

/// Identity of one cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cycle {
    /// The per-stream worker that ran it; `None` in merged mode.
    pub worker: Option<StreamId>,
    /// Zero-based, counted per worker.
    pub index:  u64,
    pub anchor: Timestamp,
    /// Events built for this cycle.
    pub events: usize,
}

/// Callbacks invoked by [`Driver::run`][crate::Driver::run] as playback
/// proceeds.
///
/// All methods default to no-ops.  In `PerStream` mode the hooks are still
/// called on the task that invoked `run`, one at a time, in the order the
/// workers produced them.
///
/// # Example: line counter
///
/// ```rust,ignore
/// struct Counter(u64);
///
/// impl PlaybackObserver for Counter {
///     fn on_event(&mut self, event: &Event, _fired_at: Timestamp) {
///         if !event.is_clear() { self.0 += 1; }
///     }
/// }
/// ```
pub trait PlaybackObserver {
    /// Called after a cycle's queue is built, before its first event.
    fn on_cycle_start(&mut self, _cycle: &Cycle) {}

    /// Called after an event was dispatched successfully.  `fired_at` is the
    /// clock reading used for the dispatch, which may lag `event.fire_at`.
    fn on_event(&mut self, _event: &Event, _fired_at: Timestamp) {}

    /// Called when a cycle's queue has drained.
    fn on_cycle_end(&mut self, _cycle: &Cycle, _drained_at: Timestamp) {}
}

/// A [`PlaybackObserver`] that does nothing.
pub struct NoopObserver;

impl PlaybackObserver for NoopObserver {}

/// Totals for a finished run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    /// Fully drained cycles (summed over workers in `PerStream` mode).
    pub cycles: u64,
    /// Lines appended.
    pub lines:  u64,
    /// Sinks cleared.
    pub clears: u64,
}

impl PlaybackStats {
    pub(crate) fn record(&mut self, event: &Event) {
        match event.kind {
            EventKind::Clear  => self.clears += 1,
            EventKind::Log(_) => self.lines += 1,
        }
    }

    pub(crate) fn merge(&mut self, other: PlaybackStats) {
        self.cycles += other.cycles;
        self.lines += other.lines;
        self.clears += other.clears;
    }
}
