//! `EventQueue`: the per-cycle priority queue.
//!
//! Keys are `(fire_at, rank, seq)`: earliest first, `Clear` before `Log` at
//! the same instant, then insertion order.  The `seq` component makes every
//! key unique, so a `BTreeMap` gives a stable min-queue with O(log n) insert
//! and pop.

use std::collections::BTreeMap;

use lr_core::Timestamp;

use crate::{Event, ScheduleError, ScheduleResult};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
struct QueueKey {
    fire_at: Timestamp,
    rank:    u8,
    seq:     u64,
}

/// Pending events of one cycle, ordered for firing.
#[derive(Default, Debug)]
pub struct EventQueue {
    inner: BTreeMap<QueueKey, Event>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from a cycle's events, preserving their order for ties.
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Self {
        let mut queue = Self::new();
        for event in events {
            queue.insert(event);
        }
        queue
    }

    pub fn insert(&mut self, event: Event) {
        let key = QueueKey {
            fire_at: event.fire_at,
            rank:    event.kind.rank(),
            seq:     self.next_seq,
        };
        self.next_seq += 1;
        self.inner.insert(key, event);
    }

    /// Remove and return the next event to fire.
    pub fn pop_min(&mut self) -> ScheduleResult<Event> {
        self.inner
            .pop_first()
            .map(|(_, event)| event)
            .ok_or(ScheduleError::EmptyQueue)
    }

    /// The next event to fire, without removing it.
    pub fn peek_min(&self) -> Option<&Event> {
        self.inner.values().next()
    }

    /// Fire time of the next event, or `None` if empty.
    pub fn next_fire_at(&self) -> Option<Timestamp> {
        self.inner.keys().next().map(|k| k.fire_at)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromIterator<Event> for EventQueue {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self::from_events(iter)
    }
}
