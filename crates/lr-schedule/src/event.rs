//! Scheduled actions against a sink.

use std::sync::Arc;

use lr_core::{SinkId, StreamId, Timestamp};

/// What an event does when it fires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// Truncate the sink.  Exactly one per stream per cycle, always first.
    Clear,
    /// Append one template line (the driver prepends the fire timestamp).
    Log(Arc<str>),
}

impl EventKind {
    /// Tie-break rank among events with the same fire time: lower fires first.
    #[inline]
    pub fn rank(&self) -> u8 {
        match self {
            EventKind::Clear  => 0,
            EventKind::Log(_) => 1,
        }
    }

    /// Short operation name used in logs and error context.
    pub fn op(&self) -> &'static str {
        match self {
            EventKind::Clear  => "clear",
            EventKind::Log(_) => "append",
        }
    }
}

/// One timed action, created by the cycle builder and consumed exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub fire_at: Timestamp,
    pub stream:  StreamId,
    pub sink:    SinkId,
    pub kind:    EventKind,
}

impl Event {
    pub fn clear(fire_at: Timestamp, stream: StreamId, sink: SinkId) -> Self {
        Self { fire_at, stream, sink, kind: EventKind::Clear }
    }

    pub fn log(fire_at: Timestamp, stream: StreamId, sink: SinkId, line: Arc<str>) -> Self {
        Self { fire_at, stream, sink, kind: EventKind::Log(line) }
    }

    /// The template line, present iff this is a `Log` event.
    pub fn payload(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Clear     => None,
            EventKind::Log(line) => Some(line.as_ref()),
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self.kind, EventKind::Clear)
    }
}
