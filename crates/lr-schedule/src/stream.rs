//! `StreamDefinition`: static configuration of one replayed stream.

use std::sync::Arc;
use std::time::Duration;

use lr_core::SinkId;

use crate::{DelayTable, ScheduleError, ScheduleResult};

/// One template replayed into one sink.
///
/// Immutable once built; the driver owns it for the lifetime of a run.
#[derive(Clone, Debug)]
pub struct StreamDefinition {
    sink:         SinkId,
    lines:        Vec<Arc<str>>,
    delays:       DelayTable,
    start_offset: Duration,
}

impl StreamDefinition {
    /// A stream whose clear fires `start_offset` after each cycle's anchor.
    ///
    /// `lines` may be empty; such a stream only ever clears its sink.
    pub fn new<L, S>(sink: impl Into<SinkId>, lines: L, delays: DelayTable, start_offset: Duration) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self {
            sink: sink.into(),
            lines: lines.into_iter().map(Into::into).collect(),
            delays,
            start_offset,
        }
    }

    /// Like [`new`][Self::new] with the offset given in fractional seconds.
    pub fn with_offset_secs<L, S>(
        sink:         impl Into<SinkId>,
        lines:        L,
        delays:       DelayTable,
        offset_secs:  f64,
    ) -> ScheduleResult<Self>
    where
        L: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let sink = sink.into();
        let start_offset = Duration::try_from_secs_f64(offset_secs).map_err(|_| {
            ScheduleError::Config(format!(
                "stream {sink}: start offset {offset_secs} must be a non-negative number of seconds"
            ))
        })?;
        Ok(Self::new(sink, lines, delays, start_offset))
    }

    pub fn sink(&self) -> &SinkId {
        &self.sink
    }

    pub fn lines(&self) -> &[Arc<str>] {
        &self.lines
    }

    pub fn delays(&self) -> &DelayTable {
        &self.delays
    }

    pub fn start_offset(&self) -> Duration {
        self.start_offset
    }

    /// Offset of this stream's last event from the cycle anchor.
    pub fn span(&self) -> Duration {
        self.start_offset + self.delays.cumulative(self.lines.len())
    }

    /// Delays and start offset multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> ScheduleResult<Self> {
        let delays = self
            .delays
            .scaled(factor)
            .map_err(|e| ScheduleError::Config(format!("stream {}: {e}", self.sink)))?;
        let start_offset = Duration::try_from_secs_f64(self.start_offset.as_secs_f64() * factor)
            .map_err(|_| {
                ScheduleError::Config(format!(
                    "stream {}: scaling start offset by {factor} is out of range",
                    self.sink
                ))
            })?;
        Ok(Self {
            sink: self.sink.clone(),
            lines: self.lines.clone(),
            delays,
            start_offset,
        })
    }
}
