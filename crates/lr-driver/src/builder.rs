//! Fluent builder for constructing a [`Driver`].

use std::collections::HashMap;

use lr_core::time::duration_micros;
use lr_core::{Clock, SinkId, StreamId};
use lr_schedule::StreamDefinition;

use crate::{Driver, DriverConfig, DriverError, DriverResult, PlaybackMode, TimestampZone};

/// Fluent builder for [`Driver<C>`].
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                    |
/// |--------------------|----------------------------|
/// | `.mode(m)`         | `PlaybackMode::Merged`     |
/// | `.zone(z)`         | `TimestampZone::Local`     |
/// | `.max_cycles(n)`   | run until cancelled        |
///
/// At least one stream is required.
///
/// # Example
///
/// ```rust,ignore
/// let driver = DriverBuilder::new(SystemClock::new())
///     .stream(a)
///     .stream(b)
///     .mode(PlaybackMode::PerStream)
///     .build()?;
/// ```
pub struct DriverBuilder<C: Clock> {
    clock:   C,
    streams: Vec<StreamDefinition>,
    config:  DriverConfig,
}

impl<C: Clock> DriverBuilder<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            streams: Vec::new(),
            config:  DriverConfig::default(),
        }
    }

    /// Register one stream.  Streams are numbered in registration order.
    pub fn stream(mut self, stream: StreamDefinition) -> Self {
        self.streams.push(stream);
        self
    }

    /// Register several streams, appended after any already registered.
    pub fn streams(mut self, streams: impl IntoIterator<Item = StreamDefinition>) -> Self {
        self.streams.extend(streams);
        self
    }

    pub fn mode(mut self, mode: PlaybackMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn zone(mut self, zone: TimestampZone) -> Self {
        self.config.zone = zone;
        self
    }

    /// Stop after `n` drained cycles.  `0` means no limit.
    pub fn max_cycles(mut self, n: u64) -> Self {
        self.config.max_cycles = (n > 0).then_some(n);
        self
    }

    /// Replace all options at once.
    pub fn config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the stream set and return a ready-to-run [`Driver`].
    pub fn build(self) -> DriverResult<Driver<C>> {
        if self.streams.is_empty() {
            return Err(DriverError::Config("no streams configured".into()));
        }

        // ── Assign ids, rejecting shared sinks ────────────────────────────
        let mut seen: HashMap<SinkId, StreamId> = HashMap::with_capacity(self.streams.len());
        let mut streams = Vec::with_capacity(self.streams.len());
        for (i, stream) in self.streams.into_iter().enumerate() {
            let id = StreamId::try_from(i)
                .ok()
                .filter(|id| *id != StreamId::INVALID)
                .ok_or_else(|| DriverError::Config(format!("too many streams ({i}+)")))?;
            if let Some(&first) = seen.get(stream.sink()) {
                return Err(DriverError::DuplicateSink {
                    sink: stream.sink().clone(),
                    first,
                    second: id,
                });
            }
            seen.insert(stream.sink().clone(), id);
            streams.push((id, stream));
        }

        // ── A cycle that takes no time would never yield ──────────────────
        // Span is measured at `Timestamp` resolution: anything under 1us
        // fires at the anchor.
        let idle = |s: &StreamDefinition| duration_micros(s.span()) == 0;
        match self.config.mode {
            PlaybackMode::Merged => {
                if streams.iter().all(|(_, s)| idle(s)) {
                    return Err(DriverError::Config(
                        "every stream has zero span; a cycle would take no time".into(),
                    ));
                }
            }
            PlaybackMode::PerStream => {
                if let Some((id, s)) = streams.iter().find(|(_, s)| idle(s)) {
                    return Err(DriverError::Config(format!(
                        "{id} ({}) has zero span; its worker would never wait",
                        s.sink()
                    )));
                }
            }
        }

        Ok(Driver {
            clock:  self.clock,
            streams,
            config: self.config,
        })
    }
}
