//! The cycle loop shared by both playback modes.

use lr_core::{Clock, StreamId, Timestamp};
use lr_schedule::{build_cycle_with_ids, Event, EventKind, EventQueue, StreamDefinition};
use lr_sink::Sink;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{format_line, Cycle, DriverError, DriverResult, PlaybackObserver, PlaybackStats, TimestampZone};

/// Borrowed view of everything one cycle loop needs.
pub(crate) struct Worker<'a, C, S: ?Sized> {
    pub clock:      &'a C,
    pub sink:       &'a S,
    pub cancel:     &'a CancellationToken,
    pub streams:    &'a [(StreamId, StreamDefinition)],
    pub label:      Option<StreamId>,
    pub zone:       TimestampZone,
    pub max_cycles: Option<u64>,
}

impl<C: Clock, S: Sink + ?Sized> Worker<'_, C, S> {
    /// Play cycles until cancelled, `max_cycles` is reached, or a sink fails.
    pub async fn run<O: PlaybackObserver>(&self, observer: &mut O) -> DriverResult<PlaybackStats> {
        let mut stats = PlaybackStats::default();

        while !self.max_cycles.is_some_and(|max| stats.cycles >= max) {
            let anchor = self.clock.now();
            let mut queue: EventQueue = build_cycle_with_ids(
                anchor,
                self.streams.iter().map(|(id, s)| (*id, s)),
            )
            .into_iter()
            .collect();

            let cycle = Cycle {
                worker: self.label,
                index:  stats.cycles,
                anchor,
                events: queue.len(),
            };
            info!(worker = ?self.label, cycle = cycle.index, %anchor, events = cycle.events, "cycle started");
            observer.on_cycle_start(&cycle);

            while !queue.is_empty() {
                if self.cancel.is_cancelled() {
                    return Ok(stats);
                }
                let event = queue.pop_min()?;

                if event.fire_at > self.clock.now() {
                    tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => return Ok(stats),
                        _ = self.clock.sleep_until(event.fire_at) => {}
                    }
                }
                if self.cancel.is_cancelled() {
                    return Ok(stats);
                }

                let fired_at = self.dispatch(&event)?;
                stats.record(&event);
                observer.on_event(&event, fired_at);
            }

            stats.cycles += 1;
            let drained_at = self.clock.now();
            info!(worker = ?self.label, cycle = cycle.index, %drained_at, "cycle finished");
            observer.on_cycle_end(&cycle, drained_at);
        }

        Ok(stats)
    }

    /// Perform one event against the sink and return the instant used.
    fn dispatch(&self, event: &Event) -> DriverResult<Timestamp> {
        let fired_at = self.clock.now();
        let result = match &event.kind {
            EventKind::Clear => self.sink.clear(&event.sink),
            EventKind::Log(line) => {
                let text = format_line(line, fired_at, self.zone);
                self.sink.append(&event.sink, &text)
            }
        };
        result.map_err(|source| DriverError::Sink {
            stream: event.stream,
            sink:   event.sink.clone(),
            op:     event.kind.op(),
            source,
        })?;

        match event.payload() {
            Some(line) => debug!(sink = %event.sink, %fired_at, line, "logged"),
            None       => debug!(sink = %event.sink, %fired_at, "cleared"),
        }
        Ok(fired_at)
    }
}
