//! The `Driver` struct and its two playback modes.

use std::sync::Arc;

use lr_core::{Clock, StreamId, Timestamp};
use lr_schedule::{Event, StreamDefinition};
use lr_sink::Sink;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::worker::Worker;
use crate::{Cycle, DriverConfig, DriverResult, PlaybackMode, PlaybackObserver, PlaybackStats};

// ── Driver ────────────────────────────────────────────────────────────────────

/// Replays its streams into a sink until cancelled.
///
/// Create via [`DriverBuilder`][crate::DriverBuilder].  The driver owns the
/// stream definitions and the clock; the sink is supplied per run.
pub struct Driver<C: Clock> {
    pub(crate) clock:   C,
    pub(crate) streams: Vec<(StreamId, StreamDefinition)>,
    pub(crate) config:  DriverConfig,
}

impl<C: Clock> Driver<C> {
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Registered streams with the ids events will carry.
    pub fn streams(&self) -> &[(StreamId, StreamDefinition)] {
        &self.streams
    }
}

impl<C: Clock + Clone + 'static> Driver<C> {
    /// Play until `cancel` fires, `max_cycles` is reached, or a sink
    /// operation fails.
    ///
    /// Cancellation is a normal stop and yields `Ok` with the totals so far.
    /// An operation already handed to the sink always completes; nothing is
    /// issued after the token is observed.
    pub async fn run<S, O>(
        &self,
        sink:     Arc<S>,
        cancel:   &CancellationToken,
        observer: &mut O,
    ) -> DriverResult<PlaybackStats>
    where
        S: Sink + 'static,
        O: PlaybackObserver,
    {
        info!(
            streams = self.streams.len(),
            mode = ?self.config.mode,
            max_cycles = ?self.config.max_cycles,
            "playback starting"
        );
        let stats = match self.config.mode {
            PlaybackMode::Merged    => self.run_merged(sink.as_ref(), cancel, observer).await?,
            PlaybackMode::PerStream => self.run_per_stream(sink, cancel, observer).await?,
        };
        info!(cycles = stats.cycles, lines = stats.lines, clears = stats.clears, "playback stopped");
        Ok(stats)
    }

    async fn run_merged<S, O>(
        &self,
        sink:     &S,
        cancel:   &CancellationToken,
        observer: &mut O,
    ) -> DriverResult<PlaybackStats>
    where
        S: Sink,
        O: PlaybackObserver,
    {
        Worker {
            clock:      &self.clock,
            sink,
            cancel,
            streams:    &self.streams,
            label:      None,
            zone:       self.config.zone,
            max_cycles: self.config.max_cycles,
        }
        .run(observer)
        .await
    }

    /// One task per stream.  Workers forward their hook calls over a channel
    /// so `observer` stays on the calling task.  A failed worker does not stop
    /// the others; once every worker has exited, the error of the lowest
    /// failing stream id is returned.
    async fn run_per_stream<S, O>(
        &self,
        sink:     Arc<S>,
        cancel:   &CancellationToken,
        observer: &mut O,
    ) -> DriverResult<PlaybackStats>
    where
        S: Sink + 'static,
        O: PlaybackObserver,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut handles = Vec::with_capacity(self.streams.len());

        for (id, stream) in &self.streams {
            let id = *id;
            let streams = [(id, stream.clone())];
            let clock = self.clock.clone();
            let sink = Arc::clone(&sink);
            let cancel = cancel.clone();
            let zone = self.config.zone;
            let max_cycles = self.config.max_cycles;
            let mut forward = Forwarder { tx: tx.clone() };

            handles.push(tokio::spawn(async move {
                let worker = Worker {
                    clock:   &clock,
                    sink:    sink.as_ref(),
                    cancel:  &cancel,
                    streams: &streams,
                    label:   Some(id),
                    zone,
                    max_cycles,
                };
                let result = worker.run(&mut forward).await;
                if let Err(e) = &result {
                    error!(stream = %id, error = %e, "stream worker stopped");
                }
                result
            }));
        }
        drop(tx);

        // Closes once every worker has dropped its sender.
        while let Some(notice) = rx.recv().await {
            match notice {
                Notice::CycleStart(cycle)     => observer.on_cycle_start(&cycle),
                Notice::Event(event, at)      => observer.on_event(&event, at),
                Notice::CycleEnd(cycle, at)   => observer.on_cycle_end(&cycle, at),
            }
        }

        let mut total = PlaybackStats::default();
        let mut first_err = None;
        for handle in handles {
            match handle.await? {
                Ok(stats) => total.merge(stats),
                Err(e) if first_err.is_none() => first_err = Some(e),
                Err(e) => warn!(error = %e, "additional stream worker failure"),
            }
        }
        match first_err {
            Some(e) => Err(e),
            None    => Ok(total),
        }
    }
}

// ── Per-stream hook forwarding ────────────────────────────────────────────────

enum Notice {
    CycleStart(Cycle),
    Event(Event, Timestamp),
    CycleEnd(Cycle, Timestamp),
}

struct Forwarder {
    tx: mpsc::UnboundedSender<Notice>,
}

// A closed receiver means `run` is gone; hooks are best-effort.
impl PlaybackObserver for Forwarder {
    fn on_cycle_start(&mut self, cycle: &Cycle) {
        let _ = self.tx.send(Notice::CycleStart(cycle.clone()));
    }

    fn on_event(&mut self, event: &Event, fired_at: Timestamp) {
        let _ = self.tx.send(Notice::Event(event.clone(), fired_at));
    }

    fn on_cycle_end(&mut self, cycle: &Cycle, drained_at: Timestamp) {
        let _ = self.tx.send(Notice::CycleEnd(cycle.clone(), drained_at));
    }
}
