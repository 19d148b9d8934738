//! `DelayTable`: the gap before each line of a stream.

use std::time::Duration;

use lr_core::time::duration_micros;

use crate::{ScheduleError, ScheduleResult};

/// Ordered, non-empty sequence of durations of at least one microsecond.
///
/// Index `i` reads `delays[i % len]`, so a ten-entry table can pace a
/// template of any length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelayTable {
    delays: Vec<Duration>,
}

impl DelayTable {
    /// Validate and wrap `delays`.
    ///
    /// Fails if the table is empty or any entry is below one microsecond,
    /// the resolution of `Timestamp`.  A shorter delay would give two lines
    /// of one stream the same fire time.
    pub fn new(delays: Vec<Duration>) -> ScheduleResult<Self> {
        if delays.is_empty() {
            return Err(ScheduleError::Config("delay table is empty".into()));
        }
        if let Some(i) = delays.iter().position(|&d| duration_micros(d) == 0) {
            return Err(ScheduleError::Config(format!(
                "delay #{i} ({:?}) is shorter than 1us; delays must be positive",
                delays[i]
            )));
        }
        Ok(Self { delays })
    }

    /// Build from fractional seconds, the unit the manifest uses.
    pub fn from_secs_f64(secs: &[f64]) -> ScheduleResult<Self> {
        let delays = secs
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                Duration::try_from_secs_f64(s).map_err(|_| {
                    ScheduleError::Config(format!("delay #{i} ({s}) is not a valid duration"))
                })
            })
            .collect::<ScheduleResult<Vec<_>>>()?;
        Self::new(delays)
    }

    /// Delay preceding line `i`.
    #[inline]
    pub fn get(&self, i: usize) -> Duration {
        self.delays[i % self.delays.len()]
    }

    /// Sum of the delays preceding lines `0..n`, i.e. the offset of line
    /// `n - 1` from the stream's clear.
    pub fn cumulative(&self, n: usize) -> Duration {
        (0..n).map(|i| self.get(i)).sum()
    }

    /// Every entry multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> ScheduleResult<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ScheduleError::Config(format!(
                "delay scale {factor} must be a positive finite number"
            )));
        }
        let delays = self
            .delays
            .iter()
            .map(|d| {
                Duration::try_from_secs_f64(d.as_secs_f64() * factor).map_err(|_| {
                    ScheduleError::Config(format!("scaling {d:?} by {factor} overflows"))
                })
            })
            .collect::<ScheduleResult<Vec<_>>>()?;
        Self::new(delays)
    }

    pub fn len(&self) -> usize {
        self.delays.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    pub fn as_slice(&self) -> &[Duration] {
        &self.delays
    }
}
