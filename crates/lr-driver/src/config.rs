//! Playback options that are not part of any single stream.

/// How streams share the timeline.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackMode {
    /// One queue holds every stream's events; dispatch is strictly ordered by
    /// fire time across all sinks.
    #[default]
    Merged,
    /// Each stream runs its own cycle loop on its own tokio task.  Streams
    /// drift apart: a stream's next cycle starts when *its* queue drains.
    PerStream,
}

/// Time zone used for the timestamp prefixed to every appended line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TimestampZone {
    #[default]
    Local,
    Utc,
}

/// Driver-wide settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DriverConfig {
    pub mode: PlaybackMode,
    pub zone: TimestampZone,
    /// Stop after this many completed cycles (per worker in `PerStream`
    /// mode).  `None` runs until cancelled.
    pub max_cycles: Option<u64>,
}
