use lr_core::{SinkId, StreamId};
use lr_schedule::ScheduleError;
use lr_sink::SinkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("playback configuration error: {0}")]
    Config(String),

    #[error("sink {sink} is used by more than one stream ({first} and {second})")]
    DuplicateSink {
        sink:   SinkId,
        first:  StreamId,
        second: StreamId,
    },

    /// `source` already names the sink and operation.
    #[error("{stream}: {source}")]
    Sink {
        stream: StreamId,
        sink:   SinkId,
        op:     &'static str,
        #[source]
        source: SinkError,
    },

    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("stream worker panicked or was aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type DriverResult<T> = Result<T, DriverError>;
