use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("schedule parse error: {0}")]
    Parse(String),

    /// Popped an already-drained queue.  Correctly built cycles never do this.
    #[error("event queue is empty")]
    EmptyQueue,

    #[error("I/O error reading {path}: {source}")]
    Io {
        path:   String,
        #[source]
        source: std::io::Error,
    },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
