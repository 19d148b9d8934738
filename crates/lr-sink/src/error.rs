//! Error types for lr-sink.

use lr_core::SinkId;
use thiserror::Error;

/// A sink operation failed.  Carries the destination and the operation name
/// so the driver can report it without extra context.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to {op} {sink}: {source}")]
    Io {
        sink:   SinkId,
        op:     &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Raised by [`MemorySink`][crate::MemorySink] when a failure was armed.
    #[error("injected failure on {op} {sink}")]
    Injected {
        sink: SinkId,
        op:   &'static str,
    },
}

impl SinkError {
    pub fn sink(&self) -> &SinkId {
        match self {
            SinkError::Io { sink, .. } | SinkError::Injected { sink, .. } => sink,
        }
    }

    pub fn op(&self) -> &'static str {
        match self {
            SinkError::Io { op, .. } | SinkError::Injected { op, .. } => op,
        }
    }
}

/// Alias for `Result<T, SinkError>`.
pub type SinkResult<T> = Result<T, SinkError>;
