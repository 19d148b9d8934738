//! The `Sink` trait implemented by all backends.

use std::sync::Arc;

use lr_core::SinkId;

use crate::SinkResult;

/// External write destination driven by the playback driver.
///
/// Methods take `&self` so one sink can be shared by per-stream workers;
/// implementations serialise internally where needed.  Both calls are
/// synchronous and expected to be fast; they are not cancellation points.
pub trait Sink: Send + Sync {
    /// Write `text` followed by a line terminator, visible to readers on
    /// return.
    fn append(&self, sink: &SinkId, text: &str) -> SinkResult<()>;

    /// Truncate the destination to empty.
    fn clear(&self, sink: &SinkId) -> SinkResult<()>;
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn append(&self, sink: &SinkId, text: &str) -> SinkResult<()> {
        (**self).append(sink, text)
    }

    fn clear(&self, sink: &SinkId) -> SinkResult<()> {
        (**self).clear(sink)
    }
}

impl<S: Sink + ?Sized> Sink for &S {
    fn append(&self, sink: &SinkId, text: &str) -> SinkResult<()> {
        (**self).append(sink, text)
    }

    fn clear(&self, sink: &SinkId) -> SinkResult<()> {
        (**self).clear(sink)
    }
}
