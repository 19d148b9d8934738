//! The cycle builder: one full playback of every stream as a flat event list.
//!
//! Pure and allocation-only: no sleeping, no I/O.  Calling it twice with the
//! same anchor yields identical output, which is what lets the driver rebuild
//! each cycle from scratch.

use lr_core::{StreamId, Timestamp};

use crate::{Event, StreamDefinition};

/// Events for one cycle of `streams`, anchored at `anchor`.
///
/// Streams are numbered by their position in the slice.  The slice must
/// hold fewer than `u32::MAX` streams: a longer one wraps ids and reuses
/// `StreamId::INVALID`.  Output is grouped by stream (clear first, then
/// lines in template order), not sorted globally; feed it to an
/// [`EventQueue`][crate::EventQueue] for that.
pub fn build_cycle(anchor: Timestamp, streams: &[StreamDefinition]) -> Vec<Event> {
    build_cycle_with_ids(
        anchor,
        streams
            .iter()
            .enumerate()
            .map(|(i, s)| (StreamId(i as u32), s)),
    )
}

/// Like [`build_cycle`] but with caller-assigned stream ids.
///
/// Used by per-stream workers, which each hold a single stream but must
/// report the id it was registered under.
pub fn build_cycle_with_ids<'a, I>(anchor: Timestamp, streams: I) -> Vec<Event>
where
    I: IntoIterator<Item = (StreamId, &'a StreamDefinition)>,
{
    let mut events = Vec::new();
    for (id, stream) in streams {
        push_stream_events(anchor, id, stream, &mut events);
    }
    events
}

fn push_stream_events(
    anchor: Timestamp,
    id:     StreamId,
    stream: &StreamDefinition,
    out:    &mut Vec<Event>,
) {
    out.reserve(stream.lines().len() + 1);

    let mut offset = stream.start_offset();
    out.push(Event::clear(anchor + offset, id, stream.sink().clone()));

    for (i, line) in stream.lines().iter().enumerate() {
        offset += stream.delays().get(i);
        out.push(Event::log(anchor + offset, id, stream.sink().clone(), line.clone()));
    }
}
