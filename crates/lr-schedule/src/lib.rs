//! `lr-schedule`: what gets replayed, and in which order.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`delay`]   | `DelayTable` (cyclically indexed positive durations)      |
//! | [`stream`]  | `StreamDefinition`                                        |
//! | [`event`]   | `Event`, `EventKind`                                      |
//! | [`cycle`]   | `build_cycle`, `build_cycle_with_ids`                     |
//! | [`queue`]   | `EventQueue` (`BTreeMap<(fire_at, rank, seq), Event>`)    |
//! | [`loader`]  | template and CSV manifest loading                         |
//! | [`error`]   | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Cycle model (summary)
//!
//! For a cycle anchored at `T`, stream `s` with start offset `o` and delay
//! table `d` (length `M`) produces:
//!
//! ```text
//! Clear(s)      @ T + o
//! Log(s, l[k])  @ T + o + d[0] + d[1 % M] + … + d[k % M]
//! ```
//!
//! All streams' events go into one `EventQueue`; cross-stream interleaving
//! is decided there by fire time alone, with `Clear` winning exact ties.

pub mod cycle;
pub mod delay;
pub mod error;
pub mod event;
pub mod loader;
pub mod queue;
pub mod stream;

#[cfg(test)]
mod tests;

pub use cycle::{build_cycle, build_cycle_with_ids};
pub use delay::DelayTable;
pub use error::{ScheduleError, ScheduleResult};
pub use event::{Event, EventKind};
pub use loader::{
    load_streams_csv, load_streams_reader, load_template_lines, load_template_reader,
};
pub use queue::EventQueue;
pub use stream::StreamDefinition;
