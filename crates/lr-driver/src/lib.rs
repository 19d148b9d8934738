//! `lr-driver`: plays stream definitions into a sink, forever.
//!
//! # Cycle loop
//!
//! ```text
//! loop:
//!   ① Anchor  anchor = clock.now()
//!   ② Build   queue = build_cycle(anchor, streams), ordered by EventQueue
//!   ③ Drain   while the queue is non-empty:
//!                stop if cancelled
//!                pop the earliest event
//!                sleep until it is due (racing the cancel token)
//!                stop if cancelled
//!                Clear → sink.clear(sink_id)
//!                Log   → sink.append(sink_id, "<fired-at> <line>")
//!   ④ Repeat  the next anchor is the instant the queue ran dry
//! ```
//!
//! # Playback modes
//!
//! | Mode                    | Tasks            | Queue                      |
//! |-------------------------|------------------|----------------------------|
//! | [`PlaybackMode::Merged`]    | caller's task    | one for all streams        |
//! | [`PlaybackMode::PerStream`] | one per stream   | one per stream             |
//!
//! Either way, sink ids must be distinct; [`DriverBuilder::build`] rejects
//! duplicates before anything is scheduled.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lr_core::SystemClock;
//! use lr_driver::{DriverBuilder, NoopObserver};
//! use lr_sink::FileSink;
//! use tokio_util::sync::CancellationToken;
//!
//! let driver = DriverBuilder::new(SystemClock::new())
//!     .streams(streams)
//!     .build()?;
//! let cancel = CancellationToken::new();
//! let stats = driver.run(Arc::new(FileSink::new(".")), &cancel, &mut NoopObserver).await?;
//! ```

pub mod builder;
pub mod config;
pub mod driver;
pub mod error;
pub mod format;
pub mod observer;
mod worker;


pub use builder::DriverBuilder;
pub use config::{DriverConfig, PlaybackMode, TimestampZone};
pub use driver::Driver;
pub use error::{DriverError, DriverResult};
pub use format::{format_line, LINE_TIMESTAMP_FORMAT};
pub use observer::{Cycle, NoopObserver, PlaybackObserver, PlaybackStats};
