//! `lr-sink`: where replayed lines end up.
//!
//! The driver only ever calls two operations, both through [`Sink`]:
//!
//! | Operation | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `clear`   | truncate the destination to empty (creating it if absent) |
//! | `append`  | write `text` + `\n`, flushed before returning             |
//!
//! Two backends are provided:
//!
//! | Type          | Destination                                            |
//! |---------------|--------------------------------------------------------|
//! | [`FileSink`]  | one file per `SinkId`, resolved against a root dir     |
//! | [`MemorySink`]| in-process buffers plus an ordered op log (tests, demos) |
//!
//! # Usage
//!
//! ```rust,ignore
//! use lr_sink::{FileSink, Sink};
//!
//! let sink = FileSink::new("./out").create_dirs(true);
//! sink.clear(&"1-out.log".into())?;
//! sink.append(&"1-out.log".into(), "2024-01-01 00:00:00 hello")?;
//! ```

pub mod error;
pub mod file;
pub mod memory;
pub mod sink;


pub use error::{SinkError, SinkResult};
pub use file::FileSink;
pub use memory::{MemorySink, SinkOp};
pub use sink::Sink;
