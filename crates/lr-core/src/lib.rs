//! `lr-core`: foundational types for the `logreplay` workspace.
//!
//! Every other `lr-*` crate depends on this one.  It has no `lr-*`
//! dependencies and only two external ones (`chrono` for wall-clock
//! conversion, `tokio` for the monotonic timer).
//!
//! # What lives here
//!
//! | Module      | Contents                                          |
//! |-------------|---------------------------------------------------|
//! | [`ids`]     | `StreamId`, `SinkId`                              |
//! | [`time`]    | `Timestamp` (µs since the Unix epoch)             |
//! | [`clock`]   | `Clock` trait, `SystemClock`, `VirtualClock`      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and `Timestamp`.     |

pub mod clock;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use clock::{Clock, SystemClock, VirtualClock};
pub use ids::{SinkId, StreamId};
pub use time::Timestamp;
