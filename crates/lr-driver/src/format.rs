//! Line formatting.

use chrono::Local;
use lr_core::Timestamp;

use crate::TimestampZone;

/// `strftime` pattern of the timestamp written before each line.
pub const LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `"<fired_at> <payload>"`, with `fired_at` rendered in `zone` at whole-second
/// precision.
pub fn format_line(payload: &str, fired_at: Timestamp, zone: TimestampZone) -> String {
    let utc = fired_at.to_datetime().unwrap_or_default();
    let stamp = match zone {
        TimestampZone::Utc   => utc.format(LINE_TIMESTAMP_FORMAT).to_string(),
        TimestampZone::Local => utc.with_timezone(&Local).format(LINE_TIMESTAMP_FORMAT).to_string(),
    };
    let mut line = String::with_capacity(stamp.len() + 1 + payload.len());
    line.push_str(&stamp);
    line.push(' ');
    line.push_str(payload);
    line
}
