use chrono::{TimeZone, Utc};

pub fn current_timestamp() -> i64 {
  Utc::now().timestamp()
}

// The article page shows "Last updated on July 5, 2025"
// so we format the full month name, in UTC.
// chrono formatting reference:
// https://docs.rs/chrono/0.4.19/chrono/format/strftime/index.html
pub fn timestamp_to_date_string(timestamp: i64) -> String {
  let d = Utc.timestamp(timestamp, 0);
  d.format("%B %-d, %Y").to_string()
}
