use chrono::{DateTime, SecondsFormat, Utc};

const WINDOWS_TICKS: u64 = 10000000;
const SECONDS_TO_UNIX: i64 = 11644473600;

/// Convert Windows filetime values to a UTC `DateTime`. Returns `None` if the value cannot be represented
fn filetime_to_datetime(filetime: u64) -> Option<DateTime<Utc>> {
    // Division keeps the seconds inside i64 range
    let seconds = (filetime / WINDOWS_TICKS) as i64 - SECONDS_TO_UNIX;
    let nanos = (filetime % WINDOWS_TICKS) as u32 * 100;
    DateTime::from_timestamp(seconds, nanos)
}

/// Convert Windows filetime to `YYYY-MM-DD HH:MM:SS.mmm` (UTC)
pub fn filetime_to_display(filetime: u64) -> String {
    match filetime_to_datetime(filetime) {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        None => format!("Invalid filetime: {filetime}"),
    }
}

/// Convert Windows filetime to an ISO8601 string with millisecond precision
pub(crate) fn filetime_to_iso(filetime: u64) -> String {
    match filetime_to_datetime(filetime) {
        Some(time) => time.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => format!("Invalid filetime: {filetime}"),
    }
}
