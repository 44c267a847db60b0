//! Resolution of "today" in the user's timezone.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the current UTC offset for a canonical timezone name such as
/// `"Pacific/Auckland"`. Returns `None` if the name is not recognized.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date in the given timezone, falling back to UTC when the timezone
/// name is not recognized.
pub fn local_today(canonical_timezone: &str) -> Date {
    match get_local_offset(canonical_timezone) {
        Some(offset) => OffsetDateTime::now_utc().to_offset(offset).date(),
        None => {
            tracing::warn!("unknown timezone {canonical_timezone:?}, falling back to UTC");
            OffsetDateTime::now_utc().date()
        }
    }
}
