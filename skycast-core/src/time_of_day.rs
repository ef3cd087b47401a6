//! Local day/night classification from an observation timestamp.

use chrono::{DateTime, FixedOffset};

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;

/// First local hour counted as night in the evening.
pub const NIGHT_STARTS_AT: u32 = 19;
/// Last local hour counted as night in the morning.
pub const NIGHT_ENDS_AT: u32 = 6;

/// Wall-clock hour (0..=23) at the location, given a Unix timestamp and the
/// location's offset from UTC in seconds.
pub fn local_hour(observed_at_unix: i64, utc_offset_seconds: i64) -> u32 {
    // Reduce each term first so extreme inputs cannot overflow.
    let seconds_into_day = (observed_at_unix.rem_euclid(SECONDS_PER_DAY)
        + utc_offset_seconds.rem_euclid(SECONDS_PER_DAY))
    .rem_euclid(SECONDS_PER_DAY);

    (seconds_into_day / SECONDS_PER_HOUR) as u32
}

/// True for local hours 19..=23 and 0..=6, both ends inclusive.
pub fn is_night(observed_at_unix: i64, utc_offset_seconds: i64) -> bool {
    let hour = local_hour(observed_at_unix, utc_offset_seconds);
    hour >= NIGHT_STARTS_AT || hour <= NIGHT_ENDS_AT
}

/// The instant as wall-clock time at the location. `None` when the timestamp
/// or the offset is outside what chrono can represent.
pub fn at_location(unix: i64, utc_offset_seconds: i64) -> Option<DateTime<FixedOffset>> {
    let offset = i32::try_from(utc_offset_seconds).ok().and_then(FixedOffset::east_opt)?;
    DateTime::from_timestamp(unix, 0).map(|dt| dt.with_timezone(&offset))
}
