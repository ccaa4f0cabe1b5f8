//! Date and timestamp text encodings.
//!
//! Dates are days since 1970-01-01 rendered as `YYYY-MM-DD`. Timestamps are
//! UTC instants rendered as `YYYY-MM-DD HH:MM:SS.nnnnnnnnn` regardless of the
//! column unit. Parsing is strict: anything that does not match the exact
//! layout is rejected.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::schema::TimeUnit;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:9]");

/// Julian day number of 1970-01-01.
const EPOCH_JULIAN_DAY: i32 = 2_440_588;

/// Render days since the epoch, or `None` if the day is outside the
/// representable calendar range.
pub fn format_date(days: i32) -> Option<String> {
    let julian = EPOCH_JULIAN_DAY.checked_add(days)?;
    let date = Date::from_julian_day(julian).ok()?;
    date.format(DATE_FORMAT).ok()
}

pub fn parse_date(text: &str) -> Option<i32> {
    let date = Date::parse(text, DATE_FORMAT).ok()?;
    Some(date.to_julian_day() - EPOCH_JULIAN_DAY)
}

/// Render a timestamp stored in `unit`.
pub fn format_timestamp(value: i64, unit: TimeUnit) -> Option<String> {
    let nanos = i128::from(value) * unit.nanos_per_unit();
    let instant = OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()?;
    instant.format(TIMESTAMP_FORMAT).ok()
}

/// Parse a timestamp into `unit`. Fails when the text carries sub-unit
/// precision the column cannot store.
pub fn parse_timestamp(text: &str, unit: TimeUnit) -> Option<i64> {
    let instant = PrimitiveDateTime::parse(text, TIMESTAMP_FORMAT)
        .ok()?
        .assume_utc();
    let nanos = instant.unix_timestamp_nanos();
    let per_unit = unit.nanos_per_unit();
    if nanos % per_unit != 0 {
        return None;
    }
    i64::try_from(nanos / per_unit).ok()
}
