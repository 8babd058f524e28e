//! Interval timestamp calculation
//!
//! NEM12 labels each interval by its end boundary: slot 0 of a 30-minute
//! day denotes the reading ending at 00:30, and the last slot of any day
//! rolls over to the following calendar date at 00:00.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Calculate the end-boundary timestamp for one interval slot
///
/// `index` is 0-based within the interval day. The offset from midnight is
/// `interval_minutes * (index + 1)`, so the final slot of the day lands on
/// `date + 1 day` at 00:00.
///
/// Examples for a 30-minute interval day:
/// - `interval_timestamp(2005-03-01, 30, 0)` -> 2005-03-01T00:30:00
/// - `interval_timestamp(2005-03-01, 30, 46)` -> 2005-03-01T23:30:00
/// - `interval_timestamp(2005-03-01, 30, 47)` -> 2005-03-02T00:00:00
pub fn interval_timestamp(date: NaiveDate, interval_minutes: u32, index: usize) -> NaiveDateTime {
    let total_minutes = i64::from(interval_minutes) * (index as i64 + 1);
    date.and_time(NaiveTime::MIN) + Duration::minutes(total_minutes)
}
