//! Station-local timestamping and the prediction admission window.
//!
//! The deployment stores and compares timestamps in the station's local time,
//! rendered as a `DD/MM/YY` date plus `HH:MM:SS` time pair. Local time is a
//! fixed one-hour offset from UTC; the offset is deliberately not DST-aware.

use chrono::{Duration, NaiveDateTime, Utc};
use tracing::warn;

/// Fixed offset from UTC to station-local time, in hours.
const UTC_OFFSET_HOURS: i64 = 1;

/// Timestamp layout used for stored `date` + `time` pairs.
const TIMESTAMP_FORMAT: &str = "%d/%m/%y %H:%M:%S";

/// Current station-local time.
pub fn station_now() -> NaiveDateTime {
    Utc::now().naive_utc() + Duration::hours(UTC_OFFSET_HOURS)
}

/// Render the date half of a stored timestamp (`DD/MM/YY`).
pub fn format_date(ts: NaiveDateTime) -> String {
    ts.format("%d/%m/%y").to_string()
}

/// Render the time half of a stored timestamp (`HH:MM:SS`).
pub fn format_time(ts: NaiveDateTime) -> String {
    ts.format("%H:%M:%S").to_string()
}

/// Parse a stored `date` + `time` pair back into a timestamp.
///
/// Returns `None` (with a warning) when the stored pair does not match the
/// expected layout. An unparseable timestamp can never throttle an insert.
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let combined = format!("{} {}", date, time);
    match NaiveDateTime::parse_from_str(&combined, TIMESTAMP_FORMAT) {
        Ok(ts) => Some(ts),
        Err(e) => {
            warn!(timestamp = %combined, error = %e, "unparseable stored timestamp");
            None
        }
    }
}

/// Admission predicate for prediction inserts.
///
/// A new prediction is accepted only when at least one full hour has passed
/// since the most recently stored prediction. Pure so the window boundary can
/// be tested without a store.
pub fn should_accept(now: NaiveDateTime, last_prediction: NaiveDateTime) -> bool {
    now - last_prediction >= Duration::hours(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%d/%m/%y %H:%M:%S").unwrap()
    }

    #[test]
    fn accepts_exactly_one_hour_after_last() {
        assert!(should_accept(ts("01/06/24 13:00:00"), ts("01/06/24 12:00:00")));
    }

    #[test]
    fn rejects_one_second_short_of_window() {
        assert!(!should_accept(ts("01/06/24 12:59:59"), ts("01/06/24 12:00:00")));
    }

    #[test]
    fn accepts_well_beyond_window() {
        assert!(should_accept(ts("02/06/24 08:00:00"), ts("01/06/24 12:00:00")));
    }

    #[test]
    fn rejects_last_prediction_in_the_future() {
        assert!(!should_accept(ts("01/06/24 12:00:00"), ts("01/06/24 12:30:00")));
    }

    #[test]
    fn timestamp_round_trips_through_date_and_time_halves() {
        let now = ts("05/03/23 07:45:12");
        let parsed = parse_timestamp(&format_date(now), &format_time(now)).unwrap();
        assert_eq!(parsed, now);
    }

    #[test]
    fn garbage_timestamp_parses_to_none() {
        assert!(parse_timestamp("not-a-date", "00:00:00").is_none());
        assert!(parse_timestamp("01/01/23", "25:99:99").is_none());
    }
}
