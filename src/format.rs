//! Formatting Layer: pure transforms into the two external wire formats.
//!
//! The measurement line follows the Cumulus `realtime.txt` interchange format
//! (<https://www.cumuluswiki.org/a/Realtime.txt>). This station only measures
//! temperature, humidity and pressure; every other column is filled with the
//! fixed placeholder tokens the downstream display client expects. The token
//! sequence is a byte-for-byte contract and must not be reflowed.

use crate::records::{Measurement, Prediction};

/// Placeholder columns between humidity and pressure (wind, rainfall, etc.).
const UNMEASURED_MID: &str = "0 0 0 0 0 0";

/// Placeholder columns after pressure, through the end of the line.
const UNMEASURED_TAIL: &str = "W 0 km/h C hPa mm 0 +0.1 \
    0 0 0 0 0 0 0 0 \
    00:00 0 00:00 0 00:00 0 00:00 0 00:00 0 00:00 0 \
    819 0 0 0 0 0 0 0 0 0 0 0 \
    NNW 2040 ft 1 1 1 1 1";

/// Render a measurement as a single Cumulus realtime line.
pub fn realtime_line(m: &Measurement) -> String {
    format!(
        "{} {} {} {} {} {} {}",
        m.date, m.time, m.temperature, m.humidity, UNMEASURED_MID, m.pressure, UNMEASURED_TAIL
    )
}

/// Render a prediction as a comma-joined tuple.
///
/// Annotated tuples carry the predicted class as a fourth element. The
/// unannotated form represents the current, not-yet-predicted measurement
/// snapshot appended after the historical predictions.
pub fn prediction_tuple(p: &Prediction, annotated: bool) -> String {
    let mut out = format!("{}, {}, {}", p.temperature, p.humidity, p.pressure);
    if annotated {
        out.push_str(", ");
        out.push_str(&p.class.to_string());
    }
    out
}
