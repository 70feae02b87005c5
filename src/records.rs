//! Typed read-side views over stored documents.
//!
//! The store holds open-schema JSON documents: the sensor may submit fields
//! this service never looks at, and old documents may be missing fields this
//! service renders. Reads therefore go through a partial record with optional
//! fields and one explicit defaulting step at the retrieval boundary, so the
//! Formatting Layer only ever sees complete records.
//!
//! Numeric fields keep their `serde_json::Number` representation end to end:
//! integers render without a decimal point and floats render as submitted.

use serde::Deserialize;
use serde_json::{Number, Value};
use tracing::warn;

/// Substituted for a missing stored `date`.
pub const DEFAULT_DATE: &str = "01/01/23";
/// Substituted for a missing stored `time`.
pub const DEFAULT_TIME: &str = "00:00:00";
/// Prediction class meaning "unknown/missing".
const DEFAULT_CLASS: i64 = 4;

/// Measurement document as stored, with every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialMeasurement {
    pub date: Option<String>,
    pub time: Option<String>,
    pub temperature: Option<Number>,
    pub humidity: Option<Number>,
    pub pressure: Option<Number>,
}

/// Measurement with all renderable fields present.
#[derive(Debug, Clone)]
pub struct Measurement {
    pub date: String,
    pub time: String,
    pub temperature: Number,
    pub humidity: Number,
    pub pressure: Number,
}

impl PartialMeasurement {
    /// Extract the renderable fields from a stored document.
    ///
    /// A document whose fields have unexpected types is treated as fully
    /// missing rather than failing the whole read.
    pub fn from_doc(doc: Value) -> Self {
        serde_json::from_value(doc).unwrap_or_else(|e| {
            warn!(error = %e, "stored measurement has malformed fields, using defaults");
            Self::default()
        })
    }

    /// Substitute defaults for absent fields.
    pub fn with_defaults(self) -> Measurement {
        Measurement {
            date: self.date.unwrap_or_else(|| DEFAULT_DATE.to_string()),
            time: self.time.unwrap_or_else(|| DEFAULT_TIME.to_string()),
            temperature: self.temperature.unwrap_or_else(|| Number::from(0)),
            humidity: self.humidity.unwrap_or_else(|| Number::from(0)),
            pressure: self.pressure.unwrap_or_else(|| Number::from(0)),
        }
    }
}

/// Prediction document as stored, with every field optional.
///
/// Also used for the live measurement snapshot in `/predictions/latest`,
/// where `class` is absent and never rendered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialPrediction {
    pub temperature: Option<Number>,
    pub humidity: Option<Number>,
    pub pressure: Option<Number>,
    pub class: Option<Number>,
}

/// Prediction with all renderable fields present.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub temperature: Number,
    pub humidity: Number,
    pub pressure: Number,
    pub class: Number,
}

impl PartialPrediction {
    /// Extract the renderable fields from a stored document.
    pub fn from_doc(doc: Value) -> Self {
        serde_json::from_value(doc).unwrap_or_else(|e| {
            warn!(error = %e, "stored prediction has malformed fields, using defaults");
            Self::default()
        })
    }

    /// Substitute defaults for absent fields.
    pub fn with_defaults(self) -> Prediction {
        Prediction {
            temperature: self.temperature.unwrap_or_else(|| Number::from(0)),
            humidity: self.humidity.unwrap_or_else(|| Number::from(0)),
            pressure: self.pressure.unwrap_or_else(|| Number::from(0)),
            class: self.class.unwrap_or_else(|| Number::from(DEFAULT_CLASS)),
        }
    }
}

/// Convert a submitted pressure value from pascals to hectopascals.
///
/// Integer division semantics: the stored value is `floor(pa / 100)`, never
/// rounded. A value that cannot be read as a number is persisted verbatim and
/// surfaces as a default at read time.
pub fn pressure_to_hectopascals(value: &Value) -> Value {
    let pascals = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match pascals {
        Some(pa) => Value::from(pa.div_euclid(100)),
        None => value.clone(),
    }
}
