use calamine::Data;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use std::fmt::Display;
use std::hash::Hash;
use std::hash::Hasher;

/// Text values that are read as missing cells, in addition to empty cells and error cells.
pub const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single cell value of a loaded table.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Missing cell (blank, spreadsheet error or missing marker)
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
    /// Time of day without a date
    Time(NaiveTime),
    /// Fill value of a date/time column for cells that were missing
    NullDate,
}

impl Value {
    /// Returns true if the cell holds no value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Returns true for integer values and floats without a fractional part
    /// that fit in an `i64`.
    pub fn is_integral(&self) -> bool {
        match self {
            Value::Int(_) => true,
            Value::Float(value) => float_to_int(*value).is_some(),
            _ => false,
        }
    }

    /// Returns true for integer and float values.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Returns the numeric value of integer and float cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Number of characters of the textual form, as used for column widths.
    pub fn rendered_len(&self) -> usize {
        self.to_string().chars().count()
    }
}

impl From<&Data> for Value {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Value::Empty,
            Data::Bool(value) => Value::Bool(*value),
            Data::Int(value) => Value::Int(*value),
            Data::Float(value) if value.is_nan() => Value::Empty,
            Data::Float(value) => Value::Float(*value),
            Data::String(value) if MISSING_MARKERS.contains(&value.as_str()) => Value::Empty,
            Data::String(value) => Value::Text(value.to_owned()),
            Data::DateTime(value) if value.is_duration() => Value::Float(value.as_f64()),
            Data::DateTime(value) => match value.as_datetime() {
                // Serial numbers below one day carry a time of day only
                Some(datetime) if value.as_f64() < 1.0 => Value::Time(datetime.time()),
                Some(datetime) => Value::DateTime(datetime),
                None => Value::Float(value.as_f64()),
            },
            Data::DateTimeIso(value) => parse_iso_datetime(value)
                .map(Value::DateTime)
                .unwrap_or_else(|| Value::Text(value.to_owned())),
            Data::DurationIso(value) => Value::Text(value.to_owned()),
        }
    }
}

/// Parses ISO 8601 date-time (`2024-05-01T08:30:00`) or date (`2024-05-01`) strings.
fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    if value.contains('T') {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()
    } else {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Empty, Value::Empty) | (Value::NullDate, Value::NullDate) => true,
            (Value::Bool(left), Value::Bool(right)) => left == right,
            (Value::Int(left), Value::Int(right)) => left == right,
            (Value::Float(left), Value::Float(right)) => float_key(*left) == float_key(*right),
            (Value::Int(int), Value::Float(float)) | (Value::Float(float), Value::Int(int)) => {
                float_to_int(*float) == Some(*int)
            }
            (Value::Text(left), Value::Text(right)) => left == right,
            (Value::DateTime(left), Value::DateTime(right)) => left == right,
            (Value::Time(left), Value::Time(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            // Integers and floats share one hash space since `Int(1) == Float(1.0)`
            Value::Int(value) => float_key(*value as f64).hash(state),
            Value::Float(value) => float_key(*value).hash(state),
            _ => std::mem::discriminant(self).hash(state),
        }
        match self {
            Value::Empty | Value::NullDate | Value::Int(_) | Value::Float(_) => (),
            Value::Bool(value) => value.hash(state),
            Value::Text(value) => value.hash(state),
            Value::DateTime(value) => value.hash(state),
            Value::Time(value) => value.hash(state),
        }
    }
}

/// Integer value of a whole float inside the `i64` range.
pub(crate) fn float_to_int(value: f64) -> Option<i64> {
    // `i64::MAX as f64` rounds up to 2^63, which is already out of range
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then(|| value as i64)
}

/// Bit pattern used for float equality and hashing; `0.0` and `-0.0` compare equal.
fn float_key(value: f64) -> u64 {
    if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(value) => write!(f, "{value}"),
            // Whole floats keep one decimal so they read differently from integers
            Value::Float(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 => {
                write!(f, "{value:.1}")
            }
            Value::Float(value) => write!(f, "{value}"),
            Value::Text(value) => write!(f, "{value}"),
            Value::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
            Value::Time(value) => write!(f, "{}", value.format("%H:%M:%S")),
            Value::NullDate => write!(f, "NaT"),
        }
    }
}
