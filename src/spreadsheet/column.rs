use crate::spreadsheet::cell::{float_to_int, Value};

/// Column type inferred once for the whole column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Booleans only, no missing cells
    Boolean,
    /// Whole numbers only, no missing cells
    Integer,
    /// Numbers, possibly with missing cells
    Float,
    /// Date-time values, possibly with missing cells
    Temporal,
    /// Text or mixed content
    Text,
}

/// Represents a column of a table with name and inferred type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    /// Column name (from the header row)
    pub name: String,
    /// Inferred column type
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Column {
            name: name.into(),
            kind,
        }
    }
}

impl ColumnKind {
    /// Returns the string representation of the column type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Boolean => "boolean",
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Temporal => "datetime",
            ColumnKind::Text => "text",
        }
    }

    /// Detects the most specific common type of all values in a column.
    /// A column with no values at all is numeric.
    pub fn detect<'a, I>(values: I) -> ColumnKind
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut has_missing = false;
        let mut present = 0usize;
        let mut all_bool = true;
        let mut all_integral = true;
        let mut all_number = true;
        let mut all_datetime = true;
        for value in values {
            if value.is_missing() {
                has_missing = true;
                continue;
            }
            present += 1;
            all_bool &= matches!(value, Value::Bool(_));
            all_integral &= value.is_integral();
            all_number &= value.is_number();
            all_datetime &= matches!(value, Value::DateTime(_));
        }

        if present == 0 {
            ColumnKind::Float
        } else if all_bool && !has_missing {
            ColumnKind::Boolean
        } else if all_integral && !has_missing {
            ColumnKind::Integer
        } else if all_number {
            ColumnKind::Float
        } else if all_datetime {
            ColumnKind::Temporal
        } else {
            ColumnKind::Text
        }
    }

    /// Value that replaces missing cells of a column of this type.
    pub fn fill_value(&self) -> Value {
        match self {
            ColumnKind::Boolean | ColumnKind::Integer => Value::Int(0),
            ColumnKind::Float => Value::Float(0.0),
            ColumnKind::Temporal => Value::NullDate,
            ColumnKind::Text => Value::Text(String::new()),
        }
    }

    /// Converts a number to the representation of this column type.
    /// Other values are returned unchanged.
    pub fn coerce(&self, value: Value) -> Value {
        match (self, value) {
            (ColumnKind::Integer, Value::Float(number)) => match float_to_int(number) {
                Some(integer) => Value::Int(integer),
                None => Value::Float(number),
            },
            (ColumnKind::Float, Value::Int(number)) => Value::Float(number as f64),
            (_, value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn detect(values: &[Value]) -> ColumnKind {
        ColumnKind::detect(values.iter())
    }

    #[test]
    fn test_detect_numbers() {
        assert_eq!(detect(&[Value::Float(1.0), Value::Int(2)]), ColumnKind::Integer);
        assert_eq!(detect(&[Value::Float(1.0), Value::Empty]), ColumnKind::Float);
        assert_eq!(detect(&[Value::Float(1.5), Value::Int(2)]), ColumnKind::Float);
        assert_eq!(detect(&[Value::Empty, Value::Empty]), ColumnKind::Float);
        assert_eq!(detect(&[Value::Float(1e20), Value::Int(2)]), ColumnKind::Float);
        assert_eq!(detect(&[]), ColumnKind::Float);
    }

    #[test]
    fn test_detect_booleans() {
        assert_eq!(detect(&[Value::Bool(true), Value::Bool(false)]), ColumnKind::Boolean);
        assert_eq!(detect(&[Value::Bool(true), Value::Empty]), ColumnKind::Text);
        assert_eq!(detect(&[Value::Bool(true), Value::Int(1)]), ColumnKind::Text);
    }

    #[test]
    fn test_detect_datetimes() {
        let datetime = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Value::DateTime)
            .unwrap();
        assert_eq!(detect(&[datetime.clone(), Value::Empty]), ColumnKind::Temporal);
        assert_eq!(
            detect(&[datetime, Value::Text("x".to_owned())]),
            ColumnKind::Text
        );
    }

    #[test]
    fn test_detect_text() {
        assert_eq!(
            detect(&[Value::Text("a".to_owned()), Value::Float(1.0)]),
            ColumnKind::Text
        );
    }

    #[test]
    fn test_kind_names() {
        let names: Vec<&str> = [
            ColumnKind::Boolean,
            ColumnKind::Integer,
            ColumnKind::Float,
            ColumnKind::Temporal,
            ColumnKind::Text,
        ]
        .iter()
        .map(ColumnKind::as_str)
        .collect();
        assert_eq!(names, vec!["boolean", "integer", "float", "datetime", "text"]);
    }

    #[test]
    fn test_fill_values() {
        assert_eq!(ColumnKind::Integer.fill_value(), Value::Int(0));
        assert_eq!(ColumnKind::Float.fill_value(), Value::Float(0.0));
        assert_eq!(ColumnKind::Temporal.fill_value(), Value::NullDate);
        assert_eq!(ColumnKind::Text.fill_value(), Value::Text(String::new()));
    }

    #[test]
    fn test_coercion() {
        assert!(matches!(ColumnKind::Integer.coerce(Value::Float(7.0)), Value::Int(7)));
        assert!(matches!(ColumnKind::Float.coerce(Value::Int(7)), Value::Float(_)));
        assert!(matches!(ColumnKind::Integer.coerce(Value::Float(1e20)), Value::Float(_)));
        assert_eq!(ColumnKind::Text.coerce(Value::Int(7)), Value::Int(7));
        assert_eq!(ColumnKind::Float.coerce(Value::Empty), Value::Empty);
    }
}
