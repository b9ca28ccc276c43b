use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Column {
    name: String,
    data_type: DataType,
}

impl Column {
    pub fn new(name: String, data_type: DataType) -> Self {
        Column { name, data_type }
    }

    pub fn get_name(&self) -> &str { &self.name }
    pub fn get_data_type(&self) -> &DataType { &self.data_type }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    String,
    Number,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub enum FieldValue {
    String(String),
    Number(f64),
    Null,
}

/// given a raw cell, returns the value it best fits into.
/// tries Number before falling back to String; an empty cell is Null.
///
/// ## Usage
/// used for coercing text cells from an uploaded file
pub fn parse_into_field_value(value: &str) -> FieldValue {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return FieldValue::Null;
    }

    if let Ok(num) = trimmed.parse::<f64>() {
        return FieldValue::Number(num);
    }

    FieldValue::String(value.to_string())
}

impl FieldValue {
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// the numeric value of this cell, if it has one.
    /// string and null cells give back None, they never coerce
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// # NOTE
    /// returns a **STRING DATATYPE** if a field value is null
    pub fn data_type(&self) -> DataType {
        match self {
            FieldValue::String(_) => DataType::String,
            FieldValue::Number(_) => DataType::Number,
            FieldValue::Null => DataType::String,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::String(v) => write!(f, "{v}"),
            FieldValue::Number(v) => write!(f, "{v}"),
            FieldValue::Null => write!(f, ""),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::String => write!(f, "String"),
            DataType::Number => write!(f, "Number"),
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(l0), Self::String(r0)) => l0 == r0,
            (Self::Number(l0), Self::Number(r0)) => l0 == r0,
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_cell_parses_as_number() {
        assert_eq!(parse_into_field_value("81.5"), FieldValue::Number(81.5));
        assert_eq!(parse_into_field_value(" 70 "), FieldValue::Number(70.0));
        assert_eq!(parse_into_field_value("-3"), FieldValue::Number(-3.0));
    }

    #[test]
    fn test_text_cell_parses_as_string() {
        assert_eq!(
            parse_into_field_value("Alice"),
            FieldValue::String("Alice".to_string())
        );
        // not a plain number, stays a string
        assert_eq!(
            parse_into_field_value("80%"),
            FieldValue::String("80%".to_string())
        );
    }

    #[test]
    fn test_empty_cell_parses_as_null() {
        assert_eq!(parse_into_field_value(""), FieldValue::Null);
        assert_eq!(parse_into_field_value("   "), FieldValue::Null);
    }

    #[test]
    fn test_as_number_never_coerces() {
        assert_eq!(FieldValue::Number(4.0).as_number(), Some(4.0));
        assert_eq!(FieldValue::String("4".to_string()).as_number(), None);
        assert_eq!(FieldValue::Null.as_number(), None);
    }
}
