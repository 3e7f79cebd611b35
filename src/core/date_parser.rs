//! Strict date extraction for the project date fields.
//!
//! Values look like `2025-05-01T00:00:00.000`; only the `YYYY-MM-DD` prefix
//! before the `T` matters. No other layout is accepted.

use crate::domain::model::{DateField, Record};
use crate::utils::error::DateFieldError;
use chrono::NaiveDate;
use serde_json::Value;

/// Parses an exact `YYYY-MM-DD` string into a calendar date.
pub fn parse_date_prefix(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn parse_date_value(field: DateField, value: Option<&Value>) -> Result<NaiveDate, DateFieldError> {
    let raw = match value {
        None | Some(Value::Null) => {
            return Err(DateFieldError::MissingField {
                field: field.field_name().to_string(),
            })
        }
        Some(Value::String(s)) if s.is_empty() => {
            return Err(DateFieldError::MissingField {
                field: field.field_name().to_string(),
            })
        }
        Some(Value::String(s)) => s.as_str(),
        Some(other) => {
            return Err(DateFieldError::MalformedDate {
                field: field.field_name().to_string(),
                value: other.to_string(),
            })
        }
    };

    let prefix = raw.split('T').next().unwrap_or(raw);
    parse_date_prefix(prefix).ok_or_else(|| DateFieldError::MalformedDate {
        field: field.field_name().to_string(),
        value: raw.to_string(),
    })
}

pub fn extract_date(record: &Record, field: DateField) -> Result<NaiveDate, DateFieldError> {
    parse_date_value(field, record.get(field.field_name()))
}
