use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const STRING_MAX_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// Every problem found in one request, reported together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Records the error, if any, and passes the value through.
    pub fn check<T>(&mut self, result: ValidationResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(err);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.iter().any(|err| err.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Field-keyed messages, as sent to clients.
    pub fn by_field(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for err in &self.errors {
            map.entry(err.field.to_string())
                .or_default()
                .push(err.message.clone());
        }
        map
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.by_field().serialize(serializer)
    }
}

fn label(field: &str) -> String {
    field.replace('_', " ")
}

pub fn sanitize_string(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_control())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sanitizes a required string field and checks presence and length.
pub fn required_string(field: &'static str, value: Option<&str>) -> ValidationResult<String> {
    let value = sanitize_string(value.unwrap_or_default());
    validate_required(field, &value)?;
    validate_max_len(field, &value, STRING_MAX_LEN)?;
    Ok(value)
}

pub fn required<T>(field: &'static str, value: Option<T>) -> ValidationResult<T> {
    value.ok_or_else(|| {
        ValidationError::new(field, format!("The {} field is required.", label(field)))
    })
}

pub fn validate_required(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(
            field,
            format!("The {} field is required.", label(field)),
        ));
    }

    Ok(())
}

pub fn validate_max_len(field: &'static str, value: &str, max_len: usize) -> ValidationResult {
    if value.chars().count() > max_len {
        return Err(ValidationError::new(
            field,
            format!(
                "The {} field must not be greater than {} characters.",
                label(field),
                max_len
            ),
        ));
    }

    Ok(())
}

pub fn validate_non_negative(field: &'static str, value: i64) -> ValidationResult {
    if value < 0 {
        return Err(ValidationError::new(
            field,
            format!("The {} field must be at least 0.", label(field)),
        ));
    }

    Ok(())
}

/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp truncated to its date.
pub fn parse_date(field: &'static str, value: Option<&str>) -> ValidationResult<NaiveDate> {
    let value = sanitize_string(value.unwrap_or_default());
    validate_required(field, &value)?;

    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(&value).map(|dt| dt.date_naive()))
        .map_err(|_| {
            ValidationError::new(
                field,
                format!("The {} field must be a valid date.", label(field)),
            )
        })
}
