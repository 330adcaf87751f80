//! Validate-and-extract helpers over raw JSON values.
//!
//! # Responsibility
//! - Pull typed values out of `serde_json::Value` trees, failing loudly.
//! - Name the offending value in every error, so decode failures are
//!   diagnosable from the error alone.
//!
//! # Invariants
//! - Helpers never coerce: a wrong-typed or missing value is always an
//!   error, never a default.

use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field-level validation failure. Carries a clone of the offending value
/// (or the missing key) for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    NotAString(Value),
    NotANumber(Value),
    NotABoolean(Value),
    NotAnObject(Value),
    NotAnArray(Value),
    MissingKey { key: String },
}

impl Display for JsonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAString(value) => write!(f, "not a string: {value}"),
            Self::NotANumber(value) => write!(f, "not a number: {value}"),
            Self::NotABoolean(value) => write!(f, "not a boolean: {value}"),
            Self::NotAnObject(value) => write!(f, "not an object: {value}"),
            Self::NotAnArray(value) => write!(f, "not an array: {value}"),
            Self::MissingKey { key } => write!(f, "no such key: {key}"),
        }
    }
}

impl Error for JsonError {}

pub fn string(value: &Value) -> Result<String, JsonError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| JsonError::NotAString(value.clone()))
}

/// Accepts any JSON number and truncates to `i64`. Epoch-millisecond
/// timestamps written by older app versions can be floats.
pub fn epoch_ms(value: &Value) -> Result<i64, JsonError> {
    if let Some(int) = value.as_i64() {
        return Ok(int);
    }
    if let Some(float) = value.as_f64() {
        return Ok(float as i64);
    }
    Err(JsonError::NotANumber(value.clone()))
}

pub fn boolean(value: &Value) -> Result<bool, JsonError> {
    value
        .as_bool()
        .ok_or_else(|| JsonError::NotABoolean(value.clone()))
}

pub fn object(value: &Value) -> Result<&Map<String, Value>, JsonError> {
    value
        .as_object()
        .ok_or_else(|| JsonError::NotAnObject(value.clone()))
}

pub fn array(value: &Value) -> Result<&Vec<Value>, JsonError> {
    value
        .as_array()
        .ok_or_else(|| JsonError::NotAnArray(value.clone()))
}

pub fn field<'a>(map: &'a Map<String, Value>, key: &str) -> Result<&'a Value, JsonError> {
    map.get(key).ok_or_else(|| JsonError::MissingKey {
        key: key.to_string(),
    })
}
