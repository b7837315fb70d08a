//! Values collected from answered steps

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A parsed answer stored under a step's field key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Field name to value, accumulated as steps are answered
pub type CollectedData = HashMap<String, FieldValue>;

/// Read a numeric field
pub fn number_field(data: &CollectedData, field: &str) -> Option<f64> {
    data.get(field).and_then(FieldValue::as_number)
}

/// Read a text field
pub fn text_field<'a>(data: &'a CollectedData, field: &str) -> Option<&'a str> {
    data.get(field).and_then(FieldValue::as_text)
}
