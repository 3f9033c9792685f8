//! FILENAME: core/engine/src/value.rs
//! PURPOSE: Defines the raw value delivered by a data source for one column of one row.
//! CONTEXT: Sources (database, workbook snapshot, tests) only speak `Value`.
//! The typed `Record` is built from a row of these at the loader boundary,
//! and display/export code goes back to `Value` for generic column access.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single raw cell of the reporting view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Number(f64),
    Text(String),
    Date(NaiveDateTime),
}

impl Value {
    /// Returns the value as a display string, the way a dataframe would
    /// stringify it. Null becomes an empty string.
    pub fn display_value(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Number(n) => general_number(*n),
            Value::Text(s) => s.clone(),
            Value::Date(d) => d.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Consume the value into its display string; `None` for null.
    pub fn into_text(self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(s),
            other => Some(other.display_value()),
        }
    }
}

impl From<Option<String>> for Value {
    fn from(value: Option<String>) -> Self {
        value.map(Value::Text).unwrap_or(Value::Null)
    }
}

impl From<Option<f64>> for Value {
    fn from(value: Option<f64>) -> Self {
        value.map(Value::Number).unwrap_or(Value::Null)
    }
}

impl From<Option<NaiveDateTime>> for Value {
    fn from(value: Option<NaiveDateTime>) -> Self {
        value.map(Value::Date).unwrap_or(Value::Null)
    }
}

/// Integers print without a fractional part, everything else as Rust's
/// shortest round-trip representation.
pub(crate) fn general_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
