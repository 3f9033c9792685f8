//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Brazilian-locale display formatting for values of the reporting view.
//! CONTEXT: This module converts raw numeric and date values to display
//! strings (`R$ 1.234,56`, `DD/MM/YYYY`). Output is display-only; aggregation
//! always runs on the raw numbers.

use crate::date::parse_date;
use crate::record::{Record, Table};
use crate::schema::{Column, ColumnKind};
use crate::value::Value;

/// Currency symbol prefix, including the separating space.
pub const BRL_SYMBOL: &str = "R$ ";

/// Display format of the date columns.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format a number as Brazilian Real: two decimals, `.` for thousands and
/// `,` for decimals. Negative values keep a leading minus after the symbol.
/// NaN and infinities are shown as-is after the symbol.
pub fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}{}", BRL_SYMBOL, value);
    }
    let rounded = format!("{:.2}", value);
    format!("{}{}", BRL_SYMBOL, localize_separators(&add_thousands_separator(&rounded)))
}

/// Format a raw value as currency. Numbers are formatted; null and
/// non-numeric values are returned unchanged.
pub fn format_brl_value(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_finite() => Value::Text(format_brl(*n)),
        other => other.clone(),
    }
}

/// Format a raw value as `DD/MM/YYYY`. Anything that is not a date, or a
/// string that cannot be parsed as one, becomes `Value::Null`.
pub fn format_date_value(value: &Value) -> Value {
    match value {
        Value::Date(d) => Value::Text(d.format(DISPLAY_DATE_FORMAT).to_string()),
        Value::Text(s) => parse_date(s)
            .map(|d| Value::Text(d.format(DISPLAY_DATE_FORMAT).to_string()))
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Format one column of a record for display.
pub fn format_column(record: &Record, column: Column) -> Value {
    let raw = record.value(column);
    match column.kind() {
        ColumnKind::Date => format_date_value(&raw),
        ColumnKind::Money => format_brl_value(&raw),
        ColumnKind::Text | ColumnKind::Number => raw,
    }
}

/// Display row for a record, in view order.
pub fn format_record(record: &Record) -> Vec<Value> {
    Column::ALL.iter().map(|c| format_column(record, *c)).collect()
}

/// Display rows for a whole table. The input is not modified.
pub fn format_table(table: &Table) -> Vec<Vec<Value>> {
    table.iter().map(format_record).collect()
}

/// Add `,` thousands separators to a plain numeric string such as `-1234.56`.
fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

/// Swap `,` and `.` to go from `1,234.56` to `1.234,56`.
fn localize_separators(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ',' => '.',
            '.' => ',',
            other => other,
        })
        .collect()
}
