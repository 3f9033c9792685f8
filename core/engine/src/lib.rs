//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the reporting data model.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod date;
pub mod number_format;
pub mod record;
pub mod schema;
pub mod value;

// Re-export commonly used types at the crate root
pub use date::{datetime_to_excel_serial, excel_serial_to_datetime, parse_date, MonthKey};
pub use number_format::{
    format_brl, format_brl_value, format_column, format_date_value, format_record, format_table,
};
pub use record::{Record, SchemaError, Table};
pub use schema::{headers, Column, ColumnKind, COLUMN_COUNT};
pub use value::Value;
