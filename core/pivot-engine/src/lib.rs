//! FILENAME: core/pivot-engine/src/lib.rs
//! Reporting pipeline for Consulta Carteira.
//!
//! This crate filters the loaded view and computes the grouped sums behind the
//! charts. It depends on `engine` only for shared types (Record, Table, Column).
//!
//! Layers:
//! - `definition`: Serializable configuration (what the report IS)
//! - `engine`: Filtering and aggregation (HOW we calculate)
//! - `view`: Calculated output (WHAT we computed)
//! - `chart`: Bar descriptors for the frontend (WHAT we display)

pub mod chart;
pub mod definition;
pub mod engine;
pub mod view;

pub use chart::*;
pub use definition::*;
pub use view::*;
pub use crate::engine::{
    aggregate, aggregate_by, default_month_selection, drop_missing_dates, filter,
    filter_months, matches, month_options, option_values, totals, EMPTY_GROUP_LABEL,
};
