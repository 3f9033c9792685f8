//! FILENAME: core/pivot-engine/src/view.rs
//! Report View - The calculated output.
//!
//! Plain data produced by the engine and consumed by the chart builder and
//! the tab commands. Labels are already final strings; totals stay raw numbers.

use crate::definition::{Orientation, ReportDefinition};
use engine::format_brl;
use serde::{Deserialize, Serialize};

/// One (category, summed value) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateGroup {
    pub label: String,
    pub total: f64,
    /// Number of source rows that fell into this group.
    pub row_count: usize,
}

impl AggregateGroup {
    pub fn new(label: impl Into<String>, total: f64) -> Self {
        AggregateGroup {
            label: label.into(),
            total,
            row_count: 0,
        }
    }
}

/// The result of running one `ReportDefinition` over a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub title: String,
    pub orientation: Orientation,
    pub category_label: String,
    pub value_label: String,
    /// Groups in report order, already truncated to the report's limit.
    pub groups: Vec<AggregateGroup>,
    /// Groups cut off by the limit.
    pub omitted_groups: usize,
}

impl ReportView {
    pub fn empty(definition: &ReportDefinition) -> Self {
        ReportView {
            title: definition.title.clone(),
            orientation: definition.orientation,
            category_label: definition.category_label.clone(),
            value_label: definition.value_column.header().to_string(),
            groups: Vec::new(),
            omitted_groups: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum over the groups shown.
    pub fn total(&self) -> f64 {
        self.groups.iter().map(|g| g.total).sum()
    }

    /// `(label, total)` pairs, mostly for assertions and logging.
    pub fn pairs(&self) -> Vec<(String, f64)> {
        self.groups.iter().map(|g| (g.label.clone(), g.total)).collect()
    }
}

/// Gross and net sums of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub gross: f64,
    pub net: f64,
}

impl Totals {
    pub fn gross_display(&self) -> String {
        format_brl(self.gross)
    }

    pub fn net_display(&self) -> String {
        format_brl(self.net)
    }
}
