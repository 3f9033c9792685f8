//! FILENAME: core/pivot-engine/src/definition.rs
//! Report Definition - The serializable configuration.
//!
//! This module contains all the types needed to DESCRIBE a filtered report:
//! - `FilterCriteria`: the user's current widget selection, replayed into the
//!   pipeline on every interaction
//! - `ReportDefinition`: what one chart groups by, sums, and how it orders
//!
//! Sort policy is per report: three standard reports order by value, the
//! month report orders by key.

use engine::Column;
use serde::{Deserialize, Serialize};

/// Maximum number of clients shown by the client report.
pub const TOP_CLIENTS: usize = 20;

// ============================================================================
// FILTER CRITERIA
// ============================================================================

/// The three row predicates of both tabs, AND-combined.
/// An empty predicate matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Case-insensitive substring of the client name.
    #[serde(default)]
    pub client: String,
    /// Accepted commercial owners.
    #[serde(default)]
    pub owners: Vec<String>,
    /// Accepted statuses ("Situação").
    #[serde(default)]
    pub statuses: Vec<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = client.into();
        self
    }

    pub fn with_owners<I, S>(mut self, owners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.owners = owners.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statuses = statuses.into_iter().map(Into::into).collect();
        self
    }

    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.client.is_empty() && self.owners.is_empty() && self.statuses.is_empty()
    }
}

// ============================================================================
// REPORT DEFINITION
// ============================================================================

/// What the rows of a report are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupBy {
    /// Raw text value of a categorical column.
    Column(Column),
    /// Calendar month of a date column. Rows without a valid date are dropped.
    Month(Column),
}

impl GroupBy {
    pub fn column(&self) -> Column {
        match self {
            GroupBy::Column(c) | GroupBy::Month(c) => *c,
        }
    }
}

/// How the groups of a report are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortPolicy {
    /// Largest sum first. Equal sums keep first-seen order.
    ValueDescending,
    /// Ascending group key (chronological for months).
    KeyAscending,
}

/// Bar direction of the chart drawn for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Complete configuration of one aggregate report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDefinition {
    pub title: String,
    pub group_by: GroupBy,
    /// Numeric column summed per group.
    pub value_column: Column,
    pub sort: SortPolicy,
    /// Keep only the first N groups after sorting.
    pub limit: Option<usize>,
    pub orientation: Orientation,
    /// Axis title for the category axis (defaults to the column header).
    pub category_label: String,
}

impl ReportDefinition {
    /// A value-descending report over a categorical column, summing net value.
    pub fn new(title: impl Into<String>, group_by: GroupBy) -> Self {
        ReportDefinition {
            title: title.into(),
            group_by,
            value_column: Column::ValorLiquido,
            sort: SortPolicy::ValueDescending,
            limit: None,
            orientation: Orientation::Horizontal,
            category_label: group_by.column().header().to_string(),
        }
    }

    pub fn by_budget_type() -> Self {
        Self::new(
            "Valor Líquido por Tipo de Orçamento",
            GroupBy::Column(Column::TipoOrcamento),
        )
    }

    pub fn by_status() -> Self {
        Self::new("Valor Líquido por Situação", GroupBy::Column(Column::Situacao))
    }

    pub fn by_client() -> Self {
        ReportDefinition {
            limit: Some(TOP_CLIENTS),
            ..Self::new(
                "Valor Líquido por Cliente (Top 20)",
                GroupBy::Column(Column::Cliente),
            )
        }
    }

    pub fn by_month() -> Self {
        ReportDefinition {
            sort: SortPolicy::KeyAscending,
            orientation: Orientation::Vertical,
            category_label: "Mês/Ano".to_string(),
            ..Self::new(
                "Valor Líquido por Mês/Ano (Data Oficial Faturamento)",
                GroupBy::Month(Column::DataOficialFaturamento),
            )
        }
    }
}
