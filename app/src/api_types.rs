//! FILENAME: app/src/api_types.rs
// PURPOSE: Request and response types of the tab commands.
// CONTEXT: Serialized as camelCase JSON for the UI and the CLI output.

use crate::loader::Notice;
use engine::Value;
use pivot_engine::{BarChart, FilterCriteria};
use serde::{Deserialize, Serialize};

/// Widget state of the "Faturamento e Tabela" tab. The charts tab carries
/// the same three filters plus the month selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableTabRequest {
    pub client: String,
    pub owners: Vec<String>,
    pub statuses: Vec<String>,
}

impl TableTabRequest {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with_client(self.client.clone())
            .with_owners(self.owners.iter().cloned())
            .with_statuses(self.statuses.iter().cloned())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableTabView {
    pub notices: Vec<Notice>,
    pub owner_options: Vec<String>,
    pub status_options: Vec<String>,
    pub row_count: usize,
    /// "Total Valor Bruto" metric, already formatted.
    pub total_gross: String,
    /// "Total Valor Líquido" metric, already formatted.
    pub total_net: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Widget state of the "Gráfico por Responsável" tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartsTabRequest {
    #[serde(flatten)]
    pub filters: TableTabRequest,
    /// `None` until the user touches the month widget; the default
    /// selection applies then.
    pub months: Option<Vec<String>>,
}

/// The four charts laid out two per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartGrid {
    /// Budget type on top, client below.
    pub left: [BarChart; 2],
    /// Status on top, month below.
    pub right: [BarChart; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartsTabView {
    pub notices: Vec<Notice>,
    pub month_options: Vec<String>,
    pub selected_months: Vec<String>,
    pub owner_options: Vec<String>,
    pub status_options: Vec<String>,
    pub row_count: usize,
    pub charts: ChartGrid,
}

impl ChartsTabView {
    pub fn by_budget_type(&self) -> &BarChart {
        &self.charts.left[0]
    }

    pub fn by_client(&self) -> &BarChart {
        &self.charts.left[1]
    }

    pub fn by_status(&self) -> &BarChart {
        &self.charts.right[0]
    }

    pub fn by_month(&self) -> &BarChart {
        &self.charts.right[1]
    }
}

/// A download offered to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub file_name: String,
    pub mime: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub size: usize,
}
