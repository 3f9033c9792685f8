//! FILENAME: core/pivot-engine/src/chart.rs
//! Bar Chart Descriptors - What the UI draws for a report.
//!
//! A descriptor is declarative: bars, labels and axis settings. Drawing is
//! left to the charting library on the other side of the bridge, which
//! receives the descriptor as camelCase JSON.

use crate::definition::Orientation;
use crate::view::ReportView;
use engine::format_brl;
use serde::{Deserialize, Serialize};

/// Default chart height in pixels.
pub const CHART_HEIGHT: u32 = 400;

/// Where bar labels are drawn relative to the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextPosition {
    Outside,
}

/// A single bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub category: String,
    pub value: f64,
    /// Formatted currency label drawn next to the bar.
    pub text: String,
}

/// Renderable bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub title: String,
    pub orientation: Orientation,
    pub category_axis_title: String,
    pub value_axis_title: String,
    pub height: u32,
    pub text_position: TextPosition,
    /// Draw the category axis from the last item to the first. Set for
    /// horizontal charts so the first (largest) bar ends up on top.
    pub category_axis_reversed: bool,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn from_report(view: &ReportView) -> Self {
        let bars = view
            .groups
            .iter()
            .map(|group| Bar {
                category: group.label.clone(),
                value: group.total,
                text: format_brl(group.total),
            })
            .collect();

        BarChart {
            title: view.title.clone(),
            orientation: view.orientation,
            category_axis_title: view.category_label.clone(),
            value_axis_title: view.value_label.clone(),
            height: CHART_HEIGHT,
            text_position: TextPosition::Outside,
            category_axis_reversed: view.orientation == Orientation::Horizontal,
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
