//! FILENAME: app/src/commands.rs
// PURPOSE: Command handlers behind the two tabs.
// CONTEXT: Every command reads the table loaded at startup. None of them
// mutates it; a reload replaces it wholesale.

use crate::api_types::{
    ChartGrid, ChartsTabRequest, ChartsTabView, ExportFile, TableTabRequest, TableTabView,
};
use crate::loader::Loader;
use crate::{lock, log_debug, log_enter, log_exit, log_info, AppState};
use chrono::NaiveDate;
use engine::{format_table, headers, Column};
use persistence::{write_table_xlsx, EXPORT_FILE_NAME, XLSX_MIME};
use pivot_engine::{
    aggregate, default_month_selection, drop_missing_dates, filter, filter_months, month_options,
    option_values, totals, BarChart, ReportDefinition,
};

/// Date column behind the month filter and the month chart.
const MONTH_COLUMN: Column = Column::DataOficialFaturamento;

// ============================================================================
// TABLE TAB
// ============================================================================

/// Filter the table and build the "Faturamento e Tabela" tab.
pub fn table_tab(state: &AppState, request: TableTabRequest) -> TableTabView {
    log_enter!("CMD", "table_tab", "{:?}", request);
    let table = lock(&state.table);

    let owner_options = option_values(&table, Column::ResponsavelComercial);
    let status_options = option_values(&table, Column::Situacao);

    let filtered = filter(&table, &request.criteria());
    drop(table);

    let sums = totals(&filtered);
    let view = TableTabView {
        notices: lock(&state.notices).clone(),
        owner_options,
        status_options,
        row_count: filtered.len(),
        total_gross: sums.gross_display(),
        total_net: sums.net_display(),
        headers: headers().into_iter().map(str::to_string).collect(),
        rows: format_table(&filtered),
    };

    *lock(&state.last_rendered) = Some(filtered);
    log_exit!("CMD", "table_tab", "rows={}", view.row_count);
    view
}

/// The filtered table as an `.xlsx` download, raw values unformatted.
pub fn export_table(state: &AppState, request: TableTabRequest) -> Result<ExportFile, String> {
    log_enter!("CMD", "export_table");
    let filtered = filter(&lock(&state.table), &request.criteria());

    let bytes = write_table_xlsx(&filtered).map_err(|e| format!("Erro ao exportar: {}", e))?;
    log_info!("CMD", "export_table rows={} bytes={}", filtered.len(), bytes.len());

    Ok(ExportFile {
        file_name: EXPORT_FILE_NAME.to_string(),
        mime: XLSX_MIME.to_string(),
        size: bytes.len(),
        bytes,
    })
}

// ============================================================================
// CHARTS TAB
// ============================================================================

/// Build the "Gráfico por Responsável" tab as of `today`.
pub fn charts_tab(state: &AppState, request: ChartsTabRequest, today: NaiveDate) -> ChartsTabView {
    log_enter!("CMD", "charts_tab", "{:?} today={}", request, today);
    let dated = drop_missing_dates(&lock(&state.table), MONTH_COLUMN);

    let options = month_options(&dated, MONTH_COLUMN);
    let selected = match request.months.clone() {
        Some(months) => months,
        None => default_month_selection(&options, today),
    };
    log_debug!("CMD", "months options={:?} selected={:?}", options, selected);

    let owner_options = option_values(&dated, Column::ResponsavelComercial);
    let status_options = option_values(&dated, Column::Situacao);

    let filtered = filter_months(&filter(&dated, &request.filters.criteria()), MONTH_COLUMN, &selected);

    let chart = |definition: ReportDefinition| BarChart::from_report(&aggregate(&filtered, &definition));
    let charts = ChartGrid {
        left: [
            chart(ReportDefinition::by_budget_type()),
            chart(ReportDefinition::by_client()),
        ],
        right: [
            chart(ReportDefinition::by_status()),
            chart(ReportDefinition::by_month()),
        ],
    };

    log_exit!("CMD", "charts_tab", "rows={}", filtered.len());
    ChartsTabView {
        notices: lock(&state.notices).clone(),
        month_options: options,
        selected_months: selected,
        owner_options,
        status_options,
        row_count: filtered.len(),
        charts,
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Load the view again and replace the session table and notices.
pub fn reload(state: &AppState, loader: &mut Loader) -> usize {
    let mut notices = Vec::new();
    let table = loader.load(&mut notices);
    let rows = table.len();

    *lock(&state.table) = table;
    *lock(&state.notices) = notices;
    *lock(&state.last_rendered) = None;

    log_info!("CMD", "reload rows={}", rows);
    rows
}
