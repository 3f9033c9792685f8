//! FILENAME: tests/test_loader.rs
//! Integration tests for starting a session through the loader.

mod common;

use app_lib::{charts_tab, table_tab, ChartsTabRequest, Notice, TableTabRequest};
use chrono::NaiveDate;
use common::{raw_row, MemorySource, TestHarness};
use engine::{Column, Value};

#[test]
fn test_session_from_rows() {
    let harness = TestHarness::from_source(MemorySource::rows(vec![
        raw_row("Alfa", 10.0, "2025-12-01"),
        raw_row("Beta", 20.0, "2025-12-15 08:30:00"),
    ]));

    assert_eq!(harness.table_len(), 2);
    assert!(harness.notices().is_empty());

    let view = table_tab(&harness.state, TableTabRequest::default());
    assert_eq!(view.total_net, "R$ 30,00");
}

#[test]
fn test_unparseable_dates_become_null() {
    let harness = TestHarness::from_source(MemorySource::rows(vec![
        raw_row("Alfa", 10.0, "2025-12-01"),
        raw_row("Beta", 20.0, "0000-00-00"),
        raw_row("Gama", 5.0, "não informado"),
    ]));
    assert_eq!(harness.table_len(), 3);

    let view = table_tab(&harness.state, TableTabRequest::default());
    assert_eq!(view.rows[1][Column::DataOficialFaturamento.index()], Value::Null);

    let today = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
    let charts = charts_tab(&harness.state, ChartsTabRequest::default(), today);
    assert_eq!(charts.month_options, vec!["12/2025"]);
    assert_eq!(charts.row_count, 1);
}

#[test]
fn test_failed_source_starts_empty_session() {
    let harness = TestHarness::from_source(MemorySource::failing("connection refused"));

    assert_eq!(harness.table_len(), 0);
    assert_eq!(
        harness.notices(),
        vec![Notice::Error(
            "Erro ao obter dados: runtime error: connection refused".to_string()
        )]
    );

    // Both tabs still render, and carry the notice
    let table = table_tab(&harness.state, TableTabRequest::default());
    assert_eq!(table.row_count, 0);
    assert_eq!(table.notices.len(), 1);

    let today = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
    let charts = charts_tab(&harness.state, ChartsTabRequest::default(), today);
    assert!(charts.by_status().is_empty());
    assert_eq!(charts.notices.len(), 1);
}

#[test]
fn test_schema_mismatch_fails_whole_load() {
    let mut wrong_kind = raw_row("Beta", 20.0, "2025-12-01");
    wrong_kind[Column::ValorLiquido.index()] = Value::Text("vinte".to_string());

    let harness = TestHarness::from_source(MemorySource::rows(vec![
        raw_row("Alfa", 10.0, "2025-12-01"),
        wrong_kind,
    ]));

    assert_eq!(harness.table_len(), 0);
    let notices = harness.notices();
    assert_eq!(notices.len(), 1);
    assert!(matches!(notices[0], Notice::Error(_)));
    assert!(notices[0].message().contains("Schema mismatch"));
}
