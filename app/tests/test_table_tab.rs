//! FILENAME: tests/test_table_tab.rs
//! Integration tests for the "Faturamento e Tabela" tab.

mod common;

use app_lib::{table_tab, TableTabRequest};
use common::TestHarness;
use engine::{Column, Value};

fn request(client: &str, owners: &[&str], statuses: &[&str]) -> TableTabRequest {
    TableTabRequest {
        client: client.to_string(),
        owners: owners.iter().map(|s| s.to_string()).collect(),
        statuses: statuses.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_no_filters_shows_every_row() {
    let harness = TestHarness::with_portfolio();
    let view = table_tab(&harness.state, TableTabRequest::default());

    assert_eq!(view.row_count, 5);
    assert_eq!(view.rows.len(), 5);
    assert_eq!(view.headers.len(), 28);
    assert_eq!(view.headers[0], "Cliente");
    assert_eq!(view.total_gross, "R$ 2.190,00");
    assert_eq!(view.total_net, "R$ 1.835,50");
}

#[test]
fn test_options_exclude_nulls() {
    let harness = TestHarness::with_portfolio();
    let view = table_tab(&harness.state, TableTabRequest::default());

    assert_eq!(view.owner_options, vec!["Ana", "Bruno", "Carla"]);
    assert_eq!(
        view.status_options,
        vec!["Faturado", "Em Carteira", "Cancelado"]
    );
}

#[test]
fn test_client_filter_is_case_insensitive_substring() {
    let harness = TestHarness::with_portfolio();
    let view = table_tab(&harness.state, request("METALÚRGICA", &[], &[]));

    assert_eq!(view.row_count, 2);
    assert_eq!(view.total_net, "R$ 1.250,00");

    // The row without a client never matches a non-empty client filter
    let view = table_tab(&harness.state, request("a", &[], &[]));
    assert_eq!(view.row_count, 4);
}

#[test]
fn test_client_filter_is_not_a_pattern() {
    let harness = TestHarness::with_portfolio();
    let view = table_tab(&harness.state, request(".*", &[], &[]));
    assert_eq!(view.row_count, 0);
    assert_eq!(view.total_net, "R$ 0,00");
}

#[test]
fn test_predicates_combine() {
    let harness = TestHarness::with_portfolio();
    let view = table_tab(&harness.state, request("", &["Ana", "Bruno"], &["Em Carteira"]));

    assert_eq!(view.row_count, 2);
    assert_eq!(view.total_gross, "R$ 900,00");
    assert_eq!(view.total_net, "R$ 750,00");
}

#[test]
fn test_rows_are_formatted_for_display() {
    let harness = TestHarness::with_portfolio();
    let view = table_tab(&harness.state, request("beta", &[], &[]));

    let row = &view.rows[0];
    assert_eq!(row[Column::ValorLiquido.index()], Value::Text("R$ 500,00".to_string()));
    assert_eq!(
        row[Column::DataOficialFaturamento.index()],
        Value::Text("10/12/2025".to_string())
    );
    assert_eq!(row[Column::DataRecebimento.index()], Value::Null);
}

#[test]
fn test_last_rendered_table_is_kept_unformatted() {
    let harness = TestHarness::with_portfolio();
    assert!(harness.last_rendered().is_none());

    table_tab(&harness.state, request("", &["Carla"], &[]));
    let rendered = harness.last_rendered().unwrap();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered.records[0].valor_liquido, Some(75.5));

    // The session table itself is untouched
    assert_eq!(harness.table_len(), 5);
}

#[test]
fn test_empty_session_renders_empty_tab() {
    let harness = TestHarness::new();
    let view = table_tab(&harness.state, request("x", &["Ana"], &[]));

    assert_eq!(view.row_count, 0);
    assert!(view.owner_options.is_empty());
    assert_eq!(view.total_gross, "R$ 0,00");
    assert_eq!(view.headers.len(), 28);
}

#[test]
fn test_view_serializes_camel_case() {
    let harness = TestHarness::with_portfolio();
    let view = table_tab(&harness.state, TableTabRequest::default());
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["rowCount"], 5);
    assert_eq!(json["totalNet"], "R$ 1.835,50");
    assert!(json["ownerOptions"].is_array());
}
