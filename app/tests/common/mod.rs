//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for Consulta Carteira integration tests.

#![allow(dead_code)]

use app_lib::{AppState, LoadError, Loader, Notice, RowSource};
use chrono::NaiveDate;
use engine::{Column, Record, Table, Value, COLUMN_COUNT};

/// Test harness wrapping a session.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Session with an empty table and no notices.
    pub fn new() -> Self {
        TestHarness {
            state: app_lib::create_app_state(),
        }
    }

    /// Session over the given records.
    pub fn with_records(records: Vec<Record>) -> Self {
        TestHarness {
            state: AppState::with_table(Table::from_records(records), Vec::new()),
        }
    }

    /// Session over the portfolio fixture.
    pub fn with_portfolio() -> Self {
        Self::with_records(PortfolioFixture::records())
    }

    /// Session started through the loader with an in-memory source.
    pub fn from_source(source: MemorySource) -> Self {
        let mut loader = Loader::new(Box::new(source), "VW_CONSULTA_GERAL");
        TestHarness {
            state: AppState::from_loader(&mut loader),
        }
    }

    pub fn table_len(&self) -> usize {
        self.state.table.lock().unwrap().len()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.state.notices.lock().unwrap().clone()
    }

    pub fn last_rendered(&self) -> Option<Table> {
        self.state.last_rendered.lock().unwrap().clone()
    }
}

// ============================================================================
// ROW SOURCES
// ============================================================================

/// In-memory stand-in for the database.
pub struct MemorySource {
    pub rows: Vec<Vec<Value>>,
    pub error: Option<String>,
}

impl MemorySource {
    pub fn rows(rows: Vec<Vec<Value>>) -> Self {
        MemorySource { rows, error: None }
    }

    pub fn failing(message: &str) -> Self {
        MemorySource {
            rows: Vec::new(),
            error: Some(message.to_string()),
        }
    }
}

impl RowSource for MemorySource {
    fn fetch_rows(&mut self, _query: &str) -> Result<Vec<Vec<Value>>, LoadError> {
        match &self.error {
            Some(message) => Err(LoadError::Runtime(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                message.clone(),
            ))),
            None => Ok(self.rows.clone()),
        }
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .unwrap()
}

/// A record with the fields the reports look at.
pub fn record(
    client: &str,
    budget_type: &str,
    owner: &str,
    status: &str,
    gross: f64,
    net: f64,
    official_date: Option<chrono::NaiveDateTime>,
) -> Record {
    Record {
        cliente: Some(client.to_string()),
        tipo_orcamento: Some(budget_type.to_string()),
        responsavel_comercial: Some(owner.to_string()),
        situacao: Some(status.to_string()),
        valor_bruto: Some(gross),
        valor_liquido: Some(net),
        data_oficial_faturamento: official_date,
        ..Default::default()
    }
}

/// Positional view row, as the database returns it.
pub fn raw_row(client: &str, net: f64, official_date: &str) -> Vec<Value> {
    let mut row = vec![Value::Null; COLUMN_COUNT];
    row[Column::Cliente.index()] = Value::Text(client.to_string());
    row[Column::ValorLiquido.index()] = Value::Number(net);
    row[Column::DataOficialFaturamento.index()] = Value::Text(official_date.to_string());
    row
}

/// Small portfolio spread over three months and a year boundary.
pub struct PortfolioFixture;

impl PortfolioFixture {
    pub fn records() -> Vec<Record> {
        vec![
            record("Metalúrgica Alfa", "Reforma", "Ana", "Faturado", 1200.0, 1000.0, Some(date(2025, 11, 3))),
            record("Usinagem Beta", "Peça Nova", "Bruno", "Em Carteira", 600.0, 500.0, Some(date(2025, 12, 10))),
            record("metalúrgica alfa filial", "Reforma", "Ana", "Em Carteira", 300.0, 250.0, Some(date(2026, 1, 15))),
            record("Caldeiraria Gama", "Peça Nova", "Carla", "Faturado", 80.0, 75.5, None),
            Record {
                cliente: None,
                tipo_orcamento: Some("Reforma".to_string()),
                responsavel_comercial: None,
                situacao: Some("Cancelado".to_string()),
                valor_bruto: Some(10.0),
                valor_liquido: Some(10.0),
                data_oficial_faturamento: Some(date(2025, 11, 20)),
                ..Default::default()
            },
        ]
    }
}
