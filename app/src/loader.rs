//! FILENAME: app/src/loader.rs
// PURPOSE: Fetch the reporting view and bind it to the typed table.
// CONTEXT: A load never fails the caller. Any source or schema error becomes a
// user-visible notice plus an empty table, and every later stage copes with
// an empty table.

use crate::config::{ConfigError, DatabaseConfig};
use crate::{log_debug, log_enter_info, log_error, log_exit_info, log_info};
use engine::{SchemaError, Table, Value};
use persistence::PersistenceError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// NOTICES & ERRORS
// ============================================================================

/// Message shown to the user above the tabs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "camelCase")]
pub enum Notice {
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Error(m) => m,
        }
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("snapshot error: {0}")]
    Workbook(#[from] PersistenceError),

    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("unsupported value in column {column} ({type_name})")]
    Decode { column: usize, type_name: String },
}

// ============================================================================
// ROW SOURCES
// ============================================================================

/// Anything that can answer the view query with positional rows.
pub trait RowSource {
    fn fetch_rows(&mut self, query: &str) -> Result<Vec<Vec<Value>>, LoadError>;

    /// Short description for log lines.
    fn describe(&self) -> String;
}

/// The view query. The name is validated as an identifier by the config.
pub fn query_for(view: &str) -> String {
    format!("SELECT * FROM {}", view)
}

/// Reads the view from MySQL over a single connection.
pub struct MySqlSource {
    config: DatabaseConfig,
}

impl MySqlSource {
    pub fn new(config: DatabaseConfig) -> Self {
        MySqlSource { config }
    }
}

impl RowSource for MySqlSource {
    fn fetch_rows(&mut self, query: &str) -> Result<Vec<Vec<Value>>, LoadError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .enable_time()
            .build()?;
        runtime.block_on(mysql::fetch_all(&self.config, query))
    }

    fn describe(&self) -> String {
        format!(
            "mysql://{}@{}:{}/{}",
            self.config.user, self.config.host, self.config.port, self.config.database
        )
    }
}

mod mysql {
    use super::LoadError;
    use crate::config::DatabaseConfig;
    use crate::log_debug;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use engine::Value;
    use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
    use sqlx::{Column as _, Connection, Row, TypeInfo, ValueRef};

    pub(super) async fn fetch_all(
        config: &DatabaseConfig,
        query: &str,
    ) -> Result<Vec<Vec<Value>>, LoadError> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let mut conn = MySqlConnection::connect_with(&options).await?;
        let fetched = sqlx::query(query).fetch_all(&mut conn).await;
        // Close before inspecting the result so the connection never outlives the call
        conn.close().await?;

        fetched?.iter().map(decode_row).collect()
    }

    fn decode_row(row: &MySqlRow) -> Result<Vec<Value>, LoadError> {
        (0..row.len()).map(|i| decode_cell(row, i)).collect()
    }

    fn decode_cell(row: &MySqlRow, i: usize) -> Result<Value, LoadError> {
        if row.try_get_raw(i)?.is_null() {
            return Ok(Value::Null);
        }

        let value = match classify(row.columns()[i].type_info().name()) {
            CellKind::Date => date_or_null(
                row.try_get_unchecked::<NaiveDate, _>(i)
                    .map(|d| d.and_time(NaiveTime::MIN)),
                i,
            ),
            CellKind::DateTime => date_or_null(row.try_get_unchecked::<NaiveDateTime, _>(i), i),
            CellKind::Time => Value::Text(row.try_get_unchecked::<NaiveTime, _>(i)?.to_string()),
            CellKind::Float => Value::Number(row.try_get_unchecked::<f32, _>(i)? as f64),
            CellKind::Double => Value::Number(row.try_get_unchecked::<f64, _>(i)?),
            CellKind::Decimal => decimal_value(&row.try_get_unchecked::<String, _>(i)?, i)?,
            CellKind::Signed => Value::Number(row.try_get_unchecked::<i64, _>(i)? as f64),
            CellKind::Unsigned => Value::Number(row.try_get_unchecked::<u64, _>(i)? as f64),
            CellKind::Bytes => bytes_value(&row.try_get_unchecked::<Vec<u8>, _>(i)?),
            CellKind::Text => Value::Text(row.try_get_unchecked::<String, _>(i)?),
        };
        Ok(value)
    }

    /// How a column of a given MySQL type is read.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(super) enum CellKind {
        Date,
        DateTime,
        Time,
        Float,
        Double,
        Decimal,
        Signed,
        Unsigned,
        Bytes,
        Text,
    }

    pub(super) fn classify(type_name: &str) -> CellKind {
        let name = type_name.to_ascii_uppercase();
        match name.as_str() {
            "DATE" => CellKind::Date,
            "DATETIME" | "TIMESTAMP" => CellKind::DateTime,
            "TIME" => CellKind::Time,
            "FLOAT" => CellKind::Float,
            "DOUBLE" => CellKind::Double,
            "DECIMAL" => CellKind::Decimal,
            n if n.contains("INT") || n == "BOOLEAN" || n == "YEAR" => {
                if n.contains("UNSIGNED") {
                    CellKind::Unsigned
                } else {
                    CellKind::Signed
                }
            }
            n if n.contains("BLOB") || n.contains("BINARY") => CellKind::Bytes,
            _ => CellKind::Text,
        }
    }

    /// Zero dates (`0000-00-00`, `2025-00-00`) fail to decode; like any other
    /// malformed date they become a missing date, never a failed load.
    pub(super) fn date_or_null(decoded: Result<NaiveDateTime, sqlx::Error>, column: usize) -> Value {
        match decoded {
            Ok(date) => Value::Date(date),
            Err(e) => {
                log_debug!("LOAD", "column {} date read as null: {}", column, e);
                Value::Null
            }
        }
    }

    pub(super) fn decimal_value(text: &str, column: usize) -> Result<Value, LoadError> {
        match text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Value::Number(n)),
            _ => Err(LoadError::Decode {
                column,
                type_name: "DECIMAL".to_string(),
            }),
        }
    }

    pub(super) fn bytes_value(bytes: &[u8]) -> Value {
        Value::Text(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Reads an exported `.xlsx` snapshot instead of the database.
pub struct WorkbookSource {
    path: PathBuf,
}

impl WorkbookSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        WorkbookSource { path: path.into() }
    }
}

impl RowSource for WorkbookSource {
    fn fetch_rows(&mut self, _query: &str) -> Result<Vec<Vec<Value>>, LoadError> {
        Ok(persistence::read_table_xlsx(&self.path)?)
    }

    fn describe(&self) -> String {
        format!("snapshot {}", self.path.display())
    }
}

// ============================================================================
// LOADER
// ============================================================================

/// Runs the fixed view query against one source.
pub struct Loader {
    source: Box<dyn RowSource + Send>,
    view: String,
}

impl Loader {
    pub fn new(source: Box<dyn RowSource + Send>, view: impl Into<String>) -> Self {
        Loader {
            source,
            view: view.into(),
        }
    }

    /// Fetch and bind all rows. Any bad row fails the whole load.
    pub fn try_load(&mut self) -> Result<Table, LoadError> {
        let query = query_for(&self.view);
        log_debug!("LOAD", "{} via {}", query, self.source.describe());
        let rows = self.source.fetch_rows(&query)?;
        Ok(Table::from_rows(&rows)?)
    }

    /// Like `try_load`, but failures become a notice and an empty table.
    pub fn load(&mut self, notices: &mut Vec<Notice>) -> Table {
        log_enter_info!("LOAD", "load", "view={}", self.view);
        match self.try_load() {
            Ok(table) => {
                log_exit_info!("LOAD", "load", "rows={}", table.len());
                table
            }
            Err(e) => {
                let message = format!("Erro ao obter dados: {}", e);
                log_error!("LOAD", "{}", message);
                notices.push(Notice::Error(message));
                log_info!("LOAD", "continuing with an empty table");
                Table::new()
            }
        }
    }
}
