//! FILENAME: core/engine/src/record.rs
//! PURPOSE: The typed row of the reporting view and the table that holds them.
//! CONTEXT: `Record::from_values` is the only place where a positional source
//! row is bound to named fields. Everything downstream uses the typed fields
//! or `Record::value(Column)`.

use crate::date::parse_date;
use crate::schema::{Column, ColumnKind, COLUMN_COUNT};
use crate::value::{general_number, Value};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ============================================================================
// SCHEMA ERROR
// ============================================================================

/// Raised when a source row does not fit the view schema.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// The row has the wrong number of columns.
    ColumnCount { expected: usize, found: usize },
    /// A value cannot live in the column at this position.
    Kind { column: Column, found: String },
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::ColumnCount { expected, found } => write!(
                f,
                "Schema mismatch: expected {} columns, found {}",
                expected, found
            ),
            SchemaError::Kind { column, found } => write!(
                f,
                "Schema mismatch at column {} ({}): unexpected value {}",
                column.index(),
                column.header(),
                found
            ),
        }
    }
}

impl std::error::Error for SchemaError {}

// ============================================================================
// RECORD
// ============================================================================

/// One order/invoice row of the reporting view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    pub cliente: Option<String>,
    pub tipo_orcamento: Option<String>,
    pub peca: Option<String>,
    pub rastreabilidade: Option<String>,
    pub quantidade: Option<f64>,
    pub data_recebimento: Option<NaiveDateTime>,
    pub data_inicio_os: Option<NaiveDateTime>,
    pub data_fim_os: Option<NaiveDateTime>,
    pub valor_bruto: Option<f64>,
    pub valor_liquido: Option<f64>,
    pub responsavel_comercial: Option<String>,
    pub status_os: Option<String>,
    pub numero_nf: Option<String>,
    pub codigo_os: Option<String>,
    pub orcamento: Option<String>,
    pub data_orcamento: Option<NaiveDateTime>,
    pub representante: Option<String>,
    pub oc_cliente: Option<String>,
    pub situacao: Option<String>,
    pub setor: Option<String>,
    pub tipo_faturamento: Option<String>,
    pub data_solicitacao: Option<NaiveDateTime>,
    pub data_carteira: Option<NaiveDateTime>,
    pub nf_faturamento: Option<String>,
    pub data_faturamento: Option<NaiveDateTime>,
    pub nf_devolucao: Option<String>,
    pub data_devolucao: Option<NaiveDateTime>,
    pub data_oficial_faturamento: Option<NaiveDateTime>,
}

impl Record {
    /// Bind a positional source row to the schema.
    pub fn from_values(values: &[Value]) -> Result<Record, SchemaError> {
        if values.len() != COLUMN_COUNT {
            return Err(SchemaError::ColumnCount {
                expected: COLUMN_COUNT,
                found: values.len(),
            });
        }

        let text = |c: Column| to_text(c, &values[c.index()]);
        let number = |c: Column| to_number(c, &values[c.index()]);
        let date = |c: Column| to_date(c, &values[c.index()]);

        Ok(Record {
            cliente: text(Column::Cliente)?,
            tipo_orcamento: text(Column::TipoOrcamento)?,
            peca: text(Column::Peca)?,
            rastreabilidade: text(Column::Rastreabilidade)?,
            quantidade: number(Column::Quantidade)?,
            data_recebimento: date(Column::DataRecebimento)?,
            data_inicio_os: date(Column::DataInicioOs)?,
            data_fim_os: date(Column::DataFimOs)?,
            valor_bruto: number(Column::ValorBruto)?,
            valor_liquido: number(Column::ValorLiquido)?,
            responsavel_comercial: text(Column::ResponsavelComercial)?,
            status_os: text(Column::StatusOs)?,
            numero_nf: text(Column::NumeroNf)?,
            codigo_os: text(Column::CodigoOs)?,
            orcamento: text(Column::Orcamento)?,
            data_orcamento: date(Column::DataOrcamento)?,
            representante: text(Column::Representante)?,
            oc_cliente: text(Column::OcCliente)?,
            situacao: text(Column::Situacao)?,
            setor: text(Column::Setor)?,
            tipo_faturamento: text(Column::TipoFaturamento)?,
            data_solicitacao: date(Column::DataSolicitacao)?,
            data_carteira: date(Column::DataCarteira)?,
            nf_faturamento: text(Column::NfFaturamento)?,
            data_faturamento: date(Column::DataFaturamento)?,
            nf_devolucao: text(Column::NfDevolucao)?,
            data_devolucao: date(Column::DataDevolucao)?,
            data_oficial_faturamento: date(Column::DataOficialFaturamento)?,
        })
    }

    /// Text field of a text column. `None` for non-text columns.
    pub fn text(&self, column: Column) -> Option<&str> {
        let field = match column {
            Column::Cliente => &self.cliente,
            Column::TipoOrcamento => &self.tipo_orcamento,
            Column::Peca => &self.peca,
            Column::Rastreabilidade => &self.rastreabilidade,
            Column::ResponsavelComercial => &self.responsavel_comercial,
            Column::StatusOs => &self.status_os,
            Column::NumeroNf => &self.numero_nf,
            Column::CodigoOs => &self.codigo_os,
            Column::Orcamento => &self.orcamento,
            Column::Representante => &self.representante,
            Column::OcCliente => &self.oc_cliente,
            Column::Situacao => &self.situacao,
            Column::Setor => &self.setor,
            Column::TipoFaturamento => &self.tipo_faturamento,
            Column::NfFaturamento => &self.nf_faturamento,
            Column::NfDevolucao => &self.nf_devolucao,
            _ => return None,
        };
        field.as_deref()
    }

    /// Numeric field of a number or money column.
    pub fn number(&self, column: Column) -> Option<f64> {
        match column {
            Column::Quantidade => self.quantidade,
            Column::ValorBruto => self.valor_bruto,
            Column::ValorLiquido => self.valor_liquido,
            _ => None,
        }
    }

    /// Date field of a date column.
    pub fn date(&self, column: Column) -> Option<NaiveDateTime> {
        match column {
            Column::DataRecebimento => self.data_recebimento,
            Column::DataInicioOs => self.data_inicio_os,
            Column::DataFimOs => self.data_fim_os,
            Column::DataOrcamento => self.data_orcamento,
            Column::DataSolicitacao => self.data_solicitacao,
            Column::DataCarteira => self.data_carteira,
            Column::DataFaturamento => self.data_faturamento,
            Column::DataDevolucao => self.data_devolucao,
            Column::DataOficialFaturamento => self.data_oficial_faturamento,
            _ => None,
        }
    }

    /// Raw value of any column.
    pub fn value(&self, column: Column) -> Value {
        match column.kind() {
            ColumnKind::Text => Value::from(self.text(column).map(str::to_string)),
            ColumnKind::Number | ColumnKind::Money => Value::from(self.number(column)),
            ColumnKind::Date => Value::from(self.date(column)),
        }
    }

    /// The whole row in view order.
    pub fn values(&self) -> Vec<Value> {
        Column::ALL.iter().map(|c| self.value(*c)).collect()
    }
}

fn mismatch(column: Column, value: &Value) -> SchemaError {
    SchemaError::Kind {
        column,
        found: format!("{:?}", value),
    }
}

fn to_text(column: Column, value: &Value) -> Result<Option<String>, SchemaError> {
    match value {
        Value::Null => Ok(None),
        Value::Text(s) => Ok(Some(s.clone())),
        // Identifier columns (NF numbers, OS codes) may arrive as integers
        Value::Number(n) => Ok(Some(general_number(*n))),
        Value::Date(_) => Err(mismatch(column, value)),
    }
}

fn to_number(column: Column, value: &Value) -> Result<Option<f64>, SchemaError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) if n.is_finite() => Ok(Some(*n)),
        Value::Text(s) if s.trim().is_empty() => Ok(None),
        // "NaN" and "inf" parse as f64 but are not amounts
        Value::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(mismatch(column, value)),
        },
        Value::Number(_) => Err(mismatch(column, value)),
        Value::Date(_) => Err(mismatch(column, value)),
    }
}

fn to_date(column: Column, value: &Value) -> Result<Option<NaiveDateTime>, SchemaError> {
    match value {
        Value::Null => Ok(None),
        Value::Date(d) => Ok(Some(*d)),
        // Malformed dates are coerced to missing, not rejected
        Value::Text(s) => Ok(parse_date(s)),
        Value::Number(_) => Err(mismatch(column, value)),
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// An ordered set of records sharing the fixed view schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub records: Vec<Record>,
}

impl Table {
    pub fn new() -> Self {
        Table { records: Vec::new() }
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Table { records }
    }

    /// Bind every source row; the first bad row fails the whole table.
    pub fn from_rows(rows: &[Vec<Value>]) -> Result<Table, SchemaError> {
        let records = rows
            .iter()
            .map(|row| Record::from_values(row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Table { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Sum of a numeric column; nulls contribute nothing.
    pub fn sum(&self, column: Column) -> f64 {
        self.records.iter().filter_map(|r| r.number(column)).sum()
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Table {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
