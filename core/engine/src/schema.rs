//! FILENAME: core/engine/src/schema.rs
//! PURPOSE: The fixed, positional column schema of the reporting view.
//! CONTEXT: `SELECT *` binds by position, so the order of `Column::ALL` must
//! match the view exactly. Drift in the view is caught by `Record::from_values`.

use serde::{Deserialize, Serialize};

/// Number of columns returned by the reporting view.
pub const COLUMN_COUNT: usize = 28;

/// What kind of data a column carries. Drives positional type checks,
/// display formatting, and spreadsheet cell types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Text,
    Number,
    Money,
    Date,
}

/// One column of the reporting view, in query order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Cliente,
    TipoOrcamento,
    Peca,
    Rastreabilidade,
    Quantidade,
    DataRecebimento,
    DataInicioOs,
    DataFimOs,
    ValorBruto,
    ValorLiquido,
    ResponsavelComercial,
    StatusOs,
    NumeroNf,
    CodigoOs,
    Orcamento,
    DataOrcamento,
    Representante,
    OcCliente,
    Situacao,
    Setor,
    TipoFaturamento,
    DataSolicitacao,
    DataCarteira,
    NfFaturamento,
    DataFaturamento,
    NfDevolucao,
    DataDevolucao,
    DataOficialFaturamento,
}

impl Column {
    /// All columns in view order.
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::Cliente,
        Column::TipoOrcamento,
        Column::Peca,
        Column::Rastreabilidade,
        Column::Quantidade,
        Column::DataRecebimento,
        Column::DataInicioOs,
        Column::DataFimOs,
        Column::ValorBruto,
        Column::ValorLiquido,
        Column::ResponsavelComercial,
        Column::StatusOs,
        Column::NumeroNf,
        Column::CodigoOs,
        Column::Orcamento,
        Column::DataOrcamento,
        Column::Representante,
        Column::OcCliente,
        Column::Situacao,
        Column::Setor,
        Column::TipoFaturamento,
        Column::DataSolicitacao,
        Column::DataCarteira,
        Column::NfFaturamento,
        Column::DataFaturamento,
        Column::NfDevolucao,
        Column::DataDevolucao,
        Column::DataOficialFaturamento,
    ];

    /// The nine date columns, formatted as DD/MM/YYYY for display.
    pub const DATES: [Column; 9] = [
        Column::DataRecebimento,
        Column::DataInicioOs,
        Column::DataFimOs,
        Column::DataOrcamento,
        Column::DataSolicitacao,
        Column::DataCarteira,
        Column::DataFaturamento,
        Column::DataDevolucao,
        Column::DataOficialFaturamento,
    ];

    /// Gross and net value, formatted as BRL currency for display.
    pub const MONEY: [Column; 2] = [Column::ValorBruto, Column::ValorLiquido];

    /// 0-based position in the query result.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Column> {
        Column::ALL.get(index).copied()
    }

    /// Header shown in the table and written to the spreadsheet.
    pub fn header(self) -> &'static str {
        match self {
            Column::Cliente => "Cliente",
            Column::TipoOrcamento => "Tipo Orçamento",
            Column::Peca => "Peça",
            Column::Rastreabilidade => "Rastreabilidade",
            Column::Quantidade => "Quantidade",
            Column::DataRecebimento => "Data Recebimento",
            Column::DataInicioOs => "Data Inicio OS",
            Column::DataFimOs => "Data Fim OS",
            Column::ValorBruto => "Valor Bruto",
            Column::ValorLiquido => "Valor Líquido",
            Column::ResponsavelComercial => "Responsável Comercial",
            Column::StatusOs => "Status OS",
            Column::NumeroNf => "Numero NF",
            Column::CodigoOs => "Codigo OS",
            Column::Orcamento => "Orçamento",
            Column::DataOrcamento => "Data Orçamento",
            Column::Representante => "Representante",
            Column::OcCliente => "OC Cliente",
            Column::Situacao => "Situação",
            Column::Setor => "Setor",
            Column::TipoFaturamento => "Tipo Faturamento",
            Column::DataSolicitacao => "Data Solicitação",
            Column::DataCarteira => "Data Carteira",
            Column::NfFaturamento => "NF Faturamento",
            Column::DataFaturamento => "Data Faturamento",
            Column::NfDevolucao => "NF Devolução",
            Column::DataDevolucao => "Data Devolução",
            Column::DataOficialFaturamento => "Data Oficial Faturamento",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Quantidade => ColumnKind::Number,
            Column::ValorBruto | Column::ValorLiquido => ColumnKind::Money,
            c if Column::DATES.contains(&c) => ColumnKind::Date,
            _ => ColumnKind::Text,
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

/// All headers in view order.
pub fn headers() -> Vec<&'static str> {
    Column::ALL.iter().map(|c| c.header()).collect()
}
