//! FILENAME: core/persistence/src/lib.rs
//! Consulta Carteira Persistence Module
//!
//! Encodes filtered tables as `.xlsx` downloads and reads exported snapshots
//! back as raw view rows.

mod error;
mod xlsx_reader;
mod xlsx_writer;

pub use error::PersistenceError;
pub use xlsx_reader::{read_table_xlsx, read_table_xlsx_bytes};
pub use xlsx_writer::{column_widths, save_table_xlsx, write_table_xlsx};

// ============================================================================
// EXPORT CONSTANTS
// ============================================================================

/// Name of the single worksheet in an export.
pub const SHEET_NAME: &str = "Consulta Carteira";

/// File name offered for the filtered export.
pub const EXPORT_FILE_NAME: &str = "consulta_carteira_filtrada.xlsx";

/// MIME type of the filtered export.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
