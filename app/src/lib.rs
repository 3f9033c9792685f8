//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point for the Consulta Carteira dashboard.
// CONTEXT: Session state plus the commands the UI (or the CLI) calls.

use engine::Table;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod api_types;
pub mod commands;
pub mod config;
pub mod loader;
pub mod logging;

pub use api_types::{
    ChartGrid, ChartsTabRequest, ChartsTabView, ExportFile, TableTabRequest, TableTabView,
};
pub use commands::{charts_tab, export_table, reload, table_tab};
pub use config::{AppConfig, ConfigError, DatabaseConfig};
pub use loader::{query_for, LoadError, Loader, MySqlSource, Notice, RowSource, WorkbookSource};
pub use logging::{get_log_path, init_log_file, next_seq, write_log};

// ============================================================================
// APP STATE
// ============================================================================

/// Session state: the table loaded once, the notices it produced, and the
/// table last shown on the table tab.
pub struct AppState {
    pub table: Mutex<Table>,
    pub notices: Mutex<Vec<Notice>>,
    pub last_rendered: Mutex<Option<Table>>,
}

/// Empty session, as after a failed load without the notice.
pub fn create_app_state() -> AppState {
    log_info!("SYS", "Creating AppState");
    AppState::with_table(Table::new(), Vec::new())
}

impl AppState {
    pub fn with_table(table: Table, notices: Vec<Notice>) -> Self {
        AppState {
            table: Mutex::new(table),
            notices: Mutex::new(notices),
            last_rendered: Mutex::new(None),
        }
    }

    /// Start a session by running the loader once.
    pub fn from_loader(loader: &mut Loader) -> Self {
        let mut notices = Vec::new();
        let table = loader.load(&mut notices);
        log_info!("SYS", "Session started rows={} notices={}", table.len(), notices.len());
        AppState::with_table(table, notices)
    }
}

/// Lock a session field. A panic in another command does not poison the
/// session; the data is replaced wholesale, never left half-written.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
