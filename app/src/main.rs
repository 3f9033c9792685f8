//! FILENAME: app/src/main.rs
// PURPOSE: Command-line front end for the dashboard tabs.
// CONTEXT: Each subcommand loads the view once, runs one tab command and
// prints its JSON on stdout. Logs go to stderr and the optional log file.

use anyhow::Context;
use app_lib::{
    charts_tab, export_table, log_error, log_info, log_warn, logging, table_tab, AppConfig,
    AppState, ChartsTabRequest, ConfigError, LoadError, Loader, MySqlSource, RowSource,
    TableTabRequest, WorkbookSource,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "consulta-carteira")]
#[command(version)]
#[command(about = "Consulta Carteira - order and invoice portfolio dashboard")]
#[command(long_about = "Consulta Carteira - order and invoice portfolio dashboard

Connection settings are read from the environment (or a .env file):
  CARTEIRA_DB_HOST, CARTEIRA_DB_PORT, CARTEIRA_DB_USER,
  CARTEIRA_DB_PASSWORD, CARTEIRA_DB_NAME, CARTEIRA_VIEW
Logging: CARTEIRA_LOG_LEVEL (debug|info|warn|error), CARTEIRA_LOG_FILE

EXAMPLES:
  consulta-carteira table --client metal --status Faturado
  consulta-carteira charts --month 10/2025 --month 11/2025
  consulta-carteira export --owner Ana --out carteira.xlsx
  consulta-carteira --workbook consulta_carteira_filtrada.xlsx charts")]
struct Cli {
    /// Read an exported snapshot instead of the database
    #[arg(long, global = true, value_name = "FILE")]
    workbook: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filtered table with the gross and net totals
    Table {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// The four bar charts
    Charts {
        #[command(flatten)]
        filters: FilterArgs,

        /// Month to include, as MM/YYYY (repeatable; default: current month onwards)
        #[arg(long = "month", value_name = "MM/YYYY")]
        months: Vec<String>,

        /// Write the JSON to this file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Filtered table as an .xlsx file
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output path (default: consulta_carteira_filtrada.xlsx)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    /// Case-insensitive part of the client name
    #[arg(long, default_value = "")]
    client: String,

    /// Commercial owner to include (repeatable)
    #[arg(long = "owner", value_name = "NAME")]
    owners: Vec<String>,

    /// Status to include (repeatable)
    #[arg(long = "status", value_name = "STATUS")]
    statuses: Vec<String>,
}

impl From<FilterArgs> for TableTabRequest {
    fn from(args: FilterArgs) -> Self {
        TableTabRequest {
            client: args.client,
            owners: args.owners,
            statuses: args.statuses,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::from_env().context("invalid configuration")?;
    logging::init(config.log_level, config.log_file.as_deref())
        .map_err(anyhow::Error::msg)
        .context("failed to initialise logging")?;
    log_info!("SYS", "consulta-carteira {} starting", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_loader(&mut build_loader(&cli, &config));
    for notice in state.notices.lock().map(|n| n.clone()).unwrap_or_default() {
        log_warn!("SYS", "{}", notice.message());
    }

    match cli.command {
        Command::Table { filters } => {
            let view = table_tab(&state, filters.into());
            print_json(&view, None)?;
        }
        Command::Charts { filters, months, out } => {
            let request = ChartsTabRequest {
                filters: filters.into(),
                months: if months.is_empty() { None } else { Some(months) },
            };
            let today = chrono::Local::now().date_naive();
            let view = charts_tab(&state, request, today);
            print_json(&view, out)?;
        }
        Command::Export { filters, out } => {
            let file = export_table(&state, filters.into()).map_err(anyhow::Error::msg)?;
            let path = out.unwrap_or_else(|| PathBuf::from(&file.file_name));
            if let Err(e) = std::fs::write(&path, &file.bytes) {
                log_error!("SYS", "failed to write {}: {}", path.display(), e);
                return Err(e).with_context(|| format!("failed to write {}", path.display()));
            }
            log_info!("SYS", "wrote {} ({} bytes)", path.display(), file.size);
            print_json(&file, None)?;
        }
    }
    Ok(())
}

fn build_loader(cli: &Cli, config: &AppConfig) -> Loader {
    let source: Box<dyn RowSource + Send> = match &cli.workbook {
        Some(path) => Box::new(WorkbookSource::new(path)),
        None => match config.require_database() {
            Ok(db) => Box::new(MySqlSource::new(db.clone())),
            Err(e) => Box::new(Unconfigured(e)),
        },
    };
    Loader::new(source, config.view.clone())
}

/// Source used when neither a snapshot nor a database is configured, so the
/// session still starts and shows the error notice.
struct Unconfigured(ConfigError);

impl RowSource for Unconfigured {
    fn fetch_rows(&mut self, _query: &str) -> Result<Vec<Vec<engine::Value>>, LoadError> {
        Err(LoadError::Config(self.0.clone()))
    }

    fn describe(&self) -> String {
        "unconfigured".to_string()
    }
}

fn print_json<T: serde::Serialize>(value: &T, out: Option<PathBuf>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}
