// packscan - warehouse package scanning over marketplace spreadsheet exports

mod config;
mod exit_codes;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use packscan_io::FolderSource;
use packscan_recon::{compare_list, compute_stats, search, SearchOutcome, SheetSource};
use packscan_store::Store;

use exit_codes::{EXIT_ERROR, EXIT_NOT_FOUND, EXIT_NO_DATA, EXIT_USAGE};

struct CliError {
    code: u8,
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(code: u8, message: impl Into<String>) -> CliError {
        CliError {
            code,
            message: message.into(),
            hint: None,
        }
    }

    fn hint(mut self, hint: impl Into<String>) -> CliError {
        self.hint = Some(hint.into());
        self
    }
}

#[derive(Parser)]
#[command(name = "packscan")]
#[command(about = "Reconcile scanned tracking numbers against marketplace spreadsheet exports")]
#[command(version)]
struct Cli {
    /// Spreadsheet folder (xlsx/xls/csv exports)
    #[arg(long, global = true, env = "PACKSCAN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// SQLite database path
    #[arg(long, global = true, env = "PACKSCAN_DB")]
    db: Option<PathBuf>,

    /// Config file (default: ./packscan.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search every loaded spreadsheet for a tracking number and record the scan
    #[command(alias = "scan", after_help = "\
Examples:
  packscan search PH123456789XY
  packscan search ph123456789xy --json")]
    Search {
        tracking_number: String,

        /// Output the full payload as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Per-courier totals and scan progress
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// List the spreadsheet files the engine can see
    Files,

    /// Manage parent-SKU → order-code mappings
    #[command(subcommand)]
    Codes(CodesCommands),

    /// List scanned tracking numbers
    Scanned,

    /// Clear all scan state
    Reset,

    /// Classify a pasted list and split tracking numbers into scanned/remaining
    #[command(after_help = "\
Examples:
  packscan compare manifest.txt
  pbpaste | packscan compare")]
    Compare {
        /// Input file (omit to read from stdin)
        input: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CodesCommands {
    /// List mappings, newest first
    List {
        #[arg(long)]
        json: bool,
    },

    /// Insert or replace the mapping for a parent SKU
    Set {
        parent_sku: String,
        order_code: String,

        /// Informational product name stored with the mapping
        #[arg(long, default_value = "")]
        product_name: String,
    },

    /// Delete a mapping by id
    Delete { id: i64 },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = &e.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(e.code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let file_config = config::FileConfig::load(cli.config.as_deref())
        .map_err(|e| CliError::new(EXIT_USAGE, e))?;
    let settings = config::resolve(cli.data_dir, cli.db, file_config);

    let source = FolderSource::new(&settings.data_dir);
    let store = Store::open(&settings.db_path)
        .map_err(|e| CliError::new(EXIT_ERROR, format!("cannot open store: {e}")))?;

    match cli.command {
        Commands::Search {
            tracking_number,
            json,
        } => cmd_search(&source, &store, &tracking_number, json),
        Commands::Stats { json } => cmd_stats(&source, &store, json),
        Commands::Files => cmd_files(&source),
        Commands::Codes(cmd) => cmd_codes(&store, cmd),
        Commands::Scanned => cmd_scanned(&store),
        Commands::Reset => cmd_reset(&store),
        Commands::Compare { input, json } => cmd_compare(&store, input, json),
    }
}

fn engine_err(e: packscan_recon::EngineError) -> CliError {
    CliError::new(EXIT_ERROR, e.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}")))
}

fn cmd_search(
    source: &FolderSource,
    store: &Store,
    tracking_number: &str,
    json: bool,
) -> Result<(), CliError> {
    let outcome = search(source, store, store, tracking_number).map_err(engine_err)?;

    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }

    if json {
        println!("{}", to_json(&outcome)?);
        return Ok(());
    }

    if let Some(error) = &outcome.error {
        return Err(CliError::new(EXIT_NO_DATA, error.clone())
            .hint(format!("place export files in {}", source.dir().display())));
    }

    print_search_human(&outcome);
    Ok(())
}

fn print_search_human(outcome: &SearchOutcome) {
    if outcome.rows.is_empty() {
        eprintln!("no match for {}", outcome.tracking_number);
        return;
    }

    for row in &outcome.rows {
        println!(
            "{} — {} x{} [{}]",
            row.tracking_number, row.product_name, row.quantity, row.shipping_courier
        );
        if let Some(code) = &row.order_code {
            println!("  order code: {code}");
        }
        println!(
            "  order {} · {} · {}",
            row.order_id, row.receiver_name, row.delivery_address
        );
        println!("  source: {}", row.source);
    }

    if outcome.already_scanned {
        eprintln!("already scanned");
    } else {
        eprintln!("scan recorded");
    }
}

fn cmd_stats(source: &FolderSource, store: &Store, json: bool) -> Result<(), CliError> {
    let stats = compute_stats(source, store).map_err(engine_err)?;

    if json {
        println!("{}", to_json(&stats)?);
        return Ok(());
    }

    if stats.is_empty() {
        eprintln!("no courier data");
        return Ok(());
    }

    for stat in &stats {
        println!("{:>5}/{:<5} {}", stat.scanned, stat.total, stat.courier);
    }
    Ok(())
}

fn cmd_files(source: &FolderSource) -> Result<(), CliError> {
    let files = source.list_files().map_err(engine_err)?;
    if files.is_empty() {
        eprintln!("no spreadsheet files in {}", source.dir().display());
        return Ok(());
    }
    for file in files {
        println!("{file}");
    }
    Ok(())
}

fn cmd_codes(store: &Store, cmd: CodesCommands) -> Result<(), CliError> {
    match cmd {
        CodesCommands::List { json } => {
            let codes = store
                .list_order_codes()
                .map_err(|e| CliError::new(EXIT_ERROR, e.to_string()))?;
            if json {
                println!("{}", to_json(&codes)?);
                return Ok(());
            }
            for mapping in &codes {
                println!(
                    "{:>4}  {}  {} — {} ({})",
                    mapping.id,
                    mapping.parent_sku,
                    mapping.order_code,
                    mapping.product_name,
                    mapping.created_at
                );
            }
            Ok(())
        }
        CodesCommands::Set {
            parent_sku,
            order_code,
            product_name,
        } => {
            store
                .upsert_order_code(&parent_sku, &product_name, &order_code)
                .map_err(|e| CliError::new(EXIT_ERROR, e.to_string()))?;
            eprintln!("saved {parent_sku} → {order_code}");
            Ok(())
        }
        CodesCommands::Delete { id } => {
            let deleted = store
                .delete_order_code(id)
                .map_err(|e| CliError::new(EXIT_ERROR, e.to_string()))?;
            if !deleted {
                return Err(CliError::new(
                    EXIT_NOT_FOUND,
                    format!("no order code with id {id}"),
                ));
            }
            eprintln!("deleted order code {id}");
            Ok(())
        }
    }
}

fn cmd_scanned(store: &Store) -> Result<(), CliError> {
    let tracking = store
        .scanned_tracking()
        .map_err(|e| CliError::new(EXIT_ERROR, e.to_string()))?;
    for number in tracking {
        println!("{number}");
    }
    Ok(())
}

fn cmd_reset(store: &Store) -> Result<(), CliError> {
    store
        .reset_scan_state()
        .map_err(|e| CliError::new(EXIT_ERROR, e.to_string()))?;
    eprintln!("scan state cleared");
    Ok(())
}

fn cmd_compare(store: &Store, input: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|e| CliError::new(EXIT_USAGE, format!("cannot read {}: {e}", path.display())))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| CliError::new(EXIT_ERROR, format!("cannot read stdin: {e}")))?;
            buffer
        }
    };

    let report = compare_list(store, &raw).map_err(engine_err)?;

    if json {
        println!("{}", to_json(&report)?);
        return Ok(());
    }

    eprintln!(
        "{} tracking numbers: {} scanned, {} remaining ({} order ids)",
        report.total,
        report.scanned_count,
        report.remaining_count,
        report.order_ids.len()
    );
    for tracking in &report.remaining {
        println!("{tracking}");
    }
    Ok(())
}
