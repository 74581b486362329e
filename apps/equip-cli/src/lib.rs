//! # Equip Shell Library
//!
//! Command-line shell over the inventory store. Staff use it to browse the
//! catalog and confirm loans and returns.
//!
//! ## Module Organization
//! ```text
//! equip_cli/
//! ├── lib.rs          ◄─── You are here (argument model, startup, dispatch)
//! ├── config.rs       ◄─── equip.toml + environment overrides
//! ├── output.rs       ◄─── Table / JSON rendering
//! ├── commands/
//! │   ├── mod.rs      ◄─── Shell state, Output, exit outcomes
//! │   ├── types.rs    ◄─── equip types
//! │   ├── list.rs     ◄─── equip list / show
//! │   ├── loan.rs     ◄─── equip loan / return
//! │   ├── summary.rs  ◄─── equip summary
//! │   ├── catalog.rs  ◄─── equip add / restock
//! │   └── seed.rs     ◄─── equip seed
//! └── error.rs        ◄─── CliError
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging ── stderr, RUST_LOG or -v                       │
//! │  2. Load Config ────────── defaults → equip.toml → EQUIP_* → flags     │
//! │  3. Open Database ──────── SQLite, WAL, pending migrations             │
//! │  4. Run Command ────────── one store call per invocation               │
//! │  5. Close Pool, print Output, exit 0 / 1 / 2                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::{Outcome, Output, Shell};
use config::{AppConfig, OutputFormat};
use equip_core::{EquipmentId, NewEquipment};
use equip_db::Database;
use error::CliResult;

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "equip")]
#[command(about = "Lab equipment inventory: browse the catalog, loan and return items")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: platform config dir, equip.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overrides config and EQUIP_DB_PATH
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the distinct equipment types
    Types,

    /// List equipment with its loan status
    List {
        /// all, available or on_loan
        #[arg(short, long, default_value = "all")]
        availability: String,

        /// ALL or an exact equipment type
        #[arg(short = 't', long = "type", default_value = "ALL")]
        equipment_type: String,
    },

    /// Show one item
    Show { id: EquipmentId },

    /// Mark items as loaned out
    Loan {
        /// Staff member confirming the loan
        #[arg(long)]
        staff: String,

        /// First day of the loan (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        #[arg(required = true)]
        ids: Vec<EquipmentId>,
    },

    /// Mark items as returned
    Return {
        /// Staff member confirming the return
        #[arg(long)]
        staff: String,

        #[arg(required = true)]
        ids: Vec<EquipmentId>,
    },

    /// Per-type counts of available and loaned items
    Summary,

    /// Provision a new item (starts available)
    Add {
        #[arg(short = 't', long = "type")]
        equipment_type: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        brand: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },

    /// Set the owned quantity of an item
    Restock { id: EquipmentId, quantity: i64 },

    /// Fill an empty catalog with demo equipment
    Seed {
        /// Items per equipment type
        #[arg(long, default_value_t = 2)]
        per_type: usize,
    },
}

// =============================================================================
// Startup
// =============================================================================

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - Default: warnings only, so stdout/stderr stay readable
/// - `-v`: `info,equip=debug,sqlx=warn`
/// - `RUST_LOG` wins over both
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "info,equip=debug,sqlx=warn"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // Ignore the error when a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Loads config, opens the database, runs one command and prints it.
pub async fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let mut config = AppConfig::load(cli.config).context("failed to load configuration")?;
    if let Some(path) = cli.db {
        config.database.path = Some(path);
    }
    if cli.json {
        config.output.format = OutputFormat::Json;
    }
    debug!(?config, "Configuration resolved");

    let db_config = config.db_config()?;
    info!(path = %db_config.database_path.display(), "Opening inventory");
    let db = Database::new(db_config)
        .await
        .context("failed to open the inventory database")?;

    let shell = Shell::new(db, config);
    let result = execute(&shell, cli.command).await;
    shell.database().close().await;

    let output = result?;
    if !output.text.is_empty() {
        println!("{}", output.text);
    }
    Ok(output.outcome)
}

/// Dispatches one parsed command.
pub async fn execute(shell: &Shell, command: Command) -> CliResult<Output> {
    match command {
        Command::Types => commands::types::run(shell).await,
        Command::List {
            availability,
            equipment_type,
        } => commands::list::run(shell, &availability, &equipment_type).await,
        Command::Show { id } => commands::list::show(shell, id).await,
        Command::Loan { staff, from, ids } => {
            commands::loan::loan_out(shell, &staff, &from, &ids).await
        }
        Command::Return { staff, ids } => commands::loan::return_items(shell, &staff, &ids).await,
        Command::Summary => commands::summary::run(shell).await,
        Command::Add {
            equipment_type,
            name,
            brand,
            quantity,
        } => {
            let new = NewEquipment::new(equipment_type, name, brand, quantity);
            commands::catalog::add(shell, new).await
        }
        Command::Restock { id, quantity } => commands::catalog::restock(shell, id, quantity).await,
        Command::Seed { per_type } => commands::seed::run(shell, per_type).await,
    }
}
