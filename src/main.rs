use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cashbook_cli::audit::Operation;
use cashbook_cli::cli::{
    handle_add_command, handle_audit_command, handle_backup_command, handle_clear_command,
    handle_delete_command, handle_export_command, handle_list_command, handle_show_command,
    handle_summary_command, AddArgs, BackupCommands, ExportFormat,
};
use cashbook_cli::config::{paths::CashbookPaths, settings::Settings};
use cashbook_cli::storage::{LoadStatus, Storage};

/// Environment variable holding the log filter
const LOG_ENV: &str = "CASHBOOK_LOG";

#[derive(Parser)]
#[command(
    name = "cashbook",
    version,
    about = "Monthly income and expense ledger",
    long_about = "Cashbook records income and expenses in a local JSON ledger \
                  and keeps running totals of income, expense and balance."
)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new income or expense
    Add(AddArgs),

    /// Show all transactions and totals
    #[command(alias = "ls")]
    List,

    /// Show total income, total expense and balance
    Summary,

    /// Show one transaction
    Show {
        /// Transaction ID (txn-xxxxxxxx, full UUID, or a unique prefix)
        id: String,
    },

    /// Delete one transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID (txn-xxxxxxxx, full UUID, or a unique prefix)
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete all transactions
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Export the ledger
    Export {
        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Only show entries of this operation
        #[arg(short, long, value_enum)]
        operation: Option<Operation>,
    },

    /// Create the data directory and settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn open_storage(paths: CashbookPaths, settings: &Settings) -> Result<Storage> {
    let (storage, status) = Storage::open(paths, settings)?;

    if let LoadStatus::Corrupt { reason, preserved } = &status {
        eprintln!("Warning: the ledger file could not be read ({}).", reason);
        eprintln!("Starting with an empty ledger.");
        if let Some(copy) = preserved {
            eprintln!("The unreadable file was copied to: {}", copy.display());
        }
    }

    Ok(storage)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = CashbookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Add(args)) => {
            let mut storage = open_storage(paths, &settings)?;
            handle_add_command(&mut storage, &settings, args)?;
        }
        Some(Commands::List) => {
            let mut storage = open_storage(paths, &settings)?;
            handle_list_command(&mut storage, &settings)?;
        }
        Some(Commands::Summary) => {
            let mut storage = open_storage(paths, &settings)?;
            handle_summary_command(&mut storage, &settings)?;
        }
        Some(Commands::Show { id }) => {
            let mut storage = open_storage(paths, &settings)?;
            handle_show_command(&mut storage, &settings, &id)?;
        }
        Some(Commands::Delete { id, force }) => {
            let mut storage = open_storage(paths, &settings)?;
            handle_delete_command(&mut storage, &settings, &id, force)?;
        }
        Some(Commands::Clear { force }) => {
            let mut storage = open_storage(paths, &settings)?;
            handle_clear_command(&mut storage, force)?;
        }
        Some(Commands::Export { format, output }) => {
            let mut storage = open_storage(paths, &settings)?;
            handle_export_command(&mut storage, format, output)?;
        }
        Some(Commands::Audit { limit, operation }) => {
            let storage = open_storage(paths, &settings)?;
            handle_audit_command(&storage, limit, operation)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialized Cashbook at: {}", paths.base_dir().display());
            println!("Ledger file: {}", paths.ledger_file().display());
        }
        Some(Commands::Config) => {
            println!("Cashbook Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Ledger file:      {}", paths.ledger_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Thousands separator: {:?}", settings.thousands_separator);
            println!("  Decimal separator:   {:?}", settings.decimal_separator);
            println!("  Decimal places:      {}", settings.decimal_places);
            println!("  Strict load:         {}", settings.strict_load);
            println!("  Backup retention:    {}", settings.backup_retention);
        }
        None => {
            println!("Cashbook - monthly income and expense ledger");
            println!();
            println!("Run 'cashbook --help' for usage information.");
        }
    }

    Ok(())
}
