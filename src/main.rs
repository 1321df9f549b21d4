use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use budget_tracker::cli::{
    handle_add_command, handle_budget_command, handle_categories_command, handle_delete_command,
    handle_edit_command, handle_export_command, handle_list_command, handle_recent_command,
    handle_reset_command, handle_summary_command, handle_theme_command, handle_watch_command,
    AddArgs, BudgetCommands, EditArgs, ListArgs, ThemeCommands,
};
use budget_tracker::config::{Settings, TrackerPaths};
use budget_tracker::models::TransactionId;
use budget_tracker::storage::{FileStore, Store};
use budget_tracker::sync::Tracker;

#[derive(Parser, Debug)]
#[command(
    name = "budget",
    author = "Kaylee Beyene",
    version,
    about = "Track income and expenses from the command line",
    long_about = "A personal income and expense tracker. Transactions are kept in a \
                  local data directory; every command sees changes made by any other \
                  running session, and `budget watch` re-renders as they happen."
)]
struct Cli {
    /// Log level for this program (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    log_level: LevelFilter,

    /// Directory holding the tracker's data and settings
    #[arg(long, global = true, env = "BUDGET_TRACKER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Record a new transaction
    Add(AddArgs),

    /// Change an existing transaction
    Edit(EditArgs),

    /// Delete a transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID
        id: TransactionId,
    },

    /// List transactions
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show balance, income, expenses and recent activity
    Summary,

    /// Show totals per category
    Categories,

    /// Show the most recent transactions
    Recent {
        /// Number of transactions to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Export all transactions as CSV
    Export {
        /// Output file ("-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Show or change the theme
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },

    /// Delete every transaction
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Keep the dashboard open and refresh it on changes from other sessions
    Watch {
        /// Exit after this many refreshes
        #[arg(long)]
        max_updates: Option<usize>,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.log_level);
    debug!("Log level set to {}", cli.log_level.to_string().to_lowercase());

    match main_inner(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn main_inner(cli: Cli) -> Result<()> {
    let paths = match cli.data_dir {
        Some(dir) => TrackerPaths::with_base_dir(dir),
        None => TrackerPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    debug!("Using data directory {}", paths.data_dir().display());

    if let Some(Commands::Config) = cli.command {
        println!("Budget Tracker Configuration");
        println!("============================");
        println!("Base directory:  {}", paths.base_dir().display());
        println!("Data directory:  {}", paths.data_dir().display());
        println!("Settings file:   {}", paths.settings_file().display());
        println!();
        println!("Settings:");
        println!("  Currency symbol: {}", settings.currency_symbol);
        println!("  Recent limit:    {}", settings.recent_limit);
        println!("  Poll interval:   {}ms", settings.poll_interval_ms);
        println!("  Date format:     {}", settings.date_format);
        return Ok(());
    }

    paths.ensure_directories()?;
    let store = Store::new(FileStore::new(paths.data_dir()).with_poll_interval(settings.poll_interval()));
    let mut tracker = Tracker::open(store)?;

    match cli.command {
        Some(Commands::Add(args)) => handle_add_command(&mut tracker, &settings, args)?,
        Some(Commands::Edit(args)) => handle_edit_command(&mut tracker, &settings, args)?,
        Some(Commands::Delete { id }) => handle_delete_command(&mut tracker, &settings, id)?,
        Some(Commands::List(args)) => handle_list_command(&mut tracker, &settings, args)?,
        Some(Commands::Summary) | None => handle_summary_command(&mut tracker, &settings)?,
        Some(Commands::Categories) => handle_categories_command(&mut tracker, &settings)?,
        Some(Commands::Recent { limit }) => handle_recent_command(&mut tracker, &settings, limit)?,
        Some(Commands::Export { output }) => handle_export_command(&tracker, output)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&tracker, &settings, cmd)?,
        Some(Commands::Theme { command }) => handle_theme_command(&tracker, command)?,
        Some(Commands::Reset { force }) => {
            handle_reset_command(&mut tracker, &settings, force, &mut io::stdin().lock())?
        }
        Some(Commands::Watch { max_updates }) => {
            handle_watch_command(&mut tracker, &settings, max_updates)?
        }
        Some(Commands::Config) => {}
    }

    Ok(())
}

/// Initialize the logger; `RUST_LOG` wins over `--log-level`
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("budget_tracker={},budget={}", level, level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
