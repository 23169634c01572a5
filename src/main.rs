use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tracker::cli::{
    handle_audit_command, handle_expense_command, handle_task_command, ExpenseCommands,
    TaskCommands,
};
use tracker::config::{Settings, TrackerPaths};
use tracker::storage::Storage;
use tracker::TrackerError;

#[derive(Parser)]
#[command(
    name = "tracker",
    version,
    about = "Local task and expense tracker",
    long_about = "tracker keeps tasks and expenses in plain JSON files in a local \
                  data directory. Every change is written atomically, and nothing \
                  leaves your machine."
)]
struct Cli {
    /// Directory holding the store files
    #[arg(long, global = true, env = "TRACKER_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Task(TaskCommands),

    /// Expense tracking commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _logger = match tracker::logging::init_logging(cli.verbose) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("warning: {}", e);
            None
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = TrackerPaths::new(cli.data_dir)?;
    let settings = Settings::load_or_default(&paths)?;
    log::debug!("using data directory {}", paths.base_dir().display());

    let storage = Storage::new(paths.clone(), &settings);

    match cli.command {
        Commands::Task(cmd) => handle_task_command(&storage, &settings, cmd)?,
        Commands::Expense(cmd) => handle_expense_command(&storage, &settings, cmd)?,
        Commands::Audit { limit } => handle_audit_command(&storage, limit)?,
        Commands::Config => print_config(&paths, &settings),
    }

    Ok(())
}

fn print_config(paths: &TrackerPaths, settings: &Settings) {
    println!("Tracker Configuration");
    println!("=====================");
    println!("Data directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Tasks file:     {}", paths.tasks_file().display());
    println!("Expenses file:  {}", paths.expenses_file().display());
    println!("Budgets file:   {}", paths.budgets_file().display());
    println!("Audit log:      {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:  {}", settings.currency_symbol);
    println!("  Date format:      {}", settings.date_format);
    println!("  Default category: {}", settings.default_category);
    println!(
        "  Audit log:        {}",
        if settings.audit_enabled { "enabled" } else { "disabled" }
    );
}

/// Exit status for a failed run; kinds outside the tracker taxonomy map to 1
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<TrackerError>()
        .map(TrackerError::exit_code)
        .unwrap_or(1)
}
