//! candlefold CLI - OHLC resampling over embedded SQLite.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "candlefold")]
#[command(about = "Resample OHLC time-series stored in SQLite", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resample minute bars into coarser time buckets
    Resample {
        /// Path to the SQLite database
        database: PathBuf,

        /// Source table name
        #[arg(long, default_value = "bars")]
        table: String,

        /// Timestamp column name
        #[arg(long, default_value = "dateX")]
        time_column: String,

        /// Bucket width (m1, m5, m15, m30, h1, h2, h4, d1)
        #[arg(short, long, default_value = "h2")]
        timeframe: String,

        /// Output file path. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// Create and fill a demo table of random-walk minute bars
    Seed {
        /// Path to the SQLite database (created if missing)
        database: PathBuf,

        /// Target table name
        #[arg(long, default_value = "bars")]
        table: String,

        /// Timestamp column name
        #[arg(long, default_value = "dateX")]
        time_column: String,

        /// Number of one-minute bars to generate
        #[arg(short, long, default_value = "1440")]
        minutes: u32,

        /// First bar timestamp (YYYY-MM-DDTHH:MM:SS). Defaults to `minutes`
        /// minutes before now.
        #[arg(short, long)]
        start: Option<String>,

        /// Starting price of the random walk
        #[arg(long, default_value = "100.0")]
        price: f64,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Print the resample SQL statement without running it
    Sql {
        /// Source table name
        #[arg(long, default_value = "bars")]
        table: String,

        /// Timestamp column name
        #[arg(long, default_value = "dateX")]
        time_column: String,

        /// Bucket width (m1, m5, m15, m30, h1, h2, h4, d1)
        #[arg(short, long, default_value = "h2")]
        timeframe: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Resample {
            database,
            table,
            time_column,
            timeframe,
            output,
            format,
        } => commands::resample::resample(&database, &table, &time_column, &timeframe, output, format),
        Commands::Seed {
            database,
            table,
            time_column,
            minutes,
            start,
            price,
            seed,
        } => commands::seed::seed(
            &database,
            &table,
            &time_column,
            minutes,
            start.as_deref(),
            price,
            seed,
        ),
        Commands::Sql {
            table,
            time_column,
            timeframe,
        } => commands::sql::print_sql(&table, &time_column, &timeframe),
    }
}

/// Installs the tracing subscriber, honoring RUST_LOG when set.
fn init_tracing(verbose: u8, quiet: bool) {
    let default = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
