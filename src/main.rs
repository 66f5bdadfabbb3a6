//! # Launchwatch CLI
//!
//! ## Usage
//!
//! ```bash
//! launchwatch --config ./config/launchwatch.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `launchwatch init` | Create the database and collection table |
//! | `launchwatch sync` | Fetch, filter, extract and store one batch |
//! | `launchwatch list` | List stored advisories |
//! | `launchwatch get <advisoryid>` | Show one stored advisory and its windows |
//! | `launchwatch parse --year <Y> "<text>"` | Extract windows from literal text |
//! | `launchwatch serve` | Start the HTTP server |
//!
//! Logs go to stderr; set `RUST_LOG` to change the level (default `info`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use launchwatch::{config, get, ingest, server};
use launchwatch_core::extract::extract_windows;

#[derive(Parser)]
#[command(
    name = "launchwatch",
    about = "Launchwatch: airspace advisory ingestion and launch window extraction",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/launchwatch.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database file and collection table.
    ///
    /// Safe to run more than once.
    Init,

    /// Run one ingestion invocation and print the report.
    Sync {
        /// Fetch, filter and extract without opening the store.
        #[arg(long)]
        dry_run: bool,
    },

    /// List stored advisories.
    List {
        /// Print `{"advisories": [...]}` instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show one stored advisory.
    Get { advisoryid: i64 },

    /// Extract windows from detail text and print them as JSON.
    ///
    /// Does not read the configuration file.
    Parse {
        /// Reference year for the dates in the text.
        #[arg(long)]
        year: i32,

        text: String,
    },

    /// Start the HTTP server.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Parse { year, text } = &cli.command {
        let windows = extract_windows(text, *year);
        println!("{}", serde_json::to_string_pretty(&windows)?);
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            ingest::run_init(&cfg).await?;
        }
        Commands::Sync { dry_run } => {
            ingest::run_sync(&cfg, dry_run).await?;
        }
        Commands::List { json } => {
            get::run_list(&cfg, json).await?;
        }
        Commands::Get { advisoryid } => {
            get::run_get(&cfg, advisoryid).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Parse { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
