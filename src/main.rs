//! cowtrie CLI - Replay trie scripts from the command line
//!
//! Reads JSON Lines commands that derive and query trie versions, and prints
//! one JSON object per command.

use clap::{Parser, Subcommand};
use cowtrie::{Outcome, Session};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, overriding `-v`
const LOG_ENV: &str = "COWTRIE_LOG";

#[derive(Parser)]
#[command(name = "cowtrie")]
#[command(about = "Replay scripts against a persistent copy-on-write trie")]
#[command(version)]
struct Cli {
    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON Lines script
    Run {
        /// Script path, or "-" for stdin
        script: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Run { script } => {
            let mut session = Session::new();
            let mut emit = |outcome: Outcome| -> anyhow::Result<()> {
                output(&cli.format, &serde_json::to_value(&outcome)?)
            };
            let applied = if script.as_os_str() == "-" {
                session.run_with(io::stdin().lock(), &mut emit)?
            } else {
                let file = File::open(&script).map_err(|e| {
                    anyhow::anyhow!("Failed to open script {}: {}", script.display(), e)
                })?;
                session.run_with(BufReader::new(file), &mut emit)?
            };

            tracing::info!(
                commands = applied,
                versions = session.len(),
                "script replayed"
            );
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))
}

fn output(format: &OutputFormat, value: &serde_json::Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(value)?);
        }
        OutputFormat::Text => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
    }
    Ok(())
}
