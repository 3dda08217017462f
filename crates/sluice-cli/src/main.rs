//! Sluice CLI - Run lazy traversals over graph documents

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, config as config_cmd, inspect, query};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "sluice")]
#[command(author, version, about = "Lazy, restartable traversals over property graphs")]
pub struct Cli {
    /// Output format: table, json (defaults to the configured format)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The output format, falling back to the config file, then table
    pub fn output_format(&self, config: &Config) -> OutputFormat {
        self.format
            .as_deref()
            .or(config.format.as_deref())
            .map(OutputFormat::from)
            .unwrap_or(OutputFormat::Table)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a traversal over a graph document
    Query(query::QueryArgs),
    /// Summarize a graph document
    Inspect(inspect::InspectArgs),
    /// Manage CLI configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting sluice CLI");

    let config = Config::load();

    match &cli.command {
        Commands::Query(args) => query::run(args, &cli, &config)?,
        Commands::Inspect(args) => inspect::run(args, &cli, &config)?,
        Commands::Config(args) => config_cmd::run(args)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
