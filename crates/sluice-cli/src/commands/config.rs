//! Config command

use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::load_graph;
use crate::config::{config_file_path, Config, ConfigKey};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print a config value
    Get {
        #[arg(value_enum)]
        key: ConfigKey,
    },
    /// Set a config value; a graph must be a loadable document
    Set {
        #[arg(value_enum)]
        key: ConfigKey,
        value: String,
    },
    /// Remove a config value so its default applies again
    Unset {
        #[arg(value_enum)]
        key: ConfigKey,
    },
    /// Show the value in effect for every key
    List,
    /// Show config file path
    Path,
    /// Create a config file
    Init {
        /// Default graph document
        #[arg(short, long)]
        graph: Option<PathBuf>,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    let mut config = Config::load();
    match &args.command {
        ConfigCommands::Get { key } => {
            println!("{}", config.get(*key).unwrap_or_else(|| "(not set)".to_string()));
        }
        ConfigCommands::Set { key, value } => {
            config.set(*key, value)?;
            let note = match (key, &config.graph) {
                (ConfigKey::Graph, Some(path)) => {
                    let graph = load_graph(path)?;
                    format!(" ({} vertices, {} edges)", graph.vertex_count(), graph.edge_count())
                }
                _ => String::new(),
            };
            config.save()?;
            println!("{} = {}{}", key, value, note);
        }
        ConfigCommands::Unset { key } => {
            config.unset(*key);
            config.save()?;
            println!("{} = {} (default)", key, key.fallback());
        }
        ConfigCommands::List => {
            println!("# {}", config_file_path().display());
            for key in ConfigKey::ALL {
                match config.get(key) {
                    Some(value) => println!("{} = {}", key, value),
                    None => println!("{} = {} (default)", key, key.fallback()),
                }
            }
        }
        ConfigCommands::Path => println!("{}", config_file_path().display()),
        ConfigCommands::Init { graph, force } => {
            let path = config_file_path();
            if path.exists() && !force {
                anyhow::bail!("{} already exists; pass --force to replace it", path.display());
            }
            if let Some(graph) = graph {
                load_graph(graph)?;
            }
            let config = Config {
                graph: graph.clone(),
                ..Config::default()
            };
            config.save()?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
