//! Query command

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use sluice_pipes::{Path, PathItem, Query, RunningStats, Step};

use super::{graph_path, load_graph};
use crate::config::Config;
use crate::output::{format_path, to_json, OutputFormat};
use crate::Cli;

#[derive(Args)]
pub struct QueryArgs {
    /// Graph document (JSON)
    #[arg(short, long)]
    pub graph: Option<PathBuf>,

    /// Traversal steps, e.g. `V out:knows values:name`
    #[arg(required = true)]
    pub steps: Vec<String>,

    /// Print the path that led to each element
    #[arg(long)]
    pub path: bool,

    /// Stop after this many elements
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print count, mean and standard deviation of numeric results
    #[arg(long)]
    pub stats: bool,
}

#[derive(Serialize)]
struct Row {
    item: PathItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Path>,
}

#[derive(Serialize)]
struct Summary {
    count: u64,
    mean: Option<f64>,
    std_dev: Option<f64>,
}

impl From<&RunningStats> for Summary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count(),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

#[derive(Serialize)]
struct Report {
    results: Vec<Row>,
    stats: Summary,
}

fn show(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |x| x.to_string())
}

pub fn run(args: &QueryArgs, cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let path = graph_path(args.graph.as_deref(), config)?;
    let graph = load_graph(&path)?;

    let mut query = Query::parse(&graph, args.steps.as_slice())?;
    if args.stats {
        query = query.push(Step::StdDev)?;
    }

    let limit = args.limit.or(config.limit).unwrap_or(usize::MAX);
    let mut rows = Vec::new();
    while rows.len() < limit {
        let Some((item, item_path)) = query.next_with_path() else {
            break;
        };
        rows.push(Row {
            item,
            path: args.path.then_some(item_path),
        });
    }
    tracing::info!("Query emitted {} elements", rows.len());

    let summary = query.stats().map(|stats| Summary::from(&**stats));

    match cli.output_format(config) {
        OutputFormat::Json => match summary {
            Some(stats) => println!("{}", to_json(&Report { results: rows, stats })),
            None => println!("{}", to_json(&rows)),
        },
        OutputFormat::Table => {
            for row in &rows {
                match &row.path {
                    Some(p) => println!("{}\t{}", row.item, format_path(p)),
                    None => println!("{}", row.item),
                }
            }
            if let Some(stats) = summary {
                println!();
                println!("count: {}", stats.count);
                println!("mean: {}", show(stats.mean));
                println!("std dev: {}", show(stats.std_dev));
            }
        }
    }

    Ok(())
}
