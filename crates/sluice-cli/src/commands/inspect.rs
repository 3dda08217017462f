//! Inspect command

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use sluice_core::{Element, PropertyGraph};

use super::{graph_path, load_graph};
use crate::config::Config;
use crate::output::{to_json, OutputFormat};
use crate::Cli;

#[derive(Args)]
pub struct InspectArgs {
    /// Graph document (JSON)
    #[arg(short, long)]
    pub graph: Option<PathBuf>,
}

#[derive(Serialize)]
struct GraphSummary {
    vertices: usize,
    edges: usize,
    vertex_labels: BTreeMap<String, usize>,
    edge_labels: BTreeMap<String, usize>,
}

impl GraphSummary {
    fn of(graph: &PropertyGraph) -> Self {
        let mut vertex_labels = BTreeMap::new();
        for vertex in graph.vertices() {
            *vertex_labels.entry(vertex.label().to_string()).or_insert(0) += 1;
        }
        let mut edge_labels = BTreeMap::new();
        for edge in graph.edges() {
            *edge_labels.entry(edge.label().to_string()).or_insert(0) += 1;
        }
        Self {
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            vertex_labels,
            edge_labels,
        }
    }
}

pub fn run(args: &InspectArgs, cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let path = graph_path(args.graph.as_deref(), config)?;
    let graph = load_graph(&path)?;
    let summary = GraphSummary::of(&graph);

    match cli.output_format(config) {
        OutputFormat::Json => println!("{}", to_json(&summary)),
        OutputFormat::Table => {
            println!("Graph: {}", path.display());
            println!("  Vertices: {}", summary.vertices);
            println!("  Edges: {}", summary.edges);
            if !summary.vertex_labels.is_empty() {
                println!("  Vertex labels:");
                for (label, count) in &summary.vertex_labels {
                    println!("    {}: {}", label, count);
                }
            }
            if !summary.edge_labels.is_empty() {
                println!("  Edge labels:");
                for (label, count) in &summary.edge_labels {
                    println!("    {}: {}", label, count);
                }
            }
        }
    }

    Ok(())
}
