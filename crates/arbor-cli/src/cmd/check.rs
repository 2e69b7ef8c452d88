//! `arbor check`: does the graph contain any cycle?

use std::io::Write;

use anyhow::Result;
use arbor_core::SearchGraph;
use arbor_cycles::CycleFinder;
use clap::Args;
use serde::Serialize;

use crate::config::Config;
use crate::graph_file::{GraphArgs, LoadedGraph};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `arbor check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    cyclic: bool,
    directed: bool,
    vertices: usize,
    edges: usize,
}

impl CheckReport {
    fn of<G: SearchGraph>(graph: &G) -> Self {
        Self {
            cyclic: CycleFinder::new(graph).contains_cycle(),
            directed: graph.is_directed(),
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
        }
    }
}

/// Execute `arbor check`.
pub fn run_check(args: &CheckArgs, output: OutputMode, config: &Config) -> Result<()> {
    let labeled = args.graph.load(config.graph.directed)?;
    let report = match labeled.to_petgraph() {
        LoadedGraph::Directed(graph) => CheckReport::of(&graph),
        LoadedGraph::Undirected(graph) => CheckReport::of(&graph),
    };
    render_mode(output, &report, render_text, render_pretty)
}

const fn verdict(report: &CheckReport) -> &'static str {
    if report.cyclic { "cyclic" } else { "acyclic" }
}

fn render_text(report: &CheckReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}", verdict(report))
}

fn render_pretty(report: &CheckReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Check")?;
    pretty_kv(w, "graph", if report.directed { "directed" } else { "undirected" })?;
    pretty_kv(w, "vertices", report.vertices.to_string())?;
    pretty_kv(w, "edges", report.edges.to_string())?;
    pretty_kv(w, "result", verdict(report))
}
