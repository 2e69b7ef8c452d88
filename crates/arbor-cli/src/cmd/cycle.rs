//! `arbor cycle`: find one cycle in a graph file.

use std::io::Write;

use anyhow::Result;
use arbor_cycles::{Cycle, CycleFinder, CycleQuery, Parity, Strategy};
use clap::Args;
use petgraph::EdgeType;
use petgraph::graph::{Graph, NodeIndex};
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::graph_file::{GraphArgs, LoadedGraph};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `arbor cycle`.
#[derive(Args, Debug)]
pub struct CycleArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Find a cycle of minimum length instead of the first one found.
    #[arg(long)]
    pub shortest: bool,

    /// Only accept cycles through this vertex.
    #[arg(long, value_name = "VERTEX")]
    pub through: Option<String>,

    /// Only accept cycles with an odd number of vertices.
    #[arg(long, conflicts_with = "even")]
    pub odd: bool,

    /// Only accept cycles with an even number of vertices.
    #[arg(long)]
    pub even: bool,
}

impl CycleArgs {
    fn query(&self, through: Option<NodeIndex>) -> CycleQuery<NodeIndex> {
        let mut query = if self.shortest {
            CycleQuery::shortest()
        } else {
            CycleQuery::any()
        };
        if let Some(target) = through {
            query = query.through(target);
        }
        if self.odd {
            query = query.with_parity(Parity::Odd);
        } else if self.even {
            query = query.with_parity(Parity::Even);
        }
        query
    }
}

#[derive(Debug, Serialize)]
struct CycleReport {
    found: bool,
    length: usize,
    strategy: Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    parity: Option<Parity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    through: Option<String>,
    cycle: Option<Cycle<String>>,
}

/// Execute `arbor cycle`.
pub fn run_cycle(args: &CycleArgs, output: OutputMode, config: &Config) -> Result<()> {
    let labeled = args.graph.load(config.graph.directed)?;
    let through = args
        .through
        .as_deref()
        .map(|label| labeled.vertex(label))
        .transpose()?;
    let query = args.query(through);

    let cycle = match labeled.to_petgraph() {
        LoadedGraph::Directed(graph) => find_labeled(&graph, &query)?,
        LoadedGraph::Undirected(graph) => find_labeled(&graph, &query)?,
    };
    debug!(found = cycle.is_some(), "cycle command finished");

    let report = CycleReport {
        found: cycle.is_some(),
        length: cycle.as_ref().map_or(0, Cycle::len),
        strategy: query.strategy(),
        parity: query.parity(),
        through: args.through.clone(),
        cycle,
    };
    render_mode(output, &report, render_text, render_pretty)
}

/// Run `query` and translate the result to vertex labels.
fn find_labeled<Ty: EdgeType>(
    graph: &Graph<String, (), Ty>,
    query: &CycleQuery<NodeIndex>,
) -> Result<Option<Cycle<String>>> {
    let Some(cycle) = CycleFinder::new(graph).find(query)? else {
        return Ok(None);
    };
    let labels = cycle.iter().map(|&v| graph[v].clone()).collect();
    Ok(Some(Cycle::new(labels)?))
}

const fn strategy_name(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Any => "any",
        Strategy::Shortest => "shortest",
    }
}

const fn parity_name(parity: Option<Parity>) -> &'static str {
    match parity {
        None => "any",
        Some(Parity::Odd) => "odd",
        Some(Parity::Even) => "even",
    }
}

fn render_text(report: &CycleReport, w: &mut dyn Write) -> std::io::Result<()> {
    match &report.cycle {
        Some(cycle) => writeln!(w, "{cycle}"),
        None => writeln!(w, "no cycle"),
    }
}

fn render_pretty(report: &CycleReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Cycle")?;
    pretty_kv(w, "strategy", strategy_name(report.strategy))?;
    pretty_kv(w, "parity", parity_name(report.parity))?;
    if let Some(through) = &report.through {
        pretty_kv(w, "through", through)?;
    }
    match &report.cycle {
        Some(cycle) => {
            pretty_kv(w, "length", report.length.to_string())?;
            pretty_kv(w, "path", cycle.to_string())
        }
        None => pretty_kv(w, "result", "no qualifying cycle"),
    }
}
