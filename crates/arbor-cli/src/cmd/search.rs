//! `arbor search`: run one traversal and print how it classified each edge.

use std::io::Write;

use anyhow::Result;
use arbor_core::{
    Bfs, Control, Dfs, EdgeKind, SearchEvent, SearchForest, SearchNode, SearchSummary, visit_fn,
};
use clap::Args;
use petgraph::EdgeType;
use petgraph::graph::{Graph, NodeIndex};
use serde::Serialize;
use tracing::debug;

use crate::config::{Config, Engine};
use crate::graph_file::{GraphArgs, LoadedGraph};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `arbor search`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Breadth-first traversal.
    #[arg(long, conflicts_with = "dfs")]
    pub bfs: bool,

    /// Depth-first traversal.
    #[arg(long)]
    pub dfs: bool,

    /// Vertex to start from; remaining components follow in file order.
    #[arg(long, value_name = "VERTEX")]
    pub from: Option<String>,

    /// Stop the whole traversal at the first vertex deeper than this level.
    #[arg(long, value_name = "N")]
    pub limit_level: Option<usize>,
}

impl SearchArgs {
    fn engine(&self, config: &Config) -> Engine {
        if self.bfs {
            Engine::Bfs
        } else if self.dfs {
            Engine::Dfs
        } else {
            config.search.strategy
        }
    }
}

#[derive(Debug, Serialize)]
struct EdgeRecord {
    kind: EdgeKind,
    from: String,
    to: String,
}

#[derive(Debug, Serialize)]
struct VertexRecord {
    vertex: String,
    component: usize,
    level: usize,
    order: usize,
    parent: Option<String>,
}

#[derive(Debug, Serialize)]
struct SearchReport {
    engine: Engine,
    directed: bool,
    edges: Vec<EdgeRecord>,
    vertices: Vec<VertexRecord>,
    summary: SearchSummary,
}

/// Execute `arbor search`.
pub fn run_search(args: &SearchArgs, output: OutputMode, config: &Config) -> Result<()> {
    let labeled = args.graph.load(config.graph.directed)?;
    let from = args
        .from
        .as_deref()
        .map(|label| labeled.vertex(label))
        .transpose()?;
    let engine = args.engine(config);

    let report = match labeled.to_petgraph() {
        LoadedGraph::Directed(graph) => search_labeled(&graph, engine, from, args.limit_level)?,
        LoadedGraph::Undirected(graph) => search_labeled(&graph, engine, from, args.limit_level)?,
    };
    debug!(
        ?engine,
        edges = report.edges.len(),
        interrupted = report.summary.interrupted,
        "search command finished"
    );
    render_mode(output, &report, render_text, render_pretty)
}

fn search_labeled<Ty: EdgeType>(
    graph: &Graph<String, (), Ty>,
    engine: Engine,
    start: Option<NodeIndex>,
    limit_level: Option<usize>,
) -> Result<SearchReport> {
    let label = |node: &SearchNode<NodeIndex>| graph[node.vertex()].clone();
    let mut edges = Vec::new();
    let mut visitor = visit_fn(|_: &SearchForest<NodeIndex>, event| {
        let (kind, from, to) = match event {
            SearchEvent::StartVertex(node) => {
                return Control::break_if(limit_level.is_some_and(|max| node.level() > max));
            }
            SearchEvent::FinishVertex(_) => return Control::Continue,
            SearchEvent::TreeEdge { from, to } => (EdgeKind::Tree, from, to),
            SearchEvent::BackEdge { from, to } => (EdgeKind::Back, from, to),
            SearchEvent::CrossEdge { from, to } => (EdgeKind::Cross, from, to),
        };
        edges.push(EdgeRecord {
            kind,
            from: label(from),
            to: label(to),
        });
        Control::Continue
    });

    let (summary, vertices) = match engine {
        Engine::Bfs => {
            let mut bfs = Bfs::new(graph);
            let summary = match start {
                Some(start) => bfs.traverse_from(start, &mut visitor)?,
                None => bfs.traverse(&mut visitor),
            };
            (summary, vertex_records(graph, bfs.forest()))
        }
        Engine::Dfs => {
            let mut dfs = Dfs::new(graph);
            let summary = match start {
                Some(start) => dfs.traverse_from(start, &mut visitor)?,
                None => dfs.traverse(&mut visitor),
            };
            (summary, vertex_records(graph, dfs.forest()))
        }
    };

    Ok(SearchReport {
        engine,
        directed: graph.is_directed(),
        edges,
        vertices,
        summary,
    })
}

fn vertex_records<Ty: EdgeType>(
    graph: &Graph<String, (), Ty>,
    forest: &SearchForest<NodeIndex>,
) -> Vec<VertexRecord> {
    forest
        .iter()
        .map(|node| VertexRecord {
            vertex: graph[node.vertex()].clone(),
            component: node.component(),
            level: node.level(),
            order: node.order(),
            parent: forest.parent_of(node).map(|parent| graph[parent.vertex()].clone()),
        })
        .collect()
}

fn render_text(report: &SearchReport, w: &mut dyn Write) -> std::io::Result<()> {
    for edge in &report.edges {
        writeln!(w, "{} {} {}", edge.kind, edge.from, edge.to)?;
    }
    let summary = &report.summary;
    writeln!(w, "components {}", summary.components)?;
    writeln!(w, "max_level {}", summary.max_level)?;
    writeln!(w, "interrupted {}", summary.interrupted)
}

fn render_pretty(report: &SearchReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Edges")?;
    for edge in &report.edges {
        writeln!(w, "  {:<6} {} -> {}", edge.kind.as_str(), edge.from, edge.to)?;
    }
    writeln!(w)?;
    pretty_section(w, "Vertices")?;
    for vertex in &report.vertices {
        let parent = vertex.parent.as_deref().unwrap_or("-");
        writeln!(
            w,
            "  {:<12} component {} level {} parent {}",
            vertex.vertex, vertex.component, vertex.level, parent
        )?;
    }
    writeln!(w)?;
    pretty_section(w, "Summary")?;
    let engine = match report.engine {
        Engine::Bfs => "breadth-first",
        Engine::Dfs => "depth-first",
    };
    pretty_kv(w, "engine", engine)?;
    pretty_kv(w, "components", report.summary.components.to_string())?;
    pretty_kv(w, "max level", report.summary.max_level.to_string())?;
    pretty_kv(w, "interrupted", report.summary.interrupted.to_string())
}
