//! Graph files: JSON documents or plain edge lists.
//!
//! JSON: `{"directed": bool?, "vertices": [label]?, "edges": [[a, b], ...]}`
//! where labels are strings or numbers.
//!
//! Edge list: one `a b` pair per line; a line with a single label adds an
//! isolated vertex; `#` starts a comment. Vertices are numbered in order of
//! first appearance in either format.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use petgraph::graph::{DiGraph, Graph, NodeIndex, UnGraph};
use petgraph::EdgeType;
use serde::Deserialize;
use tracing::debug;

use crate::output::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Json,
    Edges,
}

impl InputFormat {
    /// `.json` files are JSON, everything else is an edge list.
    fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Edges,
        }
    }
}

/// Input flags shared by every command that reads a graph.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Graph file (`.json`, or an edge list with one `a b` pair per line).
    pub file: PathBuf,

    /// Override format detection.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub input_format: Option<InputFormat>,

    /// Treat edges as directed, whatever the file or config says.
    #[arg(long, conflicts_with = "undirected")]
    pub directed: bool,

    /// Treat edges as undirected, whatever the file or config says.
    #[arg(long)]
    pub undirected: bool,
}

impl GraphArgs {
    const fn directed_flag(&self) -> Option<bool> {
        if self.directed {
            Some(true)
        } else if self.undirected {
            Some(false)
        } else {
            None
        }
    }

    /// Read and parse the file. Directedness comes from the flags, then the
    /// file itself, then `default_directed`.
    pub fn load(&self, default_directed: bool) -> Result<LabeledGraph> {
        let path = &self.file;
        let content = std::fs::read_to_string(path).map_err(|err| {
            anyhow::Error::new(CliError::with_details(
                format!("cannot read {}: {err}", path.display()),
                "check the graph file path",
                "unreadable_graph",
            ))
        })?;

        let format = self.input_format.unwrap_or_else(|| InputFormat::detect(path));
        let mut graph = match format {
            InputFormat::Json => parse_json(&content),
            InputFormat::Edges => parse_edge_list(&content),
        }
        .with_context(|| format!("Failed to parse {}", path.display()))?;

        graph.directed = self
            .directed_flag()
            .or(graph.directed)
            .or(Some(default_directed));
        debug!(
            path = %path.display(),
            ?format,
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            directed = graph.is_directed(),
            "graph loaded"
        );
        Ok(graph)
    }
}

/// Labeled vertices and index pairs, before committing to directedness.
#[derive(Debug, Clone, Default)]
pub struct LabeledGraph {
    directed: Option<bool>,
    labels: Vec<String>,
    index: HashMap<String, usize>,
    edges: Vec<(usize, usize)>,
}

/// A loaded graph in petgraph form. Node weights are the labels.
#[derive(Debug)]
pub enum LoadedGraph {
    Directed(DiGraph<String, ()>),
    Undirected(UnGraph<String, ()>),
}

impl LabeledGraph {
    fn intern(&mut self, label: String) -> usize {
        if let Some(&index) = self.index.get(&label) {
            return index;
        }
        let index = self.labels.len();
        self.labels.push(label.clone());
        self.index.insert(label, index);
        index
    }

    fn add_edge(&mut self, from: String, to: String) {
        let from = self.intern(from);
        let to = self.intern(to);
        self.edges.push((from, to));
    }

    pub fn is_directed(&self) -> bool {
        self.directed.unwrap_or(false)
    }

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Vertex for `label`.
    pub fn vertex(&self, label: &str) -> Result<NodeIndex, CliError> {
        self.index.get(label).map(|&i| NodeIndex::new(i)).ok_or_else(|| {
            CliError::with_details(
                format!("vertex '{label}' is not in the graph"),
                "vertex labels are case-sensitive; `arbor search` lists them",
                "unknown_vertex",
            )
        })
    }

    fn build<Ty: EdgeType>(&self) -> Graph<String, (), Ty> {
        let mut graph = Graph::with_capacity(self.labels.len(), self.edges.len());
        for label in &self.labels {
            graph.add_node(label.clone());
        }
        for &(from, to) in &self.edges {
            graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
        }
        graph
    }

    pub fn to_petgraph(&self) -> LoadedGraph {
        if self.is_directed() {
            LoadedGraph::Directed(self.build())
        } else {
            LoadedGraph::Undirected(self.build())
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Label {
    Name(String),
    Number(serde_json::Number),
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        match label {
            Label::Name(name) => name,
            Label::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonGraph {
    #[serde(default)]
    directed: Option<bool>,
    #[serde(default)]
    vertices: Vec<Label>,
    #[serde(default)]
    edges: Vec<(Label, Label)>,
}

fn parse_json(content: &str) -> Result<LabeledGraph> {
    let doc: JsonGraph = serde_json::from_str(content)?;
    let mut graph = LabeledGraph {
        directed: doc.directed,
        ..LabeledGraph::default()
    };
    for label in doc.vertices {
        graph.intern(label.into());
    }
    for (from, to) in doc.edges {
        graph.add_edge(from.into(), to.into());
    }
    Ok(graph)
}

fn parse_edge_list(content: &str) -> Result<LabeledGraph> {
    let mut graph = LabeledGraph::default();
    for (number, line) in content.lines().enumerate() {
        let line = line.split_once('#').map_or(line, |(data, _)| data);
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [] => {}
            [single] => {
                graph.intern((*single).to_string());
            }
            [from, to] => graph.add_edge((*from).to_string(), (*to).to_string()),
            _ => bail!(
                "line {}: expected `a b`, found {} fields",
                number + 1,
                fields.len()
            ),
        }
    }
    Ok(graph)
}
