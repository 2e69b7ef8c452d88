//! Breadth-first and depth-first search with edge classification.
//!
//! # Overview
//!
//! Both engines share the same shape:
//!
//! ```text
//! reset call state
//!   ↓
//! root record for the start vertex (level 0, component 0)
//!   ↓
//! drain frontier ── BFS: FIFO queue / DFS: stack of open frames
//!   │   start_vertex → tree/back/cross edges → finish_vertex
//!   ↓
//! frontier empty → next unvisited vertex in index order starts a new
//! component, until every vertex has a record
//! ```
//!
//! A callback returning [`Control::Break`](visitor::Control::Break) stops the
//! whole call; [`SearchSummary::is_interrupted`] reports it.
//!
//! # Edge kinds
//!
//! - **Tree**: the neighbor had no record yet.
//! - **Back**: the neighbor is an ancestor of (or equal to) the current
//!   vertex. In undirected graphs the edge back to the parent is skipped
//!   once, because it is the tree edge itself; further parallel copies are
//!   back edges.
//! - **Cross**: the neighbor was reached elsewhere and is not related to the
//!   current vertex by ancestry.
//! - **Forward** edges (to an already reached descendant) are never
//!   reported.

pub mod bfs;
pub mod dfs;
pub mod node;
pub mod visitor;

use std::fmt;

use fixedbitset::FixedBitSet;
use serde::Serialize;
use tracing::trace;

use crate::graph::SearchGraph;

use node::{NodeRef, SearchForest};
use visitor::Control;

/// Classification of an edge, as reported to visitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Tree,
    Back,
    Cross,
}

impl EdgeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Back => "back",
            Self::Cross => "cross",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statistics of the last traversal call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    /// Components discovered (including one cut short by an interruption).
    pub components: usize,
    /// Deepest level of any expanded vertex.
    pub max_level: usize,
    /// A visitor returned [`Control::Break`].
    pub interrupted: bool,
}

impl SearchSummary {
    #[must_use]
    pub const fn num_components(&self) -> usize {
        self.components
    }

    #[must_use]
    pub const fn max_level(&self) -> usize {
        self.max_level
    }

    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        self.interrupted
    }
}

/// Transient per-call state shared by both engines.
#[derive(Debug, Clone)]
pub(crate) struct SearchState<V> {
    pub(crate) forest: SearchForest<V>,
    /// Queued (BFS) or on the current path (DFS), by dense index.
    frontier: FixedBitSet,
    components: usize,
    max_level: usize,
    interrupted: bool,
    cursor: usize,
}

impl<V> Default for SearchState<V> {
    fn default() -> Self {
        Self {
            forest: SearchForest::default(),
            frontier: FixedBitSet::new(),
            components: 0,
            max_level: 0,
            interrupted: false,
            cursor: 0,
        }
    }
}

impl<V: Copy + PartialEq + fmt::Debug> SearchState<V> {
    pub(crate) fn reset(&mut self, vertex_count: usize) {
        self.forest.reset(vertex_count);
        self.frontier.clear();
        self.frontier.grow(vertex_count);
        self.components = 0;
        self.max_level = 0;
        self.interrupted = false;
        self.cursor = 0;
    }

    pub(crate) fn summary(&self) -> SearchSummary {
        SearchSummary {
            components: self.components,
            max_level: self.max_level,
            interrupted: self.interrupted,
        }
    }

    /// Open a new component rooted at `vertex`.
    pub(crate) fn root(&mut self, vertex: V, index: usize) -> NodeRef {
        let id = self.forest.push_root(self.components, vertex, index);
        self.components += 1;
        id
    }

    pub(crate) fn child(&mut self, parent: NodeRef, vertex: V, index: usize) -> NodeRef {
        self.forest.push_child(parent, vertex, index)
    }

    pub(crate) fn reached(&self, index: usize) -> Option<NodeRef> {
        self.forest.at_index(index).map(node::SearchNode::id)
    }

    pub(crate) fn enter(&mut self, index: usize) {
        self.frontier.insert(index);
    }

    pub(crate) fn leave(&mut self, index: usize) {
        self.frontier.set(index, false);
    }

    pub(crate) fn in_frontier(&self, index: usize) -> bool {
        self.frontier.contains(index)
    }

    pub(crate) fn expand_level(&mut self, level: usize) {
        self.max_level = self.max_level.max(level);
    }

    /// Next vertex without a record, scanning dense indices from the
    /// restart cursor.
    fn next_unvisited<G>(&mut self, graph: &G) -> Option<(V, usize)>
    where
        G: SearchGraph<Vertex = V>,
    {
        while self.cursor < graph.vertex_count() {
            let index = self.cursor;
            self.cursor += 1;
            if self.reached(index).is_none() {
                if let Some(vertex) = graph.vertex_at(index) {
                    return Some((vertex, index));
                }
            }
        }
        None
    }

    /// Run `expand` for the component of `start`, then for every component
    /// rooted at a still-unvisited vertex, unless a callback breaks.
    pub(crate) fn run_components<G, F>(&mut self, graph: &G, start: (V, usize), mut expand: F)
    where
        G: SearchGraph<Vertex = V>,
        F: FnMut(&mut Self, NodeRef) -> Control,
    {
        let mut next = Some(start);
        while let Some((vertex, index)) = next {
            let root = self.root(vertex, index);
            trace!(component = self.components - 1, vertex = ?vertex, "component started");
            if expand(self, root).is_break() {
                self.interrupted = true;
                return;
            }
            next = self.next_unvisited(graph);
        }
    }
}

/// Resolve the start vertex of a rooted call.
pub(crate) fn start_of<G: SearchGraph>(
    graph: &G,
    vertex: G::Vertex,
) -> Result<(G::Vertex, usize), crate::SearchError> {
    graph
        .index_of(vertex)
        .map(|index| (vertex, index))
        .ok_or_else(|| crate::SearchError::unknown_vertex(&vertex))
}
