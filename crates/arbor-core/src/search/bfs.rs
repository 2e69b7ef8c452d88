//! Breadth-first search engine.
//!
//! Vertices are expanded in discovery order, so a node's level is its
//! distance (in edges) from the component root. The in-frontier flag marks
//! vertices that are queued but not yet expanded.
//!
//! Non-tree edges seen while expanding `v`:
//!
//! | neighbor `u`                       | directed          | undirected        |
//! |------------------------------------|-------------------|-------------------|
//! | `u == v`                           | back              | back              |
//! | parent of `v`                      | back              | skip once, then back |
//! | queued, child of `v`               | forward (hidden)  | hidden, reported from `u` |
//! | queued, otherwise                  | cross             | cross             |
//! | expanded, ancestor of `v`          | back              | hidden            |
//! | expanded, otherwise                | cross             | hidden            |
//!
//! In the undirected case every "hidden" edge was already reported while the
//! other endpoint was expanded.

use std::collections::VecDeque;

use tracing::debug;

use crate::error::SearchError;
use crate::graph::SearchGraph;

use super::node::{NodeRef, SearchForest, SearchNode};
use super::visitor::{Control, Visitor};
use super::{EdgeKind, SearchState, SearchSummary, start_of};

/// Breadth-first traversal of a [`SearchGraph`].
///
/// The engine can be reused for several sequential calls; each call resets
/// the previous call's records and statistics.
#[derive(Debug)]
pub struct Bfs<'g, G: SearchGraph> {
    graph: &'g G,
    state: SearchState<G::Vertex>,
    queue: VecDeque<NodeRef>,
}

impl<'g, G: SearchGraph> Bfs<'g, G> {
    #[must_use]
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            state: SearchState::default(),
            queue: VecDeque::new(),
        }
    }

    /// Traverse from `start`, then from every vertex left unvisited.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownVertex`] if `start` is not in the graph.
    pub fn traverse_from<Vis>(
        &mut self,
        start: G::Vertex,
        visitor: &mut Vis,
    ) -> Result<SearchSummary, SearchError>
    where
        Vis: Visitor<G::Vertex> + ?Sized,
    {
        let start = start_of(self.graph, start)?;
        self.state.reset(self.graph.vertex_count());
        self.run(start, visitor);
        Ok(self.state.summary())
    }

    /// Traverse the whole graph starting at its first vertex.
    ///
    /// Does nothing on an empty graph.
    pub fn traverse<Vis>(&mut self, visitor: &mut Vis) -> SearchSummary
    where
        Vis: Visitor<G::Vertex> + ?Sized,
    {
        self.state.reset(self.graph.vertex_count());
        if let Some(first) = self.graph.vertex_at(0) {
            self.run((first, 0), visitor);
        }
        self.state.summary()
    }

    fn run<Vis>(&mut self, start: (G::Vertex, usize), visitor: &mut Vis)
    where
        Vis: Visitor<G::Vertex> + ?Sized,
    {
        debug!(strategy = "bfs", vertices = self.graph.vertex_count(), start = ?start.0, "traversal started");

        let graph = self.graph;
        let queue = &mut self.queue;
        self.state.run_components(graph, start, |state, root| {
            expand_component(graph, state, queue, root, visitor)
        });

        let summary = self.state.summary();
        debug!(
            strategy = "bfs",
            components = summary.components,
            max_level = summary.max_level,
            interrupted = summary.interrupted,
            "traversal finished"
        );
    }

    #[must_use]
    pub fn summary(&self) -> SearchSummary {
        self.state.summary()
    }

    /// Components discovered by the last call.
    #[must_use]
    pub const fn num_components(&self) -> usize {
        self.state.components
    }

    /// Deepest level expanded by the last call.
    #[must_use]
    pub const fn max_level(&self) -> usize {
        self.state.max_level
    }

    /// Whether the last call was cut short by a visitor.
    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        self.state.interrupted
    }

    /// Position records of the last call.
    #[must_use]
    pub const fn forest(&self) -> &SearchForest<G::Vertex> {
        &self.state.forest
    }

    /// Record of `vertex` from the last call, if it was reached.
    #[must_use]
    pub fn node_of(&self, vertex: G::Vertex) -> Option<&SearchNode<G::Vertex>> {
        self.graph
            .index_of(vertex)
            .and_then(|index| self.state.forest.at_index(index))
    }
}

/// Drain the queue for one component.
fn expand_component<G, Vis>(
    graph: &G,
    state: &mut SearchState<G::Vertex>,
    queue: &mut VecDeque<NodeRef>,
    root: NodeRef,
    visitor: &mut Vis,
) -> Control
where
    G: SearchGraph,
    Vis: Visitor<G::Vertex> + ?Sized,
{
    let directed = graph.is_directed();
    queue.clear();
    queue.push_back(root);
    state.enter(state.forest[root].index());

    while let Some(current) = queue.pop_front() {
        let node = state.forest[current];
        state.leave(node.index());
        state.expand_level(node.level());

        if visitor.start_vertex(&state.forest, &node).is_break() {
            return Control::Break;
        }

        let mut parent_skipped = false;
        for next in graph.neighbors(node.vertex()) {
            let Some(next_index) = graph.index_of(next) else {
                continue;
            };

            let control = match state.reached(next_index) {
                None => {
                    let child = state.child(current, next, next_index);
                    state.enter(next_index);
                    queue.push_back(child);
                    visitor.tree_edge(&state.forest, &node, &state.forest[child])
                }
                Some(other) => match classify(state, &node, other, directed, &mut parent_skipped) {
                    Some(EdgeKind::Back) => {
                        visitor.back_edge(&state.forest, &node, &state.forest[other])
                    }
                    Some(EdgeKind::Cross) => {
                        visitor.cross_edge(&state.forest, &node, &state.forest[other])
                    }
                    Some(EdgeKind::Tree) | None => Control::Continue,
                },
            };

            if control.is_break() {
                return Control::Break;
            }
        }

        if visitor.finish_vertex(&state.forest, &node).is_break() {
            return Control::Break;
        }
    }

    Control::Continue
}

/// Classify the edge `node -> other` where `other` already has a record.
/// `None` means the edge is not reported.
fn classify<V>(
    state: &SearchState<V>,
    node: &SearchNode<V>,
    other: NodeRef,
    directed: bool,
    parent_skipped: &mut bool,
) -> Option<EdgeKind>
where
    V: Copy + PartialEq + std::fmt::Debug,
{
    let forest = &state.forest;
    let other_node = &forest[other];

    if other == node.id() {
        return Some(EdgeKind::Back);
    }

    if Some(other) == node.parent() {
        if directed || *parent_skipped {
            return Some(EdgeKind::Back);
        }
        *parent_skipped = true;
        return None;
    }

    if state.in_frontier(other_node.index()) {
        // Queued: discovered after `node`, so never its ancestor.
        if other_node.parent() == Some(node.id()) {
            return None;
        }
        if directed && forest.is_ancestor(node, other_node) {
            return None;
        }
        return Some(EdgeKind::Cross);
    }

    if !directed {
        return None;
    }

    if forest.is_ancestor(other_node, node) {
        Some(EdgeKind::Back)
    } else {
        Some(EdgeKind::Cross)
    }
}
