//! Depth-first search engine.
//!
//! The traversal is iterative: one open frame per vertex on the current
//! path, each holding that vertex's neighbor iterator. The in-frontier flag
//! marks exactly the vertices on the current path, which makes back-edge
//! detection a bit lookup.
//!
//! A newly reached vertex gets its `tree_edge` callback, then its
//! `start_vertex`, and is expanded before the parent looks at its next
//! neighbor. `finish_vertex` fires when the frame is popped.

use tracing::debug;

use crate::error::SearchError;
use crate::graph::SearchGraph;

use super::node::{NodeRef, SearchForest, SearchNode};
use super::visitor::{Control, Visitor};
use super::{EdgeKind, SearchState, SearchSummary, start_of};

/// Depth-first traversal of a [`SearchGraph`].
///
/// Like [`Bfs`](crate::Bfs), one engine can serve several sequential calls.
#[derive(Debug)]
pub struct Dfs<'g, G: SearchGraph> {
    graph: &'g G,
    state: SearchState<G::Vertex>,
}

impl<'g, G: SearchGraph> Dfs<'g, G> {
    #[must_use]
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            state: SearchState::default(),
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
        debug!(strategy = "dfs", vertices = self.graph.vertex_count(), start = ?start.0, "traversal started");

        let graph = self.graph;
        self.state.run_components(graph, start, |state, root| {
            expand_component(graph, state, root, visitor)
        });

        let summary = self.state.summary();
        debug!(
            strategy = "dfs",
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

    #[must_use]
    pub const fn num_components(&self) -> usize {
        self.state.components
    }

    #[must_use]
    pub const fn max_level(&self) -> usize {
        self.state.max_level
    }

    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        self.state.interrupted
    }

    #[must_use]
    pub const fn forest(&self) -> &SearchForest<G::Vertex> {
        &self.state.forest
    }

    #[must_use]
    pub fn node_of(&self, vertex: G::Vertex) -> Option<&SearchNode<G::Vertex>> {
        self.graph
            .index_of(vertex)
            .and_then(|index| self.state.forest.at_index(index))
    }
}

struct Frame<I> {
    node: NodeRef,
    neighbors: I,
    parent_skipped: bool,
}

fn expand_component<G, Vis>(
    graph: &G,
    state: &mut SearchState<G::Vertex>,
    root: NodeRef,
    visitor: &mut Vis,
) -> Control
where
    G: SearchGraph,
    Vis: Visitor<G::Vertex> + ?Sized,
{
    let directed = graph.is_directed();
    let root_node = state.forest[root];
    state.enter(root_node.index());

    if visitor.start_vertex(&state.forest, &root_node).is_break() {
        return Control::Break;
    }

    let mut stack = vec![Frame {
        node: root,
        neighbors: graph.neighbors(root_node.vertex()),
        parent_skipped: false,
    }];

    while let Some(frame) = stack.last_mut() {
        let node = state.forest[frame.node];

        let Some(next) = frame.neighbors.next() else {
            stack.pop();
            state.leave(node.index());
            if visitor.finish_vertex(&state.forest, &node).is_break() {
                return Control::Break;
            }
            continue;
        };
        let Some(next_index) = graph.index_of(next) else {
            continue;
        };

        let control = match state.reached(next_index) {
            None => {
                let child = state.child(node.id(), next, next_index);
                state.enter(next_index);
                let child_node = state.forest[child];
                state.expand_level(child_node.level());

                if visitor.tree_edge(&state.forest, &node, &child_node).is_break()
                    || visitor.start_vertex(&state.forest, &child_node).is_break()
                {
                    return Control::Break;
                }
                stack.push(Frame {
                    node: child,
                    neighbors: graph.neighbors(next),
                    parent_skipped: false,
                });
                Control::Continue
            }
            Some(other) => match classify(state, &node, other, directed, &mut frame.parent_skipped)
            {
                Some(EdgeKind::Back) => visitor.back_edge(&state.forest, &node, &state.forest[other]),
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

    Control::Continue
}

/// Classify `node -> other` where `other` already has a record.
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
    let other_node = &state.forest[other];

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

    // On the current path: an ancestor.
    if state.in_frontier(other_node.index()) {
        return Some(EdgeKind::Back);
    }

    // Finished descendant. Undirected: the back edge was already reported.
    if other_node.order() > node.order() {
        return None;
    }

    Some(EdgeKind::Cross)
}
