//! Depth-first search for the first qualifying cycle.

use arbor_core::{Control, Dfs, SearchError, SearchForest, SearchGraph, SearchNode, Visitor};
use tracing::trace;

use crate::cycle::Cycle;
use crate::query::CycleQuery;
use crate::reconstruct;

struct AnyCycle<'g, G: SearchGraph> {
    graph: &'g G,
    query: CycleQuery<G::Vertex>,
    found: Option<Cycle<G::Vertex>>,
}

impl<G: SearchGraph> Visitor<G::Vertex> for AnyCycle<'_, G> {
    fn start_vertex(
        &mut self,
        _forest: &SearchForest<G::Vertex>,
        node: &SearchNode<G::Vertex>,
    ) -> Control {
        // A targeted search is rooted at the target; other components
        // cannot hold a cycle through it.
        Control::break_if(self.query.target().is_some() && node.component() > 0)
    }

    fn tree_edge(
        &mut self,
        forest: &SearchForest<G::Vertex>,
        _from: &SearchNode<G::Vertex>,
        to: &SearchNode<G::Vertex>,
    ) -> Control {
        let Some(target) = self.query.target() else {
            return Control::Continue;
        };
        // Parallel edges to the target are 2-cycles, handled up front.
        if forest.parent_of(to).map(SearchNode::vertex) == Some(target) {
            return Control::Continue;
        }
        // The target is the root, so the tree path plus the closing edge has
        // `level + 1` vertices.
        if !self.query.accepts(to.level() + 1) || !self.graph.contains_edge(to.vertex(), target) {
            return Control::Continue;
        }

        trace!(len = to.level() + 1, "cycle closes at target");
        self.found = Some(Cycle::from_path(forest.path_to_root(to)));
        Control::Break
    }

    fn back_edge(
        &mut self,
        forest: &SearchForest<G::Vertex>,
        from: &SearchNode<G::Vertex>,
        to: &SearchNode<G::Vertex>,
    ) -> Control {
        if self.query.target().is_some() {
            return Control::Continue;
        }
        let len = reconstruct::back_edge_len(from, to);
        if !self.query.accepts(len) {
            return Control::Continue;
        }

        trace!(len, "back edge closes cycle");
        self.found = Some(reconstruct::back_edge(forest, from, to));
        Control::Break
    }
}

/// First cycle a depth-first search meets that satisfies `query`.
pub(crate) fn search<G: SearchGraph>(
    graph: &G,
    query: CycleQuery<G::Vertex>,
) -> Result<Option<Cycle<G::Vertex>>, SearchError> {
    let mut visitor = AnyCycle {
        graph,
        query,
        found: None,
    };
    let mut dfs = Dfs::new(graph);
    match query.target() {
        Some(target) => {
            dfs.traverse_from(target, &mut visitor)?;
        }
        None => {
            dfs.traverse(&mut visitor);
        }
    }
    Ok(visitor.found)
}
