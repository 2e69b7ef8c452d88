//! Breadth-first search for a shortest qualifying cycle.
//!
//! Each search is rooted at a target vertex and only accepts cycles through
//! it: back edges into the root, and (undirected only) cross edges whose
//! endpoints meet first at the root. Because levels are distances from the
//! root, the first such edge at a given depth closes a shortest cycle
//! through the root. Untargeted queries repeat this for every vertex that
//! can lie on a cycle and keep the overall best.

use arbor_core::{Bfs, Control, SearchError, SearchForest, SearchGraph, SearchNode, Visitor};
use tracing::trace;

use crate::cycle::Cycle;
use crate::query::CycleQuery;
use crate::reconstruct;

struct ShortestCycle<V> {
    root: V,
    directed: bool,
    query: CycleQuery<V>,
    best: Option<Cycle<V>>,
}

impl<V: Copy + Eq> ShortestCycle<V> {
    fn best_len(&self) -> Option<usize> {
        self.best.as_ref().map(Cycle::len)
    }

    /// Nothing shorter than the traversal floor can show up.
    fn is_settled(&self) -> bool {
        self.best_len()
            .is_some_and(|len| len <= self.query.traversal_floor())
    }

    /// Keep `len` if it beats the best so far; ties keep the earlier find.
    fn improves(&self, len: usize) -> bool {
        self.query.accepts(len) && self.best_len().is_none_or(|best| len < best)
    }

    fn offer(&mut self, cycle: Cycle<V>) -> Control {
        trace!(len = cycle.len(), "shorter cycle");
        self.best = Some(cycle);
        Control::break_if(self.is_settled())
    }
}

impl<V: Copy + Eq> Visitor<V> for ShortestCycle<V> {
    fn start_vertex(
        &mut self,
        _forest: &SearchForest<V>,
        node: &SearchNode<V>,
    ) -> Control {
        if node.component() > 0 {
            return Control::Break;
        }
        // Shortest cycle still reachable from this depth on.
        let reachable = if self.directed {
            node.level() + 1
        } else {
            2 * node.level() + 1
        };
        Control::break_if(self.best_len().is_some_and(|best| best <= reachable))
    }

    fn back_edge(
        &mut self,
        forest: &SearchForest<V>,
        from: &SearchNode<V>,
        to: &SearchNode<V>,
    ) -> Control {
        let len = reconstruct::back_edge_len(from, to);
        if to.vertex() != self.root || !self.improves(len) {
            return Control::Continue;
        }
        self.offer(reconstruct::back_edge(forest, from, to))
    }

    fn cross_edge(
        &mut self,
        forest: &SearchForest<V>,
        from: &SearchNode<V>,
        to: &SearchNode<V>,
    ) -> Control {
        if self.directed {
            return Control::Continue;
        }
        let Some(top) = forest.nearest_ancestor(from, to) else {
            return Control::Continue;
        };
        let len = reconstruct::cross_edge_len(from, to, top);
        if top.vertex() != self.root || !self.improves(len) {
            return Control::Continue;
        }
        self.offer(reconstruct::cross_edge(forest, from, to, top))
    }
}

/// A shortest cycle satisfying `query`.
pub(crate) fn search<G: SearchGraph>(
    graph: &G,
    query: CycleQuery<G::Vertex>,
) -> Result<Option<Cycle<G::Vertex>>, SearchError> {
    let directed = graph.is_directed();
    let roots: Vec<G::Vertex> = match query.target() {
        Some(target) => vec![target],
        None => graph
            .vertices()
            .filter(|&v| {
                let degree = graph.degree(v);
                if directed { degree >= 1 } else { degree >= 2 }
            })
            .collect(),
    };

    let Some(&first) = roots.first() else {
        return Ok(None);
    };
    let mut visitor = ShortestCycle {
        root: first,
        directed,
        query,
        best: None,
    };
    let mut bfs = Bfs::new(graph);
    for root in roots {
        visitor.root = root;
        bfs.traverse_from(root, &mut visitor)?;
        if visitor.is_settled() {
            break;
        }
    }
    Ok(visitor.best)
}
