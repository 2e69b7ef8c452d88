//! Cycles of length 1 and 2, which the traversal either cannot produce or
//! would only reach late: self-loops, opposite arcs and parallel edges.

use std::collections::HashSet;

use arbor_core::SearchGraph;
use tracing::debug;

use crate::cycle::Cycle;
use crate::query::CycleQuery;

/// Shortest special-case cycle allowed by `query`, scoped to its target if
/// it has one. Self-loops win over 2-cycles.
pub(crate) fn check<G: SearchGraph>(
    graph: &G,
    query: &CycleQuery<G::Vertex>,
) -> Option<Cycle<G::Vertex>> {
    let scope: Vec<G::Vertex> = match query.target() {
        Some(target) => vec![target],
        None => graph.vertices().collect(),
    };

    let found = self_loop(graph, query, &scope).or_else(|| two_cycle(graph, query, &scope));
    if let Some(cycle) = &found {
        debug!(len = cycle.len(), "special-case cycle");
    }
    found
}

fn self_loop<G: SearchGraph>(
    graph: &G,
    query: &CycleQuery<G::Vertex>,
    scope: &[G::Vertex],
) -> Option<Cycle<G::Vertex>> {
    if !graph.allows_self_loops() || !query.accepts(1) {
        return None;
    }
    scope
        .iter()
        .find(|&&v| graph.neighbors(v).any(|u| u == v))
        .map(|&v| Cycle::from_path(vec![v]))
}

fn two_cycle<G: SearchGraph>(
    graph: &G,
    query: &CycleQuery<G::Vertex>,
    scope: &[G::Vertex],
) -> Option<Cycle<G::Vertex>> {
    if !query.accepts(2) {
        return None;
    }

    if graph.is_directed() {
        // Opposite arcs v -> u -> v.
        return scope.iter().find_map(|&v| {
            graph
                .neighbors(v)
                .find(|&u| u != v && graph.contains_edge(u, v))
                .map(|u| Cycle::from_path(vec![v, u]))
        });
    }

    if !graph.allows_multi_edges() {
        return None;
    }

    // Parallel edges show up as a repeated neighbor.
    scope.iter().find_map(|&v| {
        let mut seen = HashSet::new();
        graph
            .neighbors(v)
            .find(|&u| u != v && !seen.insert(u))
            .map(|u| Cycle::from_path(vec![v, u]))
    })
}
