//! Public cycle operations.

use arbor_core::{Control, Dfs, SearchError, SearchEvent, SearchForest, SearchGraph, visit_fn};
use tracing::{debug, instrument};

use crate::cycle::Cycle;
use crate::query::{CycleQuery, Parity, Strategy};
use crate::{any, shortest, special};

/// Cycle detection over a borrowed graph.
///
/// The finder holds no search state: every operation builds its own
/// [`CycleQuery`] and engine, so one finder can serve any number of calls,
/// including from several threads when the graph is `Sync`.
///
/// ```rust
/// use arbor_cycles::CycleFinder;
/// use petgraph::graph::{NodeIndex, UnGraph};
///
/// let mut graph = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 0)]);
/// graph.add_node(());
///
/// let finder = CycleFinder::new(&graph);
/// assert!(finder.contains_cycle());
/// assert_eq!(finder.find_shortest_cycle().map(|c| c.len()), Some(3));
/// assert_eq!(finder.find_odd_cycle().map(|c| c.len()), Some(3));
/// assert!(finder.find_even_cycle().is_none());
/// assert!(finder.find_any_cycle_through(NodeIndex::new(3))?.is_none());
/// # Ok::<(), arbor_core::SearchError>(())
/// ```
#[derive(Debug)]
pub struct CycleFinder<'g, G> {
    graph: &'g G,
}

impl<G> Clone for CycleFinder<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for CycleFinder<'_, G> {}

impl<'g, G: SearchGraph> CycleFinder<'g, G> {
    #[must_use]
    pub const fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    #[must_use]
    pub const fn graph(&self) -> &'g G {
        self.graph
    }

    /// Whether the graph has any cycle.
    #[must_use]
    #[instrument(level = "debug", skip_all)]
    pub fn contains_cycle(&self) -> bool {
        let graph = self.graph;
        let vertices = graph.vertex_count();

        // An undirected forest has fewer edges than vertices.
        if !graph.is_directed() && vertices > 0 && graph.edge_count() >= vertices {
            debug!(vertices, edges = graph.edge_count(), "too many edges for a forest");
            return true;
        }
        if special::check(graph, &CycleQuery::any()).is_some() {
            return true;
        }

        Dfs::new(graph)
            .traverse(&mut visit_fn(|_: &SearchForest<G::Vertex>, event| {
                Control::break_if(matches!(event, SearchEvent::BackEdge { .. }))
            }))
            .is_interrupted()
    }

    /// Whether the graph has no cycle at all.
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        !self.contains_cycle()
    }

    /// Some cycle, found depth-first.
    #[must_use]
    pub fn find_any_cycle(&self) -> Option<Cycle<G::Vertex>> {
        self.find_untargeted(CycleQuery::any())
    }

    /// Some cycle through `target`, found depth-first.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownVertex`] if `target` is not in the graph.
    pub fn find_any_cycle_through(
        &self,
        target: G::Vertex,
    ) -> Result<Option<Cycle<G::Vertex>>, SearchError> {
        self.find(&CycleQuery::any().through(target))
    }

    /// A cycle of minimum length.
    #[must_use]
    pub fn find_shortest_cycle(&self) -> Option<Cycle<G::Vertex>> {
        self.find_untargeted(CycleQuery::shortest())
    }

    /// A cycle of minimum length among those through `target`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownVertex`] if `target` is not in the graph.
    pub fn find_shortest_cycle_through(
        &self,
        target: G::Vertex,
    ) -> Result<Option<Cycle<G::Vertex>>, SearchError> {
        self.find(&CycleQuery::shortest().through(target))
    }

    /// A cycle with an odd number of vertices.
    ///
    /// For undirected graphs `None` means the graph is bipartite. For
    /// directed graphs only cycles closed by a single back edge of the
    /// depth-first tree are considered, so an odd cycle can be missed when
    /// the back edge that would reach it closes an even one instead.
    #[must_use]
    pub fn find_odd_cycle(&self) -> Option<Cycle<G::Vertex>> {
        self.find_untargeted(CycleQuery::any().with_parity(Parity::Odd))
    }

    /// A cycle with an even number of vertices.
    ///
    /// Only cycles closed by a single back edge of the depth-first tree are
    /// considered, so an even cycle that only exists as a combination of
    /// several such cycles is not found.
    #[must_use]
    pub fn find_even_cycle(&self) -> Option<Cycle<G::Vertex>> {
        self.find_untargeted(CycleQuery::any().with_parity(Parity::Even))
    }

    /// Length of the shortest cycle, `None` for an acyclic graph.
    #[must_use]
    pub fn girth(&self) -> Option<usize> {
        self.find_shortest_cycle().map(|cycle| cycle.len())
    }

    /// Run `query`.
    ///
    /// Cycles of length 1 and 2 (self-loops, opposite arcs, parallel edges)
    /// are looked for first without any traversal; the query's strategy
    /// only runs when none of those qualifies.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownVertex`] if the query targets a vertex
    /// that is not in the graph.
    #[instrument(level = "debug", skip_all, fields(strategy = ?query.strategy(), parity = ?query.parity()))]
    pub fn find(
        &self,
        query: &CycleQuery<G::Vertex>,
    ) -> Result<Option<Cycle<G::Vertex>>, SearchError> {
        if let Some(target) = query.target() {
            if !self.graph.contains_vertex(target) {
                return Err(SearchError::unknown_vertex(&target));
            }
        }

        let found = match special::check(self.graph, query) {
            Some(cycle) => Some(cycle),
            None => match query.strategy() {
                Strategy::Any => any::search(self.graph, *query)?,
                Strategy::Shortest => shortest::search(self.graph, *query)?,
            },
        };

        match &found {
            Some(cycle) => {
                debug!(len = cycle.len(), "cycle found");
                self.debug_check(query, cycle);
            }
            None => debug!("no qualifying cycle"),
        }
        Ok(found)
    }

    /// Untargeted queries cannot fail.
    fn find_untargeted(&self, query: CycleQuery<G::Vertex>) -> Option<Cycle<G::Vertex>> {
        debug_assert!(query.target().is_none());
        self.find(&query).ok().flatten()
    }

    fn debug_check(&self, query: &CycleQuery<G::Vertex>, cycle: &Cycle<G::Vertex>) {
        debug_assert!(query.accepts(cycle.len()), "cycle of length {} breaks parity", cycle.len());
        debug_assert!(
            query.target().is_none_or(|target| cycle.contains(&target)),
            "cycle misses its target"
        );
        debug_assert!(cycle.is_valid(self.graph), "not a cycle of the graph: {cycle:?}");
    }
}

#[cfg(test)]
mod tests {
    use petgraph::graph::{DiGraph, NodeIndex, UnGraph};

    use super::*;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn indices(cycle: Option<Cycle<NodeIndex>>) -> Option<Vec<usize>> {
        cycle.map(|c| c.iter().map(|v| v.index()).collect())
    }

    #[test]
    fn directed_two_cycle() {
        let graph = DiGraph::<(), ()>::from_edges([(0, 1), (1, 0)]);
        let finder = CycleFinder::new(&graph);

        assert_eq!(indices(finder.find_any_cycle()), Some(vec![0, 1]));
        assert_eq!(indices(finder.find_shortest_cycle()), Some(vec![0, 1]));
        assert!(finder.find_odd_cycle().is_none());
        assert_eq!(finder.girth(), Some(2));
    }

    #[test]
    fn triangle_with_isolated_vertex() {
        let mut graph = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 0)]);
        graph.add_node(());
        let finder = CycleFinder::new(&graph);

        assert!(finder.contains_cycle());
        assert!(!finder.is_acyclic());
        let shortest = finder.find_shortest_cycle();
        assert_eq!(shortest.as_ref().map(Cycle::len), Some(3));
        assert!(finder.find_even_cycle().is_none());
    }

    #[test]
    fn self_loop_wins_everywhere() {
        let graph = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 5)]);
        let finder = CycleFinder::new(&graph);

        assert_eq!(indices(finder.find_any_cycle()), Some(vec![5]));
        assert_eq!(indices(finder.find_shortest_cycle()), Some(vec![5]));
        assert_eq!(indices(finder.find_odd_cycle()), Some(vec![5]));
        assert_eq!(finder.girth(), Some(1));
    }

    #[test]
    fn forest_has_no_cycle() {
        let graph = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (1, 3), (4, 5)]);
        let finder = CycleFinder::new(&graph);

        assert!(!finder.contains_cycle());
        assert!(finder.is_acyclic());
        assert!(finder.find_any_cycle().is_none());
        assert!(finder.find_shortest_cycle().is_none());
        assert_eq!(finder.girth(), None);
    }

    #[test]
    fn directed_acyclic_despite_many_edges() {
        let graph = DiGraph::<(), ()>::from_edges([(0, 1), (0, 2), (1, 2), (0, 3), (1, 3), (2, 3)]);
        let finder = CycleFinder::new(&graph);

        assert!(!finder.contains_cycle());
        assert!(finder.find_any_cycle().is_none());
        assert!(finder.find_shortest_cycle().is_none());
    }

    #[test]
    fn directed_cycle_behind_cross_edges() {
        // From 0, every edge of the cycle 1 -> 3 -> 2 -> 4 -> 1 is a tree or
        // cross edge of the first search.
        let graph = DiGraph::<(), ()>::from_edges([(0, 1), (0, 2), (1, 3), (3, 2), (2, 4), (4, 1)]);
        let finder = CycleFinder::new(&graph);

        let cycle = finder.find_shortest_cycle();
        assert_eq!(cycle.as_ref().map(Cycle::len), Some(4));
        assert!(cycle.is_some_and(|c| c.is_valid(&graph)));
    }

    #[test]
    fn shortest_beats_first_found() {
        // A 6-cycle 0..5 with a chord 2-5 splitting off the square 2-3-4-5.
        let graph =
            UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (2, 5)]);
        let finder = CycleFinder::new(&graph);

        assert_eq!(finder.girth(), Some(4));
        let through_zero = finder
            .find_shortest_cycle_through(n(0))
            .unwrap_or_else(|err| panic!("find: {err}"));
        assert_eq!(through_zero.as_ref().map(Cycle::len), Some(4));
        assert!(through_zero.is_some_and(|c| c.contains(&n(0))));
    }

    #[test]
    fn targeted_search_stays_on_target() {
        // Triangle 0-1-2 with a tail 2-3-4.
        let graph = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)]);
        let finder = CycleFinder::new(&graph);

        let through_one = finder
            .find_any_cycle_through(n(1))
            .unwrap_or_else(|err| panic!("find: {err}"));
        assert!(through_one.as_ref().is_some_and(|c| c.contains(&n(1))));
        assert_eq!(through_one.map(|c| c.len()), Some(3));

        let through_tail = finder
            .find_any_cycle_through(n(4))
            .unwrap_or_else(|err| panic!("find: {err}"));
        assert!(through_tail.is_none());
        let through_tail = finder
            .find_shortest_cycle_through(n(3))
            .unwrap_or_else(|err| panic!("find: {err}"));
        assert!(through_tail.is_none());
    }

    #[test]
    fn unknown_target_is_an_error() {
        let graph = UnGraph::<(), ()>::from_edges([(0, 1)]);
        let finder = CycleFinder::new(&graph);

        assert_eq!(
            finder.find_any_cycle_through(n(5)),
            Err(SearchError::UnknownVertex("NodeIndex(5)".to_string()))
        );
        assert!(finder.find_shortest_cycle_through(n(2)).is_err());
    }

    #[test]
    fn odd_cycle_in_non_bipartite_graph() {
        // Square 0-1-2-3 plus a pendant triangle 3-4-5.
        let graph =
            UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 3), (3, 0), (3, 4), (4, 5), (5, 3)]);
        let finder = CycleFinder::new(&graph);

        let odd = finder.find_odd_cycle();
        assert_eq!(odd.as_ref().map(Cycle::len), Some(3));
        let even = finder.find_even_cycle();
        assert_eq!(even.as_ref().map(Cycle::len), Some(4));

        let odd_shortest = finder
            .find(&CycleQuery::shortest().with_parity(Parity::Odd))
            .unwrap_or_else(|err| panic!("find: {err}"));
        assert_eq!(odd_shortest.map(|c| c.len()), Some(3));
    }

    #[test]
    fn parallel_edges_under_parity() {
        let graph = UnGraph::<(), ()>::from_edges([(0, 1), (0, 1), (1, 2), (2, 0)]);
        let finder = CycleFinder::new(&graph);

        assert_eq!(finder.find_even_cycle().map(|c| c.len()), Some(2));
        assert_eq!(finder.find_odd_cycle().map(|c| c.len()), Some(3));
        assert_eq!(finder.girth(), Some(2));
    }
}
