//! Property tests: forest shape and edge accounting on random multigraphs.

use petgraph::algo::{dijkstra, is_cyclic_directed, is_cyclic_undirected};
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use proptest::prelude::*;

use arbor_core::{Bfs, Control, Dfs, SearchForest, SearchGraph, SearchNode, Visitor};

#[derive(Debug, Default)]
struct Tally {
    starts: usize,
    finishes: usize,
    tree: usize,
    back: usize,
    cross: usize,
}

impl<V> Visitor<V> for Tally {
    fn start_vertex(&mut self, _forest: &SearchForest<V>, _node: &SearchNode<V>) -> Control {
        self.starts += 1;
        Control::Continue
    }

    fn tree_edge(&mut self, _: &SearchForest<V>, _: &SearchNode<V>, _: &SearchNode<V>) -> Control {
        self.tree += 1;
        Control::Continue
    }

    fn back_edge(&mut self, _: &SearchForest<V>, _: &SearchNode<V>, _: &SearchNode<V>) -> Control {
        self.back += 1;
        Control::Continue
    }

    fn cross_edge(&mut self, _: &SearchForest<V>, _: &SearchNode<V>, _: &SearchNode<V>) -> Control {
        self.cross += 1;
        Control::Continue
    }

    fn finish_vertex(&mut self, _forest: &SearchForest<V>, _node: &SearchNode<V>) -> Control {
        self.finishes += 1;
        Control::Continue
    }
}

/// Vertex count and an edge list over it (self-loops and parallel edges
/// allowed).
fn arb_edges() -> impl Strategy<Value = (usize, Vec<(u32, u32)>)> {
    (1_usize..12).prop_flat_map(|n| {
        let bound = u32::try_from(n).unwrap_or(u32::MAX);
        (Just(n), prop::collection::vec((0..bound, 0..bound), 0..24))
    })
}

fn undirected(n: usize, edges: &[(u32, u32)]) -> UnGraph<(), ()> {
    let mut graph = UnGraph::with_capacity(n, edges.len());
    for _ in 0..n {
        graph.add_node(());
    }
    graph.extend_with_edges(edges.iter().copied());
    graph
}

fn directed(n: usize, edges: &[(u32, u32)]) -> DiGraph<(), ()> {
    let mut graph = DiGraph::with_capacity(n, edges.len());
    for _ in 0..n {
        graph.add_node(());
    }
    graph.extend_with_edges(edges.iter().copied());
    graph
}

fn assert_forest_shape<V: Copy + PartialEq>(forest: &SearchForest<V>, vertex_count: usize) {
    assert_eq!(forest.len(), vertex_count, "every vertex gets exactly one record");
    for (order, node) in forest.iter().enumerate() {
        assert_eq!(node.order(), order);
        match forest.parent_of(node) {
            Some(parent) => {
                assert!(parent.order() < node.order());
                assert_eq!(parent.level() + 1, node.level());
                assert_eq!(parent.component(), node.component());
            }
            None => assert_eq!(node.level(), 0),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn dfs_undirected_reports_every_edge_once((n, edges) in arb_edges()) {
        let graph = undirected(n, &edges);
        let mut tally = Tally::default();
        let mut dfs = Dfs::new(&graph);
        let summary = dfs.traverse(&mut tally);

        assert_forest_shape(dfs.forest(), n);
        prop_assert_eq!(tally.tree + tally.back, SearchGraph::edge_count(&graph));
        prop_assert_eq!(tally.cross, 0);
        prop_assert_eq!(tally.starts, n);
        prop_assert_eq!(tally.finishes, n);
        prop_assert_eq!(tally.tree + summary.num_components(), n);
        prop_assert_eq!(tally.back > 0, is_cyclic_undirected(&graph));
    }

    #[test]
    fn bfs_undirected_reports_every_edge_once((n, edges) in arb_edges()) {
        let graph = undirected(n, &edges);
        let mut tally = Tally::default();
        let mut bfs = Bfs::new(&graph);
        bfs.traverse(&mut tally);

        assert_forest_shape(bfs.forest(), n);
        prop_assert_eq!(
            tally.tree + tally.back + tally.cross,
            SearchGraph::edge_count(&graph)
        );
        prop_assert_eq!(tally.back + tally.cross > 0, is_cyclic_undirected(&graph));
    }

    #[test]
    fn dfs_directed_back_edges_iff_cyclic((n, edges) in arb_edges()) {
        let graph = directed(n, &edges);
        let mut tally = Tally::default();
        let mut dfs = Dfs::new(&graph);
        dfs.traverse(&mut tally);

        assert_forest_shape(dfs.forest(), n);
        prop_assert!(tally.tree + tally.back + tally.cross <= edges.len());
        prop_assert_eq!(tally.back > 0, is_cyclic_directed(&graph));
    }

    #[test]
    fn bfs_levels_are_shortest_distances((n, edges) in arb_edges(), directed_graph in any::<bool>()) {
        let start = NodeIndex::new(0);
        if directed_graph {
            let graph = directed(n, &edges);
            let mut bfs = Bfs::new(&graph);
            bfs.traverse_from(start, &mut Tally::default())
                .unwrap_or_else(|err| panic!("traverse: {err}"));
            let distances = dijkstra(&graph, start, None, |_| 1_usize);
            for node in bfs.forest().iter().filter(|node| node.component() == 0) {
                prop_assert_eq!(distances.get(&node.vertex()).copied(), Some(node.level()));
            }
        } else {
            let graph = undirected(n, &edges);
            let mut bfs = Bfs::new(&graph);
            bfs.traverse_from(start, &mut Tally::default())
                .unwrap_or_else(|err| panic!("traverse: {err}"));
            let distances = dijkstra(&graph, start, None, |_| 1_usize);
            for node in bfs.forest().iter().filter(|node| node.component() == 0) {
                prop_assert_eq!(distances.get(&node.vertex()).copied(), Some(node.level()));
            }
            prop_assert_eq!(
                bfs.forest().iter().filter(|node| node.component() == 0).count(),
                distances.len()
            );
        }
    }
}
