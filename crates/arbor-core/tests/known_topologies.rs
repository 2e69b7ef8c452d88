//! Hand-built graphs with known edge classifications.
//!
//! Besides petgraph storage these tests drive a small adjacency-list graph
//! with non-integer vertex ids, so the engines are exercised through the
//! trait alone.

use std::collections::HashMap;

use arbor_core::{
    Bfs, Control, Dfs, SearchEvent, SearchForest, SearchGraph, SearchNode, Visitor, visit_fn,
};

// ---------------------------------------------------------------------------
// Helper: adjacency list keyed by char
// ---------------------------------------------------------------------------

struct Letters {
    directed: bool,
    order: Vec<char>,
    adjacency: HashMap<char, Vec<char>>,
    edges: usize,
}

impl Letters {
    fn new(directed: bool, vertices: &str, edges: &[(char, char)]) -> Self {
        let order: Vec<char> = vertices.chars().collect();
        let mut adjacency: HashMap<char, Vec<char>> =
            order.iter().map(|&v| (v, Vec::new())).collect();
        for &(a, b) in edges {
            adjacency.entry(a).or_default().push(b);
            if !directed && a != b {
                adjacency.entry(b).or_default().push(a);
            }
        }
        Self {
            directed,
            order,
            adjacency,
            edges: edges.len(),
        }
    }
}

impl SearchGraph for Letters {
    type Vertex = char;

    fn vertex_count(&self) -> usize {
        self.order.len()
    }

    fn edge_count(&self) -> usize {
        self.edges
    }

    fn vertex_at(&self, index: usize) -> Option<char> {
        self.order.get(index).copied()
    }

    fn index_of(&self, vertex: char) -> Option<usize> {
        self.order.iter().position(|&v| v == vertex)
    }

    fn neighbors(&self, vertex: char) -> impl Iterator<Item = char> + '_ {
        self.adjacency.get(&vertex).into_iter().flatten().copied()
    }

    fn is_directed(&self) -> bool {
        self.directed
    }
}

/// Collects classified edges as `"ab"` strings.
#[derive(Default)]
struct Edges {
    tree: Vec<String>,
    back: Vec<String>,
    cross: Vec<String>,
}

fn pair(from: &SearchNode<char>, to: &SearchNode<char>) -> String {
    [from.vertex(), to.vertex()].iter().collect()
}

impl Visitor<char> for Edges {
    fn tree_edge(
        &mut self,
        _forest: &SearchForest<char>,
        from: &SearchNode<char>,
        to: &SearchNode<char>,
    ) -> Control {
        self.tree.push(pair(from, to));
        Control::Continue
    }

    fn back_edge(
        &mut self,
        _forest: &SearchForest<char>,
        from: &SearchNode<char>,
        to: &SearchNode<char>,
    ) -> Control {
        self.back.push(pair(from, to));
        Control::Continue
    }

    fn cross_edge(
        &mut self,
        _forest: &SearchForest<char>,
        from: &SearchNode<char>,
        to: &SearchNode<char>,
    ) -> Control {
        self.cross.push(pair(from, to));
        Control::Continue
    }
}

// ---------------------------------------------------------------------------
// BFS
// ---------------------------------------------------------------------------

#[test]
fn bfs_undirected_square_with_diagonal() {
    // a - b
    // | \ |
    // d - c
    let graph = Letters::new(
        false,
        "abcd",
        &[('a', 'b'), ('b', 'c'), ('c', 'd'), ('d', 'a'), ('a', 'c')],
    );
    let mut edges = Edges::default();
    let summary = Bfs::new(&graph).traverse(&mut edges);

    assert_eq!(edges.tree, vec!["ab", "ad", "ac"]);
    assert!(edges.back.is_empty());
    assert_eq!(edges.cross, vec!["bc", "dc"]);
    assert_eq!(summary.max_level(), 1);
}

#[test]
fn bfs_directed_diamond_with_return_edge() {
    // a -> b -> d -> a, a -> c -> d
    let graph = Letters::new(
        true,
        "abcd",
        &[('a', 'b'), ('a', 'c'), ('b', 'd'), ('c', 'd'), ('d', 'a')],
    );
    let mut edges = Edges::default();
    Bfs::new(&graph).traverse(&mut edges);

    assert_eq!(edges.tree, vec!["ab", "ac", "bd"]);
    assert_eq!(edges.cross, vec!["cd"]);
    assert_eq!(edges.back, vec!["da"]);
}

#[test]
fn bfs_records_expose_levels_and_parents() {
    let graph = Letters::new(false, "abcde", &[('a', 'b'), ('b', 'c'), ('c', 'd')]);
    let mut bfs = Bfs::new(&graph);
    let summary = bfs
        .traverse_from('b', &mut visit_fn(|_: &SearchForest<char>, _| Control::Continue))
        .unwrap_or_else(|err| panic!("traverse: {err}"));

    assert_eq!(summary.num_components(), 2);
    let d = bfs.node_of('d').unwrap_or_else(|| panic!("d not reached"));
    assert_eq!(d.level(), 2);
    assert_eq!(bfs.forest().path_to_root(d), vec!['b', 'c', 'd']);

    let e = bfs.node_of('e').unwrap_or_else(|| panic!("e not reached"));
    assert_eq!(e.component(), 1);
    assert!(e.is_root());
}

// ---------------------------------------------------------------------------
// DFS
// ---------------------------------------------------------------------------

#[test]
fn dfs_undirected_square_with_diagonal() {
    let graph = Letters::new(
        false,
        "abcd",
        &[('a', 'b'), ('b', 'c'), ('c', 'd'), ('d', 'a'), ('a', 'c')],
    );
    let mut edges = Edges::default();
    let summary = Dfs::new(&graph).traverse(&mut edges);

    assert_eq!(edges.tree, vec!["ab", "bc", "cd"]);
    assert_eq!(edges.back, vec!["da", "ca"]);
    assert!(edges.cross.is_empty());
    assert_eq!(summary.max_level(), 3);
}

#[test]
fn dfs_directed_forward_and_cross_edges() {
    // a -> b -> c, a -> c (forward), a -> d -> c (cross), c -> a (back)
    let graph = Letters::new(
        true,
        "abcd",
        &[('a', 'b'), ('b', 'c'), ('a', 'c'), ('a', 'd'), ('d', 'c'), ('c', 'a')],
    );
    let mut edges = Edges::default();
    Dfs::new(&graph).traverse(&mut edges);

    assert_eq!(edges.tree, vec!["ab", "bc", "ad"]);
    assert_eq!(edges.back, vec!["ca"]);
    assert_eq!(edges.cross, vec!["dc"]);
}

#[test]
fn dfs_break_on_first_back_edge() {
    let graph = Letters::new(
        false,
        "abcdef",
        &[('a', 'b'), ('b', 'c'), ('c', 'a'), ('d', 'e'), ('e', 'f'), ('f', 'd')],
    );
    let mut closing = None;
    let mut dfs = Dfs::new(&graph);
    let summary = dfs.traverse(&mut visit_fn(|forest: &SearchForest<char>, event| {
        if let SearchEvent::BackEdge { from, to } = event {
            closing = Some(forest.path_to_root(from).len() - to.level());
            return Control::Break;
        }
        Control::Continue
    }));

    assert!(summary.is_interrupted());
    assert_eq!(closing, Some(3));
    assert_eq!(dfs.num_components(), 1);
    assert!(dfs.node_of('d').is_none());
}

#[test]
fn unknown_start_vertex() {
    let graph = Letters::new(true, "ab", &[('a', 'b')]);
    let err = Dfs::new(&graph)
        .traverse_from('z', &mut Edges::default())
        .err()
        .map(|err| err.to_string());
    assert_eq!(err.as_deref(), Some("vertex not found in graph: 'z'"));
}
