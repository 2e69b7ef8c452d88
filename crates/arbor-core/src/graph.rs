//! The graph contract consumed by the search engines.
//!
//! Storage is not owned by this crate. Anything that can enumerate vertices
//! in a stable order, map them to dense indices and list neighbors can be
//! searched. An implementation for [`petgraph::Graph`] (directed and
//! undirected) is provided.
//!
//! # Dense indices
//!
//! `index_of` must map every vertex to a unique index in
//! `0..vertex_count()`, and `vertex_at` must be its inverse. The engines
//! size their per-call tables from `vertex_count()` and restart new
//! components by scanning indices in increasing order, so enumeration order
//! is index order.
//!
//! # Neighbors
//!
//! `neighbors(v)` yields one item per edge incident to `v` (outgoing edges
//! for directed graphs). Parallel edges therefore repeat a neighbor, and an
//! undirected self-loop yields `v` once.

use std::fmt;
use std::hash::Hash;

use petgraph::graph::{Graph, IndexType, NodeIndex};
use petgraph::EdgeType;

/// Read-only view of a graph that [`Bfs`](crate::Bfs) and
/// [`Dfs`](crate::Dfs) can walk.
pub trait SearchGraph {
    /// Vertex identifier. Cheap to copy and compare.
    type Vertex: Copy + Eq + Hash + fmt::Debug;

    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of edges, counting each parallel edge and self-loop once.
    fn edge_count(&self) -> usize;

    /// Vertex with dense index `index`, if any.
    fn vertex_at(&self, index: usize) -> Option<Self::Vertex>;

    /// Dense index of `vertex`, or `None` if it is not part of the graph.
    fn index_of(&self, vertex: Self::Vertex) -> Option<usize>;

    /// Neighbors of `vertex`, one item per edge.
    fn neighbors(&self, vertex: Self::Vertex) -> impl Iterator<Item = Self::Vertex> + '_;

    /// Whether edges have a direction.
    fn is_directed(&self) -> bool;

    /// Whether the storage admits self-loops.
    fn allows_self_loops(&self) -> bool {
        true
    }

    /// Whether the storage admits several edges between the same endpoints.
    fn allows_multi_edges(&self) -> bool {
        true
    }

    /// All vertices in dense-index order.
    fn vertices(&self) -> impl Iterator<Item = Self::Vertex> + '_ {
        (0..self.vertex_count()).filter_map(|index| self.vertex_at(index))
    }

    fn contains_vertex(&self, vertex: Self::Vertex) -> bool {
        self.index_of(vertex).is_some()
    }

    /// Number of neighbor entries of `vertex`.
    fn degree(&self, vertex: Self::Vertex) -> usize {
        self.neighbors(vertex).count()
    }

    /// Whether an edge `from -> to` exists (either orientation when
    /// undirected).
    fn contains_edge(&self, from: Self::Vertex, to: Self::Vertex) -> bool {
        self.neighbors(from).any(|next| next == to)
    }

    /// Number of parallel edges `from -> to`.
    fn edge_multiplicity(&self, from: Self::Vertex, to: Self::Vertex) -> usize {
        self.neighbors(from).filter(|&next| next == to).count()
    }
}

impl<N, E, Ty, Ix> SearchGraph for Graph<N, E, Ty, Ix>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    type Vertex = NodeIndex<Ix>;

    fn vertex_count(&self) -> usize {
        self.node_count()
    }

    fn edge_count(&self) -> usize {
        Self::edge_count(self)
    }

    fn vertex_at(&self, index: usize) -> Option<NodeIndex<Ix>> {
        (index < self.node_count()).then(|| NodeIndex::new(index))
    }

    fn index_of(&self, vertex: NodeIndex<Ix>) -> Option<usize> {
        let index = vertex.index();
        (index < self.node_count()).then_some(index)
    }

    fn neighbors(&self, vertex: NodeIndex<Ix>) -> impl Iterator<Item = NodeIndex<Ix>> + '_ {
        Self::neighbors(self, vertex)
    }

    fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    fn vertices(&self) -> impl Iterator<Item = NodeIndex<Ix>> + '_ {
        self.node_indices()
    }

    fn contains_edge(&self, from: NodeIndex<Ix>, to: NodeIndex<Ix>) -> bool {
        self.find_edge(from, to).is_some()
    }
}
