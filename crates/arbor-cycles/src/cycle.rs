//! The cycle result type.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::ops::Index;

use arbor_core::{SearchError, SearchGraph};
use serde::Serialize;

/// A closed walk without repeated vertices, stored as its vertex sequence.
///
/// The last vertex is implicitly connected back to the first, so `[a, b, c]`
/// stands for `a -> b -> c -> a`. A cycle always has at least one vertex: a
/// single vertex is a self-loop, two vertices are a pair of parallel (or, in
/// directed graphs, opposite) edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cycle<V> {
    vertices: Vec<V>,
}

impl<V> Cycle<V> {
    /// Wrap a vertex sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyCycle`] if `vertices` is empty.
    pub fn new(vertices: Vec<V>) -> Result<Self, SearchError> {
        if vertices.is_empty() {
            return Err(SearchError::EmptyCycle);
        }
        Ok(Self { vertices })
    }

    /// Sequence produced by reconstruction, known to be non-empty.
    pub(crate) fn from_path(vertices: Vec<V>) -> Self {
        debug_assert!(!vertices.is_empty(), "reconstructed cycle is empty");
        Self { vertices }
    }

    /// Number of vertices, which equals the number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&V> {
        self.vertices.get(index)
    }

    #[must_use]
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.vertices.iter()
    }

    /// Walk the cycle in the opposite direction, keeping the first vertex.
    pub fn reverse(&mut self) {
        if let Some(tail) = self.vertices.get_mut(1..) {
            tail.reverse();
        }
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<V> {
        self.vertices
    }
}

impl<V: PartialEq> Cycle<V> {
    #[must_use]
    pub fn contains(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }

    /// Rotate so that `vertex` comes first. Returns `false` (and leaves the
    /// cycle untouched) if `vertex` is not on it.
    pub fn rotate_to(&mut self, vertex: &V) -> bool {
        match self.vertices.iter().position(|v| v == vertex) {
            Some(at) => {
                self.vertices.rotate_left(at);
                true
            }
            None => false,
        }
    }
}

impl<V: Copy> Cycle<V> {
    /// Consecutive vertex pairs, ending with the pair that closes the cycle.
    pub fn edges(&self) -> impl Iterator<Item = (V, V)> + '_ {
        let closing = self.vertices.last().copied().zip(self.vertices.first().copied());
        self.vertices
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .chain(closing)
    }
}

impl<V: Copy + Eq + Hash> Cycle<V> {
    /// Whether this is a cycle of `graph`.
    ///
    /// All vertices must be distinct members of the graph and every edge of
    /// [`Cycle::edges`] must exist. Length 2 needs two distinct edges: both
    /// arcs in a directed graph, two parallel edges in an undirected one.
    pub fn is_valid<G>(&self, graph: &G) -> bool
    where
        G: SearchGraph<Vertex = V>,
    {
        let mut seen = HashSet::with_capacity(self.len());
        if !self
            .vertices
            .iter()
            .all(|&v| graph.contains_vertex(v) && seen.insert(v))
        {
            return false;
        }

        match self.vertices.as_slice() {
            [] => false,
            [a, b] if !graph.is_directed() => graph.edge_multiplicity(*a, *b) >= 2,
            _ => self.edges().all(|(from, to)| graph.contains_edge(from, to)),
        }
    }
}

impl<V> Index<usize> for Cycle<V> {
    type Output = V;

    fn index(&self, index: usize) -> &V {
        &self.vertices[index]
    }
}

impl<'a, V> IntoIterator for &'a Cycle<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}

impl<V: fmt::Display> fmt::Display for Cycle<V> {
    /// `a -> b -> c -> a`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for vertex in &self.vertices {
            write!(f, "{vertex} -> ")?;
        }
        match self.vertices.first() {
            Some(first) => write!(f, "{first}"),
            None => Ok(()),
        }
    }
}
