//! Position records: where each vertex sits in the traversal forest.
//!
//! Every traversal call owns one [`SearchForest`], an arena of
//! [`SearchNode`]s in discovery order. Parent links are [`NodeRef`] indices
//! into that arena, so the structure is a forest by construction: a parent
//! always has a strictly smaller discovery order than its child.
//!
//! Node refs are only meaningful for the forest that produced them. Mixing
//! refs from two different calls yields nonsense (but never unsafety).

use std::ops::Index;

/// Index of a [`SearchNode`] inside its [`SearchForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(usize);

impl NodeRef {
    /// Position in the forest arena (equal to the node's discovery order).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Placement of one vertex in a traversal forest.
///
/// Equality is vertex identity: within one call each vertex has at most one
/// record, so two records comparing equal are the same record.
#[derive(Debug, Clone, Copy)]
pub struct SearchNode<V> {
    id: NodeRef,
    component: usize,
    vertex: V,
    index: usize,
    level: usize,
    order: usize,
    parent: Option<NodeRef>,
}

impl<V: Copy> SearchNode<V> {
    /// Handle of this record in its forest.
    #[must_use]
    pub const fn id(&self) -> NodeRef {
        self.id
    }

    /// 0-based index of the component this vertex was discovered in.
    #[must_use]
    pub const fn component(&self) -> usize {
        self.component
    }

    #[must_use]
    pub const fn vertex(&self) -> V {
        self.vertex
    }

    /// Dense index of the vertex in the searched graph.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Depth below the component root (root = 0).
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Discovery timestamp, unique across the whole call.
    #[must_use]
    pub const fn order(&self) -> usize {
        self.order
    }

    #[must_use]
    pub const fn parent(&self) -> Option<NodeRef> {
        self.parent
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl<V: PartialEq> PartialEq for SearchNode<V> {
    fn eq(&self, other: &Self) -> bool {
        self.vertex == other.vertex
    }
}

impl<V: Eq> Eq for SearchNode<V> {}

/// Arena of position records for one traversal call.
#[derive(Debug, Clone)]
pub struct SearchForest<V> {
    nodes: Vec<SearchNode<V>>,
    by_index: Vec<Option<NodeRef>>,
}

impl<V> Default for SearchForest<V> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            by_index: Vec::new(),
        }
    }
}

impl<V: Copy + PartialEq> SearchForest<V> {
    /// Drop all records and size the vertex lookup table for a new call.
    pub(crate) fn reset(&mut self, vertex_count: usize) {
        self.nodes.clear();
        self.by_index.clear();
        self.by_index.resize(vertex_count, None);
    }

    /// Record a new component root.
    pub(crate) fn push_root(&mut self, component: usize, vertex: V, index: usize) -> NodeRef {
        self.push(component, vertex, index, 0, None)
    }

    /// Record a tree child of `parent`.
    pub(crate) fn push_child(&mut self, parent: NodeRef, vertex: V, index: usize) -> NodeRef {
        let (component, level) = {
            let parent_node = &self[parent];
            (parent_node.component, parent_node.level + 1)
        };
        self.push(component, vertex, index, level, Some(parent))
    }

    fn push(
        &mut self,
        component: usize,
        vertex: V,
        index: usize,
        level: usize,
        parent: Option<NodeRef>,
    ) -> NodeRef {
        let id = NodeRef(self.nodes.len());
        self.nodes.push(SearchNode {
            id,
            component,
            vertex,
            index,
            level,
            order: id.0,
            parent,
        });
        self.by_index[index] = Some(id);
        id
    }

    /// Record for the vertex with dense index `index`, if it was reached.
    #[must_use]
    pub fn at_index(&self, index: usize) -> Option<&SearchNode<V>> {
        self.by_index
            .get(index)
            .copied()
            .flatten()
            .map(|id| &self.nodes[id.0])
    }

    #[must_use]
    pub fn get(&self, id: NodeRef) -> Option<&SearchNode<V>> {
        self.nodes.get(id.0)
    }

    /// Number of vertices reached so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Records in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &SearchNode<V>> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn parent_of(&self, node: &SearchNode<V>) -> Option<&SearchNode<V>> {
        node.parent.map(|id| &self[id])
    }

    /// `node`, its parent, its grandparent, ... up to the component root.
    #[must_use]
    pub fn ancestors<'a>(&'a self, node: &'a SearchNode<V>) -> Ancestors<'a, V> {
        Ancestors {
            forest: self,
            next: Some(node.id),
        }
    }

    /// Vertices from the component root down to `node`, inclusive.
    #[must_use]
    pub fn path_to_root(&self, node: &SearchNode<V>) -> Vec<V> {
        let mut path: Vec<V> = self.ancestors(node).map(SearchNode::vertex).collect();
        path.reverse();
        path
    }

    /// Whether `ancestor` lies on the parent chain of `node`.
    ///
    /// A node counts as its own ancestor. The chain walk stops as soon as it
    /// climbs above `ancestor`'s level.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: &SearchNode<V>, node: &SearchNode<V>) -> bool {
        self.ancestors(node)
            .take_while(|candidate| candidate.level >= ancestor.level)
            .any(|candidate| candidate == ancestor)
    }

    /// Deepest node on `b`'s parent chain that is also an ancestor of `a`.
    ///
    /// Returns `None` when the two nodes sit in different trees.
    #[must_use]
    pub fn nearest_ancestor<'a>(
        &'a self,
        a: &'a SearchNode<V>,
        b: &'a SearchNode<V>,
    ) -> Option<&'a SearchNode<V>> {
        if a.component != b.component {
            return None;
        }

        // Lift the deeper node to the other's level, then climb in lockstep.
        let mut left = a;
        let mut right = b;
        while left.level > right.level {
            left = self.parent_of(left)?;
        }
        while right.level > left.level {
            right = self.parent_of(right)?;
        }
        while left != right {
            left = self.parent_of(left)?;
            right = self.parent_of(right)?;
        }
        Some(right)
    }
}

impl<V> Index<NodeRef> for SearchForest<V> {
    type Output = SearchNode<V>;

    fn index(&self, id: NodeRef) -> &Self::Output {
        &self.nodes[id.0]
    }
}

/// Iterator over a node's parent chain, see [`SearchForest::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a, V> {
    forest: &'a SearchForest<V>,
    next: Option<NodeRef>,
}

impl<'a, V> Iterator for Ancestors<'a, V> {
    type Item = &'a SearchNode<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.forest[self.next?];
        self.next = node.parent;
        Some(node)
    }
}
