//! Traversal callbacks.
//!
//! Implement [`Visitor`] and override only the hooks you need; the rest
//! default to [`Control::Continue`]. For quick event-style consumers wrap a
//! closure with [`visit_fn`] and match on [`SearchEvent`].
//!
//! Every hook receives the call's [`SearchForest`] so it can walk parent
//! chains of the records it is handed. Returning [`Control::Break`] from any
//! hook interrupts the entire traversal: no further hook is invoked and the
//! engine reports `interrupted = true`.

use super::node::{SearchForest, SearchNode};

/// Whether the traversal should keep going after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Control {
    #[default]
    Continue,
    Break,
}

impl Control {
    #[must_use]
    pub const fn is_break(self) -> bool {
        matches!(self, Self::Break)
    }

    /// `Break` when `stop` holds, `Continue` otherwise.
    #[must_use]
    pub const fn break_if(stop: bool) -> Self {
        if stop { Self::Break } else { Self::Continue }
    }
}

/// Hooks invoked by [`Bfs`](crate::Bfs) and [`Dfs`](crate::Dfs).
///
/// Edge hooks get the record of the vertex being expanded as `from` and the
/// record of the neighbor as `to`.
pub trait Visitor<V> {
    /// A vertex is about to have its neighbors examined.
    fn start_vertex(&mut self, _forest: &SearchForest<V>, _node: &SearchNode<V>) -> Control {
        Control::Continue
    }

    /// `to` was reached for the first time through `from`.
    fn tree_edge(
        &mut self,
        _forest: &SearchForest<V>,
        _from: &SearchNode<V>,
        _to: &SearchNode<V>,
    ) -> Control {
        Control::Continue
    }

    /// `to` is an ancestor of `from` (or `from` itself): the edge closes a
    /// cycle.
    fn back_edge(
        &mut self,
        _forest: &SearchForest<V>,
        _from: &SearchNode<V>,
        _to: &SearchNode<V>,
    ) -> Control {
        Control::Continue
    }

    /// `to` was already reached and is neither an ancestor nor a descendant
    /// of `from`.
    fn cross_edge(
        &mut self,
        _forest: &SearchForest<V>,
        _from: &SearchNode<V>,
        _to: &SearchNode<V>,
    ) -> Control {
        Control::Continue
    }

    /// All neighbors of `node` have been examined.
    fn finish_vertex(&mut self, _forest: &SearchForest<V>, _node: &SearchNode<V>) -> Control {
        Control::Continue
    }
}

impl<V, T: Visitor<V> + ?Sized> Visitor<V> for &mut T {
    fn start_vertex(&mut self, forest: &SearchForest<V>, node: &SearchNode<V>) -> Control {
        (**self).start_vertex(forest, node)
    }

    fn tree_edge(
        &mut self,
        forest: &SearchForest<V>,
        from: &SearchNode<V>,
        to: &SearchNode<V>,
    ) -> Control {
        (**self).tree_edge(forest, from, to)
    }

    fn back_edge(
        &mut self,
        forest: &SearchForest<V>,
        from: &SearchNode<V>,
        to: &SearchNode<V>,
    ) -> Control {
        (**self).back_edge(forest, from, to)
    }

    fn cross_edge(
        &mut self,
        forest: &SearchForest<V>,
        from: &SearchNode<V>,
        to: &SearchNode<V>,
    ) -> Control {
        (**self).cross_edge(forest, from, to)
    }

    fn finish_vertex(&mut self, forest: &SearchForest<V>, node: &SearchNode<V>) -> Control {
        (**self).finish_vertex(forest, node)
    }
}

/// One traversal callback, as delivered to an [`EventVisitor`].
#[derive(Debug, Clone, Copy)]
pub enum SearchEvent<'a, V> {
    StartVertex(&'a SearchNode<V>),
    TreeEdge {
        from: &'a SearchNode<V>,
        to: &'a SearchNode<V>,
    },
    BackEdge {
        from: &'a SearchNode<V>,
        to: &'a SearchNode<V>,
    },
    CrossEdge {
        from: &'a SearchNode<V>,
        to: &'a SearchNode<V>,
    },
    FinishVertex(&'a SearchNode<V>),
}

/// Adapts a closure over [`SearchEvent`]s into a [`Visitor`].
#[derive(Debug, Clone)]
pub struct EventVisitor<F>(pub F);

/// Wrap `handler` so it receives every traversal event.
pub fn visit_fn<V, F>(handler: F) -> EventVisitor<F>
where
    F: FnMut(&SearchForest<V>, SearchEvent<'_, V>) -> Control,
{
    EventVisitor(handler)
}

impl<V, F> Visitor<V> for EventVisitor<F>
where
    F: FnMut(&SearchForest<V>, SearchEvent<'_, V>) -> Control,
{
    fn start_vertex(&mut self, forest: &SearchForest<V>, node: &SearchNode<V>) -> Control {
        (self.0)(forest, SearchEvent::StartVertex(node))
    }

    fn tree_edge(
        &mut self,
        forest: &SearchForest<V>,
        from: &SearchNode<V>,
        to: &SearchNode<V>,
    ) -> Control {
        (self.0)(forest, SearchEvent::TreeEdge { from, to })
    }

    fn back_edge(
        &mut self,
        forest: &SearchForest<V>,
        from: &SearchNode<V>,
        to: &SearchNode<V>,
    ) -> Control {
        (self.0)(forest, SearchEvent::BackEdge { from, to })
    }

    fn cross_edge(
        &mut self,
        forest: &SearchForest<V>,
        from: &SearchNode<V>,
        to: &SearchNode<V>,
    ) -> Control {
        (self.0)(forest, SearchEvent::CrossEdge { from, to })
    }

    fn finish_vertex(&mut self, forest: &SearchForest<V>, node: &SearchNode<V>) -> Control {
        (self.0)(forest, SearchEvent::FinishVertex(node))
    }
}
