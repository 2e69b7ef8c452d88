//! Turning classified edges back into vertex sequences.

use arbor_core::{SearchForest, SearchNode};

use crate::cycle::Cycle;

/// Tree path from `ancestor` down to `node`, both included.
fn descend<V: Copy + PartialEq>(
    forest: &SearchForest<V>,
    ancestor: &SearchNode<V>,
    node: &SearchNode<V>,
) -> Vec<V> {
    let mut path: Vec<V> = forest
        .ancestors(node)
        .take_while(|step| step.level() >= ancestor.level())
        .map(SearchNode::vertex)
        .collect();
    path.reverse();
    debug_assert!(path.first() == Some(&ancestor.vertex()), "not an ancestor");
    path
}

/// Cycle closed by the back edge `from -> to`, where `to` is an ancestor of
/// `from`: `[to, ..., from]`.
pub(crate) fn back_edge<V: Copy + PartialEq>(
    forest: &SearchForest<V>,
    from: &SearchNode<V>,
    to: &SearchNode<V>,
) -> Cycle<V> {
    Cycle::from_path(descend(forest, to, from))
}

/// Length of the cycle [`back_edge`] would build.
pub(crate) const fn back_edge_len<V: Copy>(from: &SearchNode<V>, to: &SearchNode<V>) -> usize {
    from.level() - to.level() + 1
}

/// Cycle closed by the cross edge `from - to` through their nearest common
/// ancestor `top`: down from `top` to `from`, across, then up from `to` to
/// just below `top`.
pub(crate) fn cross_edge<V: Copy + PartialEq>(
    forest: &SearchForest<V>,
    from: &SearchNode<V>,
    to: &SearchNode<V>,
    top: &SearchNode<V>,
) -> Cycle<V> {
    let mut path = descend(forest, top, from);
    path.extend(
        forest
            .ancestors(to)
            .take_while(|step| step.level() > top.level())
            .map(SearchNode::vertex),
    );
    Cycle::from_path(path)
}

/// Length of the cycle [`cross_edge`] would build.
pub(crate) const fn cross_edge_len<V: Copy>(
    from: &SearchNode<V>,
    to: &SearchNode<V>,
    top: &SearchNode<V>,
) -> usize {
    (from.level() - top.level() + 1) + (to.level() - top.level())
}
