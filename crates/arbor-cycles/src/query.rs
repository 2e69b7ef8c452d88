//! Per-call cycle search configuration.

use serde::{Deserialize, Serialize};

/// Length constraint on accepted cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    /// Whether a cycle of `len` vertices has this parity.
    #[must_use]
    pub const fn accepts(self, len: usize) -> bool {
        match self {
            Self::Odd => len % 2 == 1,
            Self::Even => len % 2 == 0,
        }
    }
}

/// How the cycle is searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Depth-first: the first qualifying cycle found.
    #[default]
    Any,
    /// Breadth-first: a qualifying cycle of minimum length.
    Shortest,
}

/// What to look for in one [`CycleFinder::find`](crate::CycleFinder::find)
/// call.
///
/// ```rust
/// use arbor_cycles::{CycleQuery, Parity, Strategy};
///
/// let query = CycleQuery::shortest().through(3_u32).with_parity(Parity::Odd);
/// assert_eq!(query.strategy(), Strategy::Shortest);
/// assert_eq!(query.target(), Some(3));
/// assert!(query.accepts(5));
/// assert!(!query.accepts(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleQuery<V> {
    target: Option<V>,
    parity: Option<Parity>,
    strategy: Strategy,
}

impl<V> Default for CycleQuery<V> {
    fn default() -> Self {
        Self::any()
    }
}

impl<V> CycleQuery<V> {
    /// Any cycle, found depth-first.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            target: None,
            parity: None,
            strategy: Strategy::Any,
        }
    }

    /// A shortest cycle, found breadth-first.
    #[must_use]
    pub const fn shortest() -> Self {
        Self {
            target: None,
            parity: None,
            strategy: Strategy::Shortest,
        }
    }

    /// Only accept cycles that pass through `target`.
    #[must_use]
    pub fn through(mut self, target: V) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_parity(mut self, parity: Parity) -> Self {
        self.parity = Some(parity);
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub const fn parity(&self) -> Option<Parity> {
        self.parity
    }

    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Whether a cycle of `len` vertices satisfies the parity constraint.
    #[must_use]
    pub fn accepts(&self, len: usize) -> bool {
        self.parity.is_none_or(|parity| parity.accepts(len))
    }

    /// Shortest cycle a traversal can still produce once the length-1 and
    /// length-2 special cases are ruled out.
    pub(crate) fn traversal_floor(&self) -> usize {
        if self.parity == Some(Parity::Even) { 4 } else { 3 }
    }
}

impl<V: Copy> CycleQuery<V> {
    #[must_use]
    pub const fn target(&self) -> Option<V> {
        self.target
    }
}
