#![forbid(unsafe_code)]
//! arbor-core library.
//!
//! Edge-classifying graph search. A [`Bfs`] or [`Dfs`] engine walks a
//! [`SearchGraph`], records every discovered vertex as a [`SearchNode`] in a
//! per-call [`SearchForest`], and reports tree, back and cross edges to a
//! [`Visitor`]. Any callback can stop the whole traversal by returning
//! [`Control::Break`].
//!
//! # Conventions
//!
//! - **Errors**: Precondition failures are [`SearchError`]; "nothing found"
//!   is never an error.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`). The library
//!   never installs a subscriber.
//!
//! # Example
//!
//! ```rust
//! use arbor_core::{Control, Dfs, SearchEvent, visit_fn};
//! use petgraph::graph::UnGraph;
//!
//! let graph = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 0)]);
//! let mut back_edges = 0;
//! let summary = Dfs::new(&graph).traverse(&mut visit_fn(|_, event| {
//!     if matches!(event, SearchEvent::BackEdge { .. }) {
//!         back_edges += 1;
//!     }
//!     Control::Continue
//! }));
//!
//! assert_eq!(back_edges, 1);
//! assert_eq!(summary.num_components(), 1);
//! ```

pub mod error;
pub mod graph;
pub mod search;

pub use error::SearchError;
pub use graph::SearchGraph;
pub use search::bfs::Bfs;
pub use search::dfs::Dfs;
pub use search::node::{Ancestors, NodeRef, SearchForest, SearchNode};
pub use search::visitor::{Control, EventVisitor, SearchEvent, Visitor, visit_fn};
pub use search::{EdgeKind, SearchSummary};
