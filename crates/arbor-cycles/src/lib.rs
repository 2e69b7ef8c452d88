#![forbid(unsafe_code)]
//! arbor-cycles library.
//!
//! Cycle detection on top of the arbor-core search engines. A
//! [`CycleFinder`] answers "is there a cycle", and finds concrete cycles:
//! any cycle, a shortest one, one of a given [`Parity`], or one through a
//! given vertex. Results are [`Cycle`] values that can be checked against
//! the graph with [`Cycle::is_valid`].
//!
//! # Conventions
//!
//! - **Errors**: Only an unknown target vertex is an error
//!   ([`arbor_core::SearchError`]). "No qualifying cycle" is `None`.
//! - **Logging**: `tracing` spans on [`CycleFinder::find`] and
//!   [`CycleFinder::contains_cycle`], `debug!`/`trace!` events inside.

mod any;
pub mod cycle;
pub mod finder;
pub mod query;
mod reconstruct;
mod shortest;
mod special;

pub use cycle::Cycle;
pub use finder::CycleFinder;
pub use query::{CycleQuery, Parity, Strategy};
