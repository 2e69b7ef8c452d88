pub mod check;
pub mod completions;
pub mod cycle;
pub mod search;
