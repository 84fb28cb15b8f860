//! Restart search.
//!
//! A single anneal returns wherever its walk ended, so good answers come
//! from running several independent anneals and keeping the best. This
//! module owns that outer loop; with the `parallel` feature the restarts
//! run on the rayon thread pool.

mod config;
mod runner;

pub use config::SearchConfig;
pub use runner::{RunSummary, SearchResult, SearchRunner};
