//! pathgraph-core: a generic in-memory graph with built-in search.
//!
//! A pure Rust library that maintains directed or undirected weighted
//! graphs over any vertex type with value equality, and provides
//! A*/Dijkstra shortest path, bounded breadth/depth-first traversal and
//! cycle detection on top of the same structure.
//!
//! The graph is single-threaded and synchronous: every operation runs to
//! completion on the caller's thread, and search scratch state is owned
//! per call rather than shared between calls.

mod error;
mod graph;
mod search;

pub use error::GraphError;
pub use graph::{EdgeRef, Graph, Orientation, DEFAULT_WEIGHT};
