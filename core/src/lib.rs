//! graph-metrics-core: undirected graph analysis engine.
//!
//! Builds a graph over the fixed vertex set `1..=N` on one of two
//! interchangeable adjacency representations (hash-set list or byte matrix)
//! and computes degree statistics, BFS/DFS search trees, shortest distance,
//! exact diameter and connected components on top of it.
//! No file or console I/O; this crate compiles standalone.
//!
//! Designed as the engine behind the `graph-metrics` report binary, but
//! usable independently for benchmarking and testing.

mod components;
mod error;
mod graph;
mod metrics;
mod representation;
mod traversal;

pub use components::{connected_components, Component};
pub use error::{GraphError, Result};
pub use graph::Graph;
pub use metrics::DegreeMetrics;
pub use representation::{RepresentationKind, VertexId};
pub use traversal::{
    breadth_first_search, depth_first_search, diameter, distance, shortest_path, SearchTree,
};
