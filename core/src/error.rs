use thiserror::Error;

use crate::representation::VertexId;

/// Contract violations raised by the graph core.
///
/// Every variant is raised synchronously at the offending call and leaves
/// the graph unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex count must be a positive integer, got {vertex_count}")]
    InvalidConfiguration { vertex_count: usize },

    /// Adjacency storage for this many vertices cannot be addressed or allocated.
    #[error("cannot allocate adjacency storage for {vertex_count} vertices")]
    CapacityExceeded { vertex_count: usize },

    #[error("vertex {vertex} is outside the range [1, {vertex_count}]")]
    OutOfRange {
        vertex: VertexId,
        vertex_count: usize,
    },
}

pub type Result<T> = std::result::Result<T, GraphError>;
