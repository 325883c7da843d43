use std::sync::OnceLock;

use tracing::{debug, trace};

use crate::error::{GraphError, Result};
use crate::metrics::DegreeMetrics;
use crate::representation::{Adjacency, Representation, RepresentationKind, VertexId};

/// Undirected graph over the fixed vertex set `1..=vertex_count`.
///
/// Owns exactly one adjacency representation and validates every vertex
/// argument before delegating to it. Per-vertex degrees are cached lazily
/// and dropped on every edge insertion.
///
/// Mutation takes `&mut self`, so there is a single writer; once writes
/// have settled any number of readers may share the graph.
#[derive(Debug, Clone)]
pub struct Graph {
    vertex_count: usize,
    adjacency: Adjacency,
    /// Degree of vertex `v` at position `v - 1`. Empty cell means stale.
    degrees: OnceLock<Vec<usize>>,
}

impl Graph {
    /// Create an edgeless graph. Fails with `InvalidConfiguration` when
    /// `vertex_count` is zero, before any storage is allocated, and with
    /// `CapacityExceeded` when the storage cannot be sized or allocated.
    pub fn new(vertex_count: usize, kind: RepresentationKind) -> Result<Self> {
        let adjacency = Adjacency::new(kind, vertex_count)?;
        debug!(vertex_count, %kind, "graph created");
        Ok(Self {
            vertex_count: adjacency.vertex_count(),
            adjacency,
            degrees: OnceLock::new(),
        })
    }

    /// Create a graph and insert every pair from `edges`.
    /// Stops at the first out-of-range pair.
    pub fn from_edges<I>(vertex_count: usize, kind: RepresentationKind, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let mut graph = Self::new(vertex_count, kind)?;
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    pub fn kind(&self) -> RepresentationKind {
        self.adjacency.kind()
    }

    pub fn contains(&self, v: VertexId) -> bool {
        (1..=self.vertex_count).contains(&v)
    }

    pub(crate) fn check_vertex(&self, v: VertexId) -> Result<()> {
        if self.contains(v) {
            Ok(())
        } else {
            Err(GraphError::OutOfRange {
                vertex: v,
                vertex_count: self.vertex_count,
            })
        }
    }

    /// Insert the undirected edge `{u, v}`.
    ///
    /// Returns `Ok(true)` for a new edge and `Ok(false)` when it already
    /// existed. Self-loops are accepted. A rejected call leaves the graph
    /// untouched.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<bool> {
        if let Err(e) = self.check_vertex(u).and_then(|_| self.check_vertex(v)) {
            trace!(u, v, "edge rejected");
            return Err(e);
        }
        let inserted = self.adjacency.add_edge(u, v);
        self.degrees.take();
        Ok(inserted)
    }

    /// Vertices adjacent to `v`, in the representation's native order.
    pub fn neighbors(&self, v: VertexId) -> Result<Vec<VertexId>> {
        self.check_vertex(v)?;
        Ok(self.adjacent(v))
    }

    /// Neighbor lookup for algorithms that only ever hold valid vertices.
    pub(crate) fn adjacent(&self, v: VertexId) -> Vec<VertexId> {
        self.adjacency.neighbors(v)
    }

    fn degree_cache(&self) -> &[usize] {
        self.degrees.get_or_init(|| {
            debug!(vertex_count = self.vertex_count, "recomputing degree cache");
            (1..=self.vertex_count)
                .map(|v| self.adjacency.neighbors(v).len())
                .collect()
        })
    }

    pub fn degree(&self, v: VertexId) -> Result<usize> {
        self.check_vertex(v)?;
        Ok(self.degree_cache()[v - 1])
    }

    /// `(vertex, degree)` for every vertex in ascending order.
    pub fn degrees(&self) -> impl Iterator<Item = (VertexId, usize)> + '_ {
        self.degree_cache()
            .iter()
            .enumerate()
            .map(|(idx, &d)| (idx + 1, d))
    }

    pub fn degree_metrics(&self) -> DegreeMetrics {
        DegreeMetrics::from_degrees(self.degree_cache())
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        let cache = self
            .degrees
            .get()
            .map(|d| d.capacity() * std::mem::size_of::<usize>())
            .unwrap_or(0);
        self.adjacency.memory_usage() + cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [RepresentationKind; 2] = [RepresentationKind::Sparse, RepresentationKind::Dense];

    fn sample(kind: RepresentationKind) -> Graph {
        Graph::from_edges(5, kind, [(1, 2), (2, 3), (4, 5)]).unwrap()
    }

    #[test]
    fn test_new_rejects_zero_vertices() {
        for kind in KINDS {
            assert_eq!(
                Graph::new(0, kind).unwrap_err(),
                GraphError::InvalidConfiguration { vertex_count: 0 }
            );
        }
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_new_rejects_oversized_dense_matrix() {
        assert_eq!(
            Graph::new(1 << 33, RepresentationKind::Dense).unwrap_err(),
            GraphError::CapacityExceeded { vertex_count: 1 << 33 }
        );
    }

    #[test]
    fn test_graph_counts() {
        for kind in KINDS {
            let g = sample(kind);
            assert_eq!(g.vertex_count(), 5);
            assert_eq!(g.edge_count(), 3);
            assert_eq!(g.kind(), kind);
        }
    }

    #[test]
    fn test_add_edge_reports_new() {
        for kind in KINDS {
            let mut g = Graph::new(3, kind).unwrap();
            assert!(g.add_edge(1, 2).unwrap());
            assert!(!g.add_edge(2, 1).unwrap());
            assert_eq!(g.edge_count(), 1);
        }
    }

    #[test]
    fn test_add_edge_out_of_range() {
        for kind in KINDS {
            let mut g = sample(kind);
            assert_eq!(
                g.add_edge(0, 1).unwrap_err(),
                GraphError::OutOfRange {
                    vertex: 0,
                    vertex_count: 5
                }
            );
            assert_eq!(
                g.add_edge(1, 6).unwrap_err(),
                GraphError::OutOfRange {
                    vertex: 6,
                    vertex_count: 5
                }
            );
            assert_eq!(g.edge_count(), 3);
            assert_eq!(g.neighbors(1).unwrap(), vec![2]);
        }
    }

    #[test]
    fn test_neighbors_out_of_range() {
        for kind in KINDS {
            let g = sample(kind);
            assert!(matches!(g.neighbors(6), Err(GraphError::OutOfRange { .. })));
            assert!(matches!(g.neighbors(0), Err(GraphError::OutOfRange { .. })));
            assert!(g.neighbors(5).is_ok());
        }
    }

    #[test]
    fn test_from_edges_stops_on_bad_pair() {
        let err = Graph::from_edges(3, RepresentationKind::Sparse, [(1, 2), (3, 4)]).unwrap_err();
        assert_eq!(
            err,
            GraphError::OutOfRange {
                vertex: 4,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_degree_cache_invalidated_on_insert() {
        for kind in KINDS {
            let mut g = sample(kind);
            assert_eq!(g.degree(2).unwrap(), 2);
            assert!(g.degrees.get().is_some());

            g.add_edge(2, 5).unwrap();
            assert!(g.degrees.get().is_none());
            assert_eq!(g.degree(2).unwrap(), 3);
            assert_eq!(g.degree(5).unwrap(), 2);
        }
    }

    #[test]
    fn test_duplicate_insert_still_invalidates() {
        let mut g = sample(RepresentationKind::Sparse);
        g.degree_metrics();
        assert!(!g.add_edge(1, 2).unwrap());
        assert!(g.degrees.get().is_none());
        assert_eq!(g.degree(1).unwrap(), 1);
    }

    #[test]
    fn test_rejected_insert_keeps_cache() {
        let mut g = sample(RepresentationKind::Dense);
        g.degree_metrics();
        assert!(g.add_edge(9, 1).is_err());
        assert!(g.degrees.get().is_some());
    }

    #[test]
    fn test_degree_metrics_example() {
        for kind in KINDS {
            let m = sample(kind).degree_metrics();
            assert_eq!(m.min, 1);
            assert_eq!(m.max, 2);
            assert!((m.mean - 1.2).abs() < 1e-12);
            assert_eq!(m.median, 1.0);
        }
    }

    #[test]
    fn test_degree_metrics_with_isolated_vertex() {
        for kind in KINDS {
            // degree sequence [0, 1, 2, 2, 1]
            let g = Graph::from_edges(5, kind, [(2, 3), (3, 4), (4, 5)]).unwrap();
            let m = g.degree_metrics();
            assert_eq!(m.min, 0);
            assert_eq!(m.max, 2);
            assert!((m.mean - 1.2).abs() < 1e-12);
            assert_eq!(m.median, 1.0);
        }
    }

    #[test]
    fn test_degrees_match_neighbor_counts() {
        for kind in KINDS {
            let g = Graph::from_edges(6, kind, [(1, 2), (1, 3), (1, 4), (5, 6), (2, 3)]).unwrap();
            let total: usize = g.degrees().map(|(_, d)| d).sum();
            assert_eq!(total, 2 * g.edge_count());
            for (v, d) in g.degrees() {
                assert_eq!(d, g.neighbors(v).unwrap().len());
            }
        }
    }

    #[test]
    fn test_self_loop_degree() {
        for kind in KINDS {
            let mut g = Graph::new(2, kind).unwrap();
            assert!(g.add_edge(1, 1).unwrap());
            assert_eq!(g.edge_count(), 1);
            assert_eq!(g.neighbors(1).unwrap(), vec![1]);
            assert_eq!(g.degree(1).unwrap(), 1);
        }
    }

    #[test]
    fn test_memory_usage_grows_with_cache() {
        let g = sample(RepresentationKind::Sparse);
        let before = g.memory_usage();
        g.degree_metrics();
        assert!(g.memory_usage() > before);
    }
}
