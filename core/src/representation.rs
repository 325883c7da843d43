use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::error::{GraphError, Result};

/// External vertex identifier. Always 1-based: valid ids are `1..=vertex_count`.
pub type VertexId = usize;

/// Adjacency storage strategy selected at graph construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepresentationKind {
    /// Hash-set adjacency list. Neighbors come back in hash order.
    #[default]
    Sparse,
    /// Byte matrix. Neighbors come back in ascending order.
    Dense,
}

impl fmt::Display for RepresentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepresentationKind::Sparse => f.write_str("sparse"),
            RepresentationKind::Dense => f.write_str("dense"),
        }
    }
}

/// Capability set every adjacency storage provides.
///
/// Callers pass vertices already validated against `[1, vertex_count]`;
/// the [`Graph`](crate::Graph) facade is responsible for that check.
/// Implementations panic on out-of-range ids.
pub(crate) trait Representation {
    /// Insert the unordered pair `{u, v}`. Returns `true` when the edge is new.
    fn add_edge(&mut self, u: VertexId, v: VertexId) -> bool;

    /// All vertices adjacent to `v`. Ordering is implementation-specific.
    fn neighbors(&self, v: VertexId) -> Vec<VertexId>;

    /// Number of distinct edges inserted so far.
    fn edge_count(&self) -> usize;

    /// Number of vertices, fixed at construction.
    fn vertex_count(&self) -> usize;

    /// Approximate heap usage of the adjacency storage in bytes.
    fn memory_usage(&self) -> usize;
}

// ---------------------------------------------------------------------------
// Sparse: vertex → neighbor set
// ---------------------------------------------------------------------------

/// Adjacency list backed by one `HashSet` per vertex.
///
/// Insertion and membership checks are expected O(1). Every vertex in
/// `1..=n` has an entry from construction onward, even when isolated.
#[derive(Debug, Clone)]
pub(crate) struct AdjacencyList {
    adj: HashMap<VertexId, HashSet<VertexId>>,
    edge_count: usize,
}

impl AdjacencyList {
    pub fn new(vertex_count: usize) -> Result<Self> {
        if vertex_count == 0 {
            return Err(GraphError::InvalidConfiguration { vertex_count });
        }
        let mut adj = HashMap::new();
        adj.try_reserve(vertex_count)
            .map_err(|_| GraphError::CapacityExceeded { vertex_count })?;
        adj.extend((1..=vertex_count).map(|v| (v, HashSet::new())));
        Ok(Self { adj, edge_count: 0 })
    }

    fn set(&self, v: VertexId) -> &HashSet<VertexId> {
        &self.adj[&v]
    }

    fn set_mut(&mut self, v: VertexId) -> &mut HashSet<VertexId> {
        self.adj
            .get_mut(&v)
            .unwrap_or_else(|| panic!("vertex {} not in adjacency list", v))
    }
}

impl Representation for AdjacencyList {
    fn add_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        if self.set(u).contains(&v) {
            return false;
        }
        self.set_mut(u).insert(v);
        self.set_mut(v).insert(u);
        self.edge_count += 1;
        true
    }

    fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        self.set(v).iter().copied().collect()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let entries: usize = self
            .adj
            .values()
            .map(|s| s.capacity() * size_of::<VertexId>())
            .sum();
        let table = self.adj.capacity() * (size_of::<VertexId>() + size_of::<HashSet<VertexId>>());
        entries + table
    }
}

// ---------------------------------------------------------------------------
// Dense: symmetric N×N byte matrix
// ---------------------------------------------------------------------------

/// Adjacency matrix stored as a flat row-major `N×N` grid of 0/1 bytes.
///
/// Storage is 0-based; the 1-based vertex shift happens only inside this
/// type. Insertion and lookup are worst-case O(1); `neighbors` is O(N) and
/// yields ascending ids.
#[derive(Debug, Clone)]
pub(crate) struct AdjacencyMatrix {
    n: usize,
    cells: Vec<u8>,
    edge_count: usize,
}

impl AdjacencyMatrix {
    pub fn new(vertex_count: usize) -> Result<Self> {
        if vertex_count == 0 {
            return Err(GraphError::InvalidConfiguration { vertex_count });
        }
        let len = vertex_count
            .checked_mul(vertex_count)
            .ok_or(GraphError::CapacityExceeded { vertex_count })?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| GraphError::CapacityExceeded { vertex_count })?;
        cells.resize(len, 0);
        Ok(Self {
            n: vertex_count,
            cells,
            edge_count: 0,
        })
    }

    #[inline]
    fn cell(&self, u: VertexId, v: VertexId) -> usize {
        assert!(
            (1..=self.n).contains(&u) && (1..=self.n).contains(&v),
            "vertex pair ({}, {}) outside matrix of order {}",
            u,
            v,
            self.n
        );
        (u - 1) * self.n + (v - 1)
    }

    fn row(&self, v: VertexId) -> &[u8] {
        let start = self.cell(v, 1);
        &self.cells[start..start + self.n]
    }
}

impl Representation for AdjacencyMatrix {
    fn add_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        let uv = self.cell(u, v);
        if self.cells[uv] != 0 {
            return false;
        }
        let vu = self.cell(v, u);
        self.cells[uv] = 1;
        self.cells[vu] = 1;
        self.edge_count += 1;
        true
    }

    fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        self.row(v)
            .iter()
            .enumerate()
            .filter(|(_, &bit)| bit != 0)
            .map(|(idx, _)| idx + 1)
            .collect()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn vertex_count(&self) -> usize {
        self.n
    }

    fn memory_usage(&self) -> usize {
        self.cells.capacity()
    }
}

// ---------------------------------------------------------------------------
// Tagged dispatch
// ---------------------------------------------------------------------------

/// One of the two storage variants, dispatched with a `match` rather than
/// a trait object.
#[derive(Debug, Clone)]
pub(crate) enum Adjacency {
    Sparse(AdjacencyList),
    Dense(AdjacencyMatrix),
}

impl Adjacency {
    pub fn new(kind: RepresentationKind, vertex_count: usize) -> Result<Self> {
        Ok(match kind {
            RepresentationKind::Sparse => Adjacency::Sparse(AdjacencyList::new(vertex_count)?),
            RepresentationKind::Dense => Adjacency::Dense(AdjacencyMatrix::new(vertex_count)?),
        })
    }

    pub fn kind(&self) -> RepresentationKind {
        match self {
            Adjacency::Sparse(_) => RepresentationKind::Sparse,
            Adjacency::Dense(_) => RepresentationKind::Dense,
        }
    }
}

impl Representation for Adjacency {
    fn add_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        match self {
            Adjacency::Sparse(r) => r.add_edge(u, v),
            Adjacency::Dense(r) => r.add_edge(u, v),
        }
    }

    fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        match self {
            Adjacency::Sparse(r) => r.neighbors(v),
            Adjacency::Dense(r) => r.neighbors(v),
        }
    }

    fn edge_count(&self) -> usize {
        match self {
            Adjacency::Sparse(r) => r.edge_count(),
            Adjacency::Dense(r) => r.edge_count(),
        }
    }

    fn vertex_count(&self) -> usize {
        match self {
            Adjacency::Sparse(r) => r.vertex_count(),
            Adjacency::Dense(r) => r.vertex_count(),
        }
    }

    fn memory_usage(&self) -> usize {
        match self {
            Adjacency::Sparse(r) => r.memory_usage(),
            Adjacency::Dense(r) => r.memory_usage(),
        }
    }
}
