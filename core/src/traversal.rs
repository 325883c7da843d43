use std::collections::VecDeque;

use tracing::{debug, debug_span};

use crate::error::Result;
use crate::graph::Graph;
use crate::representation::VertexId;

/// Parent and level maps produced by a traversal from a single root.
///
/// Both maps are keyed by 1-based vertex id. The root has no parent and
/// level 0; unreached vertices have neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTree {
    root: VertexId,
    // Slot 0 is never a vertex and always stays `None`.
    parents: Vec<Option<VertexId>>,
    levels: Vec<Option<usize>>,
}

impl SearchTree {
    fn unreached(root: VertexId, vertex_count: usize) -> Self {
        let mut tree = Self {
            root,
            parents: vec![None; vertex_count + 1],
            levels: vec![None; vertex_count + 1],
        };
        tree.levels[root] = Some(0);
        tree
    }

    fn visit(&mut self, v: VertexId, parent: VertexId, level: usize) {
        self.parents[v] = Some(parent);
        self.levels[v] = Some(level);
    }

    fn is_reached(&self, v: VertexId) -> bool {
        self.levels.get(v).is_some_and(Option::is_some)
    }

    pub fn root(&self) -> VertexId {
        self.root
    }

    pub fn vertex_count(&self) -> usize {
        self.levels.len() - 1
    }

    /// Tree parent of `v`. `None` for the root, unreached and unknown vertices.
    pub fn parent(&self, v: VertexId) -> Option<VertexId> {
        self.parents.get(v).copied().flatten()
    }

    /// Hop count (BFS) or stack depth (DFS) of `v`. `None` when unreached.
    pub fn level(&self, v: VertexId) -> Option<usize> {
        self.levels.get(v).copied().flatten()
    }

    /// Number of vertices reached, root included.
    pub fn reached_count(&self) -> usize {
        self.levels.iter().filter(|l| l.is_some()).count()
    }

    /// Largest finite level. Unreached vertices are ignored.
    pub fn max_level(&self) -> usize {
        self.levels.iter().flatten().copied().max().unwrap_or(0)
    }

    /// `(vertex, parent, level)` for every vertex in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Option<VertexId>, Option<usize>)> + '_ {
        (1..self.levels.len()).map(move |v| (v, self.parents[v], self.levels[v]))
    }

    /// Tree path from the root to `v`, both endpoints included.
    /// `None` when `v` was not reached.
    pub fn path_to(&self, v: VertexId) -> Option<Vec<VertexId>> {
        if !self.is_reached(v) {
            return None;
        }
        let mut path = vec![v];
        let mut current = v;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Some(path)
    }
}

/// BFS from a vertex already known to be valid.
///
/// Neighbors are expanded in the representation's native order, so the
/// parent chosen among several same-level predecessors depends on the
/// representation. Levels never do.
pub(crate) fn bfs_from(graph: &Graph, start: VertexId) -> SearchTree {
    let mut tree = SearchTree::unreached(start, graph.vertex_count());
    let mut queue: VecDeque<(VertexId, usize)> = VecDeque::new();
    queue.push_back((start, 0));

    while let Some((current, level)) = queue.pop_front() {
        for next in graph.adjacent(current) {
            if !tree.is_reached(next) {
                tree.visit(next, current, level + 1);
                queue.push_back((next, level + 1));
            }
        }
    }

    tree
}

/// Breadth-first search from `start`. Levels are shortest hop counts.
pub fn breadth_first_search(graph: &Graph, start: VertexId) -> Result<SearchTree> {
    graph.check_vertex(start)?;
    Ok(bfs_from(graph, start))
}

/// Depth-first search from `start` using an explicit stack.
///
/// A vertex is marked when pushed, not when popped, so it never sits on the
/// stack twice. Neighbors are pushed in descending order and therefore
/// popped in ascending order, which makes the result identical for every
/// representation.
pub fn depth_first_search(graph: &Graph, start: VertexId) -> Result<SearchTree> {
    graph.check_vertex(start)?;

    let mut tree = SearchTree::unreached(start, graph.vertex_count());
    let mut stack: Vec<(VertexId, usize)> = vec![(start, 0)];

    while let Some((current, depth)) = stack.pop() {
        let mut next = graph.adjacent(current);
        next.sort_unstable_by(|a, b| b.cmp(a));
        for v in next {
            if !tree.is_reached(v) {
                tree.visit(v, current, depth + 1);
                stack.push((v, depth + 1));
            }
        }
    }

    Ok(tree)
}

/// Shortest hop count between `u` and `v`, `None` when no path exists.
/// Runs one full BFS per call.
pub fn distance(graph: &Graph, u: VertexId, v: VertexId) -> Result<Option<usize>> {
    graph.check_vertex(u)?;
    graph.check_vertex(v)?;
    Ok(bfs_from(graph, u).level(v))
}

/// One shortest path from `start` to `target`, endpoints included.
///
/// Stops expanding as soon as `target` is discovered. `None` when the two
/// vertices are in different components.
pub fn shortest_path(
    graph: &Graph,
    start: VertexId,
    target: VertexId,
) -> Result<Option<Vec<VertexId>>> {
    graph.check_vertex(start)?;
    graph.check_vertex(target)?;

    let mut tree = SearchTree::unreached(start, graph.vertex_count());
    if start == target {
        return Ok(tree.path_to(target));
    }

    let mut queue: VecDeque<(VertexId, usize)> = VecDeque::new();
    queue.push_back((start, 0));

    while let Some((current, level)) = queue.pop_front() {
        for next in graph.adjacent(current) {
            if !tree.is_reached(next) {
                tree.visit(next, current, level + 1);
                if next == target {
                    return Ok(tree.path_to(target));
                }
                queue.push_back((next, level + 1));
            }
        }
    }

    Ok(None)
}

/// Exact diameter by running a full BFS from every vertex.
///
/// O(V·(V+E)): expensive for large graphs. Only finite distances count, so
/// a disconnected graph reports the largest distance found inside any
/// single component instead of an infinite value.
pub fn diameter(graph: &Graph) -> usize {
    let _span = debug_span!("diameter", vertex_count = graph.vertex_count()).entered();

    let diameter = (1..=graph.vertex_count())
        .map(|v| bfs_from(graph, v).max_level())
        .max()
        .unwrap_or(0);

    debug!(diameter, "diameter computed");
    diameter
}

impl Graph {
    pub fn breadth_first_search(&self, start: VertexId) -> Result<SearchTree> {
        breadth_first_search(self, start)
    }

    pub fn depth_first_search(&self, start: VertexId) -> Result<SearchTree> {
        depth_first_search(self, start)
    }

    pub fn distance(&self, u: VertexId, v: VertexId) -> Result<Option<usize>> {
        distance(self, u, v)
    }

    pub fn shortest_path(&self, u: VertexId, v: VertexId) -> Result<Option<Vec<VertexId>>> {
        shortest_path(self, u, v)
    }

    pub fn diameter(&self) -> usize {
        diameter(self)
    }
}
