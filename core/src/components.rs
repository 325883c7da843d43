use std::collections::VecDeque;

use serde::Serialize;
use tracing::debug;

use crate::graph::Graph;
use crate::representation::VertexId;

/// A maximal set of mutually reachable vertices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    pub size: usize,
    /// Member vertices in ascending order.
    pub vertices: Vec<VertexId>,
}

/// Partition the vertex set into connected components.
///
/// Flood-fills from each unvisited vertex in ascending order. The result is
/// sorted by size descending; equal sizes keep discovery order.
pub fn connected_components(graph: &Graph) -> Vec<Component> {
    let n = graph.vertex_count();
    let mut visited = vec![false; n + 1];
    let mut components = Vec::new();
    let mut queue: VecDeque<VertexId> = VecDeque::new();

    for seed in 1..=n {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        queue.push_back(seed);
        let mut members = vec![seed];

        while let Some(current) = queue.pop_front() {
            for next in graph.adjacent(current) {
                if !visited[next] {
                    visited[next] = true;
                    members.push(next);
                    queue.push_back(next);
                }
            }
        }

        members.sort_unstable();
        components.push(Component {
            size: members.len(),
            vertices: members,
        });
    }

    // Vec::sort_by is stable, so equal sizes stay in seed order.
    components.sort_by(|a, b| b.size.cmp(&a.size));

    debug!(vertex_count = n, components = components.len(), "components computed");
    components
}

impl Graph {
    pub fn connected_components(&self) -> Vec<Component> {
        connected_components(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::representation::RepresentationKind;

    const KINDS: [RepresentationKind; 2] = [RepresentationKind::Sparse, RepresentationKind::Dense];

    #[test]
    fn test_components_example() {
        for kind in KINDS {
            let g = Graph::from_edges(5, kind, [(1, 2), (2, 3), (4, 5)]).unwrap();
            let comps = g.connected_components();
            assert_eq!(
                comps,
                vec![
                    Component {
                        size: 3,
                        vertices: vec![1, 2, 3]
                    },
                    Component {
                        size: 2,
                        vertices: vec![4, 5]
                    },
                ]
            );
        }
    }

    #[test]
    fn test_components_sorted_by_size() {
        for kind in KINDS {
            // {1}, {2, 3}, {4, 5, 6, 7}
            let g = Graph::from_edges(7, kind, [(2, 3), (4, 7), (7, 5), (5, 6)]).unwrap();
            let sizes: Vec<usize> = g.connected_components().iter().map(|c| c.size).collect();
            assert_eq!(sizes, vec![4, 2, 1]);
        }
    }

    #[test]
    fn test_equal_sizes_keep_discovery_order() {
        for kind in KINDS {
            let g = Graph::from_edges(6, kind, [(5, 6), (3, 4), (1, 2)]).unwrap();
            let firsts: Vec<VertexId> = g
                .connected_components()
                .iter()
                .map(|c| c.vertices[0])
                .collect();
            assert_eq!(firsts, vec![1, 3, 5]);
        }
    }

    #[test]
    fn test_edgeless_graph_all_singletons() {
        for kind in KINDS {
            let comps = Graph::new(4, kind).unwrap().connected_components();
            assert_eq!(comps.len(), 4);
            assert!(comps.iter().all(|c| c.size == 1));
            assert_eq!(
                comps.iter().map(|c| c.vertices[0]).collect::<Vec<_>>(),
                vec![1, 2, 3, 4]
            );
        }
    }

    #[test]
    fn test_vertices_sorted_within_component() {
        for kind in KINDS {
            let g = Graph::from_edges(5, kind, [(5, 1), (1, 4), (4, 2), (2, 3)]).unwrap();
            let comps = g.connected_components();
            assert_eq!(comps.len(), 1);
            assert_eq!(comps[0].vertices, vec![1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn test_self_loop_does_not_merge() {
        for kind in KINDS {
            let g = Graph::from_edges(2, kind, [(1, 1)]).unwrap();
            let comps = g.connected_components();
            assert_eq!(comps.len(), 2);
            assert_eq!(comps[0].vertices, vec![1]);
        }
    }
}
