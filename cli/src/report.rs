use std::io::{self, Write};
use std::time::Instant;

use graph_metrics_core::{DegreeMetrics, Graph, RepresentationKind, SearchTree, VertexId};
use serde::Serialize;
use tracing::{info, warn};

/// What to compute beyond the always-on counts and degree metrics.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub start: VertexId,
    pub probe: VertexId,
    pub target: VertexId,
    pub include_diameter: bool,
    pub components_preview: usize,
}

/// Full analysis of one graph on one representation.
#[derive(Debug, Serialize)]
pub struct Report {
    pub representation: RepresentationKind,
    pub load_ms: f64,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub degree: DegreeMetrics,
    pub components: ComponentsSection,
    pub bfs: SearchSection,
    pub dfs: SearchSection,
    pub distance: Option<DistanceSection>,
    pub diameter: Option<DiameterSection>,
}

#[derive(Debug, Serialize)]
pub struct ComponentsSection {
    pub count: usize,
    pub components: Vec<ComponentPreview>,
}

#[derive(Debug, Serialize)]
pub struct ComponentPreview {
    pub size: usize,
    /// Leading vertices, at most `components_preview` of them.
    pub vertices: Vec<VertexId>,
}

#[derive(Debug, Serialize)]
pub struct SearchSection {
    pub start: VertexId,
    pub elapsed_ms: f64,
    pub reached: usize,
    pub probe: VertexId,
    pub probe_parent: Option<VertexId>,
    pub probe_level: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DistanceSection {
    pub from: VertexId,
    pub to: VertexId,
    /// `None` when the vertices are in different components.
    pub distance: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DiameterSection {
    pub value: usize,
    pub elapsed_s: f64,
}

impl SearchSection {
    fn new(tree: &SearchTree, probe: VertexId, elapsed_ms: f64) -> Self {
        Self {
            start: tree.root(),
            elapsed_ms,
            reached: tree.reached_count(),
            probe,
            probe_parent: tree.parent(probe),
            probe_level: tree.level(probe),
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

impl Report {
    /// Run every analysis on `graph`. Fails only when `options.start` is
    /// not a vertex; an unknown probe or target is reported as absent.
    pub fn build(graph: &Graph, options: &ReportOptions) -> graph_metrics_core::Result<Self> {
        let degree = graph.degree_metrics();

        let comps = graph.connected_components();
        let components = ComponentsSection {
            count: comps.len(),
            components: comps
                .into_iter()
                .map(|c| ComponentPreview {
                    size: c.size,
                    vertices: c.vertices.into_iter().take(options.components_preview).collect(),
                })
                .collect(),
        };

        let t = Instant::now();
        let bfs_tree = graph.breadth_first_search(options.start)?;
        let bfs = SearchSection::new(&bfs_tree, options.probe, elapsed_ms(t));

        let t = Instant::now();
        let dfs_tree = graph.depth_first_search(options.start)?;
        let dfs = SearchSection::new(&dfs_tree, options.probe, elapsed_ms(t));

        let distance = if graph.contains(options.target) {
            Some(DistanceSection {
                from: options.start,
                to: options.target,
                distance: graph.distance(options.start, options.target)?,
            })
        } else {
            warn!(
                target_vertex = options.target,
                vertex_count = graph.vertex_count(),
                "distance target outside the graph, skipping"
            );
            None
        };

        let diameter = options.include_diameter.then(|| {
            let t = Instant::now();
            let value = graph.diameter();
            let elapsed_s = t.elapsed().as_secs_f64();
            info!(value, elapsed_s, kind = %graph.kind(), "diameter");
            DiameterSection { value, elapsed_s }
        });

        Ok(Self {
            representation: graph.kind(),
            load_ms: 0.0,
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            degree,
            components,
            bfs,
            dfs,
            distance,
            diameter,
        })
    }
}

fn show<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

fn write_search<W: Write>(out: &mut W, name: &str, s: &SearchSection) -> io::Result<()> {
    writeln!(out, "{} from vertex {}:", name, s.start)?;
    writeln!(out, "  Elapsed: {:.4} ms", s.elapsed_ms)?;
    writeln!(out, "  Vertices reached: {}", s.reached)?;
    writeln!(out, "  Parent of vertex {}: {}", s.probe, show(s.probe_parent))?;
    writeln!(out, "  Level of vertex {}: {}", s.probe, show(s.probe_level))?;
    Ok(())
}

/// Plain-text rendering of a report.
pub fn write_human<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    let rule = "-".repeat(20);

    writeln!(out, "--- Graph analysis: {} representation ---", report.representation)?;
    writeln!(out, "Loaded in {:.2} ms", report.load_ms)?;
    writeln!(out, "Vertices: {}", report.vertex_count)?;
    writeln!(out, "Edges: {}", report.edge_count)?;

    let d = &report.degree;
    writeln!(out, "Min degree: {}", d.min)?;
    writeln!(out, "Max degree: {}", d.max)?;
    writeln!(out, "Mean degree: {:.2}", d.mean)?;
    writeln!(out, "Median degree: {}", d.median)?;
    writeln!(out, "{}", rule)?;

    writeln!(out, "Connected components: {}", report.components.count)?;
    for (i, c) in report.components.components.iter().enumerate() {
        let more = if c.vertices.len() < c.size { ", ..." } else { "" };
        let listed: Vec<String> = c.vertices.iter().map(|v| v.to_string()).collect();
        writeln!(
            out,
            "  - Component {}: size={}, vertices=[{}{}]",
            i + 1,
            c.size,
            listed.join(", "),
            more
        )?;
    }
    writeln!(out, "{}", rule)?;

    write_search(out, "BFS", &report.bfs)?;
    writeln!(out, "{}", rule)?;
    write_search(out, "DFS", &report.dfs)?;
    writeln!(out, "{}", rule)?;

    if let Some(dist) = &report.distance {
        writeln!(
            out,
            "Distance between {} and {}: {}",
            dist.from,
            dist.to,
            dist.distance
                .map_or_else(|| "unreachable".to_string(), |d| d.to_string())
        )?;
        writeln!(out, "{}", rule)?;
    }

    if let Some(diam) = &report.diameter {
        writeln!(out, "Diameter: {}", diam.value)?;
        writeln!(out, "  Elapsed: {:.4} s", diam.elapsed_s)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ReportOptions {
        ReportOptions {
            start: 1,
            probe: 3,
            target: 4,
            include_diameter: true,
            components_preview: 2,
        }
    }

    fn sample(kind: RepresentationKind) -> Graph {
        Graph::from_edges(5, kind, [(1, 2), (2, 3), (4, 5)]).unwrap()
    }

    #[test]
    fn test_build_sample() {
        for kind in [RepresentationKind::Sparse, RepresentationKind::Dense] {
            let r = Report::build(&sample(kind), &options()).unwrap();
            assert_eq!(r.representation, kind);
            assert_eq!(r.edge_count, 3);
            assert_eq!(r.components.count, 2);
            assert_eq!(r.components.components[0].size, 3);
            assert_eq!(r.components.components[0].vertices, vec![1, 2]);
            assert_eq!(r.bfs.probe_parent, Some(2));
            assert_eq!(r.bfs.probe_level, Some(2));
            assert_eq!(r.dfs.probe_level, Some(2));
            assert_eq!(r.distance.as_ref().unwrap().distance, None);
            assert_eq!(r.diameter.as_ref().unwrap().value, 2);
        }
    }

    #[test]
    fn test_build_skips_unknown_target_and_diameter() {
        let mut opts = options();
        opts.target = 50;
        opts.probe = 50;
        opts.include_diameter = false;
        let r = Report::build(&sample(RepresentationKind::Sparse), &opts).unwrap();
        assert!(r.distance.is_none());
        assert!(r.diameter.is_none());
        assert_eq!(r.bfs.probe_parent, None);
        assert_eq!(r.bfs.probe_level, None);
    }

    #[test]
    fn test_build_rejects_bad_start() {
        let mut opts = options();
        opts.start = 9;
        assert!(Report::build(&sample(RepresentationKind::Dense), &opts).is_err());
    }

    #[test]
    fn test_human_output() {
        let r = Report::build(&sample(RepresentationKind::Dense), &options()).unwrap();
        let mut buf = Vec::new();
        write_human(&r, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("dense representation"));
        assert!(text.contains("Mean degree: 1.20"));
        assert!(text.contains("Connected components: 2"));
        assert!(text.contains("size=3, vertices=[1, 2, ...]"));
        assert!(text.contains("size=2, vertices=[4, 5]"));
        assert!(text.contains("Distance between 1 and 4: unreachable"));
        assert!(text.contains("Diameter: 2"));
    }

    #[test]
    fn test_json_output() {
        let r = Report::build(&sample(RepresentationKind::Sparse), &options()).unwrap();
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["representation"], "sparse");
        assert_eq!(value["degree"]["median"], 1.0);
        assert_eq!(value["components"]["count"], 2);
        assert!(value["distance"]["distance"].is_null());
        assert_eq!(value["diameter"]["value"], 2);
    }
}
