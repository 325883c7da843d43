use std::collections::VecDeque;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use graph_metrics_core::{Graph, RepresentationKind, Result};

/// Time every graph-metrics-core operation on synthetic topologies.
#[derive(Debug, Parser)]
#[command(name = "graph-metrics-bench")]
struct Args {
    /// Topology to generate
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Number of vertices per generated graph
    #[arg(default_value_t = 2_000)]
    vertex_count: usize,

    /// Representation(s) to benchmark
    #[arg(long, value_enum, default_value_t = Kinds::Both)]
    representation: Kinds,

    /// Largest vertex count for which the O(V·(V+E)) diameter is timed
    #[arg(long, default_value_t = 3_000)]
    diameter_limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run all generators (default)
    All,
    /// Fractal branching tree (deep paths)
    Lsystem,
    /// Preferential attachment via edge sampling (hub-and-spoke)
    Scalefree,
    /// Watts-Strogatz ring lattice + shortcuts
    Smallworld,
    /// Erdos-Renyi uniform random edges
    Random,
    /// Two dense clusters connected by a thin bridge
    Barbell,
    /// Diffusion-limited aggregation (organic branching)
    Dla,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kinds {
    Sparse,
    Dense,
    Both,
}

type Generator = fn(usize, RepresentationKind) -> Result<Graph>;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("graph-metrics-bench");
    println!("===================");
    println!();

    let generators: Vec<(&str, Generator)> = match args.mode {
        Mode::Lsystem => vec![("L-system tree", gen_lsystem)],
        Mode::Scalefree => vec![("Scale-free (edge sampling)", gen_scale_free)],
        Mode::Smallworld => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        Mode::Random => vec![("Erdos-Renyi random", gen_random)],
        Mode::Barbell => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        Mode::Dla => vec![("DLA (organic branching)", gen_dla)],
        Mode::All => vec![
            ("L-system tree", gen_lsystem as Generator),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
        ],
    };

    let kinds = match args.representation {
        Kinds::Sparse => vec![RepresentationKind::Sparse],
        Kinds::Dense => vec![RepresentationKind::Dense],
        Kinds::Both => vec![RepresentationKind::Sparse, RepresentationKind::Dense],
    };

    for (name, generator) in generators {
        for &kind in &kinds {
            run_benchmark(name, generator, kind, &args)?;
        }
    }
    Ok(())
}

fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(name: &str, generator: Generator, kind: RepresentationKind, args: &Args) -> Result<()> {
    println!("--- {} [{}] ---", name, kind);
    println!("Target: {} vertices", args.vertex_count);

    let t = Instant::now();
    let graph = generator(args.vertex_count, kind)?;
    println!(
        "Generated in {:.2}s: {} vertices, {} edges, ~{:.1}MB",
        t.elapsed().as_secs_f64(),
        graph.vertex_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    println!();
    println!("{:>14} {:>12} {:>12}", "operation", "result", "time");
    println!("{:->14} {:->12} {:->12}", "", "", "");

    let t = Instant::now();
    let metrics = graph.degree_metrics();
    println!("{:>14} {:>12} {:>10.1}ms", "degree", format!("max {}", metrics.max), ms(t));

    let t = Instant::now();
    let bfs = graph.breadth_first_search(1)?;
    println!("{:>14} {:>12} {:>10.1}ms", "bfs", bfs.reached_count(), ms(t));

    let t = Instant::now();
    let dfs = graph.depth_first_search(1)?;
    println!("{:>14} {:>12} {:>10.1}ms", "dfs", dfs.reached_count(), ms(t));

    let t = Instant::now();
    let components = graph.connected_components();
    println!("{:>14} {:>12} {:>10.1}ms", "components", components.len(), ms(t));

    let far = graph.vertex_count();
    let t = Instant::now();
    let distance = graph.distance(1, far)?;
    let shown = distance.map_or_else(|| "none".to_string(), |d| d.to_string());
    println!("{:>14} {:>12} {:>10.1}ms", format!("dist 1→{}", far), shown, ms(t));

    if graph.vertex_count() <= args.diameter_limit {
        let t = Instant::now();
        let diameter = graph.diameter();
        println!("{:>14} {:>12} {:>10.1}ms", "diameter", diameter, ms(t));
    } else {
        println!("{:>14} {:>12}", "diameter", "skipped");
    }
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic.
// Vertices are 1..=n.
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) % max as u64) as usize
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
    /// Uniform vertex in `1..=n`.
    fn vertex(&mut self, n: usize) -> usize {
        self.next(n) + 1
    }
}

/// L-system fractal tree: each vertex spawns three children.
/// Deep paths (log depth) with exponential width.
fn gen_lsystem(n: usize, kind: RepresentationKind) -> Result<Graph> {
    let mut graph = Graph::new(n, kind)?;
    let branching = 3;

    let mut next_id = 2;
    let mut frontier = vec![1];

    while next_id <= n && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id > n {
                    break;
                }
                graph.add_edge(parent, next_id)?;
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    Ok(graph)
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge endpoint, so
/// high-degree vertices are picked proportionally more often.
fn gen_scale_free(n: usize, kind: RepresentationKind) -> Result<Graph> {
    let edges_per_vertex = 10;
    let mut graph = Graph::new(n, kind)?;
    let mut rng = FastRng::new(12345);
    let mut endpoints: Vec<usize> = Vec::with_capacity(n * edges_per_vertex * 2);

    // Seed: small clique
    let seed = 5.min(n);
    for i in 1..=seed {
        for j in (i + 1)..=seed {
            graph.add_edge(i, j)?;
            endpoints.push(i);
            endpoints.push(j);
        }
    }
    if endpoints.is_empty() {
        return Ok(graph);
    }

    for new_vertex in (seed + 1)..=n {
        let attach = edges_per_vertex.min(new_vertex - 1);
        for _ in 0..attach {
            let target = endpoints[rng.next(endpoints.len())];
            if target != new_vertex {
                graph.add_edge(new_vertex, target)?;
                endpoints.push(new_vertex);
                endpoints.push(target);
            }
        }
    }

    Ok(graph)
}

/// Small-world (Watts-Strogatz): ring lattice plus random rewiring.
fn gen_small_world(n: usize, kind: RepresentationKind) -> Result<Graph> {
    let k = 10; // neighbors on each side
    let p = 0.05f64; // rewire probability
    let mut graph = Graph::new(n, kind)?;
    let mut rng = FastRng::new(67890);

    for i in 1..=n {
        for j in 1..=k {
            let neighbor = (i - 1 + j) % n + 1;
            let chosen = if rng.next_f64() < p { rng.vertex(n) } else { neighbor };
            if chosen != i {
                graph.add_edge(i, chosen)?;
            }
        }
    }

    Ok(graph)
}

/// Erdos-Renyi: roughly ten uniform random edges per vertex.
fn gen_random(n: usize, kind: RepresentationKind) -> Result<Graph> {
    let mut graph = Graph::new(n, kind)?;
    let mut rng = FastRng::new(54321);

    for _ in 0..n * 10 {
        let u = rng.vertex(n);
        let v = rng.vertex(n);
        if u != v {
            graph.add_edge(u, v)?;
        }
    }

    Ok(graph)
}

/// Barbell: two dense clusters joined by a chain of bridge vertices.
/// Every cross-cluster path squeezes through the bridge.
fn gen_barbell(n: usize, kind: RepresentationKind) -> Result<Graph> {
    let bridge_len = 10.min(n);
    let cluster = (n - bridge_len) / 2;
    let mut graph = Graph::new(n, kind)?;
    let mut rng = FastRng::new(99999);

    // Cluster A: 1..=cluster; bridge follows; cluster B starts at b_start.
    let b_start = cluster + bridge_len + 1;
    for offset in [0, b_start - 1] {
        for i in 1..=cluster {
            for _ in 0..20.min(cluster.saturating_sub(1)) {
                let j = rng.vertex(cluster);
                if j != i {
                    graph.add_edge(offset + i, offset + j)?;
                }
            }
        }
    }

    // Chain from the last vertex of A through the bridge into B.
    let chain_end = b_start.min(n);
    for v in cluster.max(1)..chain_end {
        graph.add_edge(v, v + 1)?;
    }

    Ok(graph)
}

/// DLA (diffusion-limited aggregation): organic, tree-like growth.
///
/// Each new vertex attaches to a recent "surface" vertex, with an occasional
/// long-range second edge creating loops.
fn gen_dla(n: usize, kind: RepresentationKind) -> Result<Graph> {
    let mut graph = Graph::new(n, kind)?;
    let mut rng = FastRng::new(77777);

    let surface_max = 10_000;
    let mut surface: VecDeque<usize> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(1);

    for new_vertex in 2..=n {
        let attach_to = surface[rng.next(surface.len())];
        graph.add_edge(new_vertex, attach_to)?;

        // 10% chance of a second connection
        if rng.next(10) == 0 && new_vertex > 2 {
            let other = rng.vertex(new_vertex - 1);
            if other != attach_to {
                graph.add_edge(new_vertex, other)?;
            }
        }

        surface.push_back(new_vertex);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    Ok(graph)
}
