use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use graph_metrics_core::{RepresentationKind, VertexId};

use crate::report::ReportOptions;

/// Analyze an undirected graph stored as an edge list.
///
/// The file starts with the vertex count, followed by one `u v` pair per
/// line using 1-based vertex ids.
#[derive(Debug, Parser)]
#[command(name = "graph-metrics", version, about)]
pub struct Cli {
    /// Edge-list file to analyze
    pub path: PathBuf,

    /// Adjacency representation(s) to build and analyze
    #[arg(
        long,
        value_enum,
        default_value_t = RepresentationChoice::Both,
        env = "GRAPH_METRICS_REPRESENTATION"
    )]
    pub representation: RepresentationChoice,

    /// Root vertex for BFS, DFS and the distance query
    #[arg(long, default_value_t = 1)]
    pub start: VertexId,

    /// Vertex whose parent and level are shown for each search
    #[arg(long, default_value_t = 5)]
    pub probe: VertexId,

    /// Distance is measured from --start to this vertex
    #[arg(long, default_value_t = 4)]
    pub target: VertexId,

    /// Skip the all-pairs BFS diameter computation
    #[arg(long)]
    pub skip_diameter: bool,

    /// Number of vertices listed per connected component
    #[arg(long, default_value_t = 15)]
    pub components_preview: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Explicit log filter (e.g. `debug` or `graph_metrics_core=trace`)
    #[arg(long, env = "GRAPH_METRICS_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            start: self.start,
            probe: self.probe,
            target: self.target,
            include_diameter: !self.skip_diameter,
            components_preview: self.components_preview,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RepresentationChoice {
    Sparse,
    Dense,
    Both,
}

impl RepresentationChoice {
    pub fn kinds(self) -> Vec<RepresentationKind> {
        match self {
            RepresentationChoice::Sparse => vec![RepresentationKind::Sparse],
            RepresentationChoice::Dense => vec![RepresentationKind::Dense],
            RepresentationChoice::Both => {
                vec![RepresentationKind::Sparse, RepresentationKind::Dense]
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["graph-metrics", "graph.txt", "--representation", "both"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("graph.txt"));
        assert_eq!(cli.format, OutputFormat::Human);
        let opts = cli.report_options();
        assert_eq!((opts.start, opts.probe, opts.target), (1, 5, 4));
        assert!(opts.include_diameter);
        assert_eq!(opts.components_preview, 15);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "graph-metrics",
            "g.txt",
            "--representation",
            "dense",
            "--start",
            "3",
            "--skip-diameter",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.representation.kinds(), vec![RepresentationKind::Dense]);
        assert_eq!(cli.start, 3);
        assert!(!cli.report_options().include_diameter);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_rejects_unknown_representation() {
        assert!(Cli::try_parse_from(["graph-metrics", "g.txt", "--representation", "csr"]).is_err());
    }

    #[test]
    fn test_requires_path() {
        assert!(Cli::try_parse_from(["graph-metrics"]).is_err());
    }

    #[test]
    fn test_both_kinds_in_order() {
        assert_eq!(
            RepresentationChoice::Both.kinds(),
            vec![RepresentationKind::Sparse, RepresentationKind::Dense]
        );
    }
}
