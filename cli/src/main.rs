//! graph-metrics: load an edge-list file and report degree statistics,
//! search trees, distance, diameter and connected components for each
//! selected adjacency representation.

mod config;
mod load;
mod logging;
mod report;

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use config::{Cli, OutputFormat};
use report::Report;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref()) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = cli.report_options();
    let mut reports = Vec::new();

    for kind in cli.representation.kinds() {
        let t = Instant::now();
        let graph = load::load_edge_list(&cli.path, kind)
            .with_context(|| format!("failed to load {}", cli.path.display()))?;
        let load_ms = t.elapsed().as_secs_f64() * 1000.0;
        info!(
            %kind,
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            load_ms,
            "graph loaded"
        );

        let mut report = Report::build(&graph, &options)
            .with_context(|| format!("analysis failed on the {} representation", kind))?;
        report.load_ms = load_ms;
        reports.push(report);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Human => {
            for report in &reports {
                report::write_human(report, &mut out)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &reports)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
