use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber.
///
/// `GRAPH_METRICS_LOG` or `RUST_LOG` win when set; otherwise `--log-level`,
/// then `-v` (debug), then warn. Output goes to stderr so reports on stdout
/// stay machine-readable.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let level = match (verbose, log_level) {
        (_, Some(level)) => level,
        (true, None) => "debug",
        (false, None) => "warn",
    };

    let filter = EnvFilter::try_from_env("GRAPH_METRICS_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}

/// A bare level applies to this workspace's crates only; anything with a
/// `=` is passed through as a full directive.
fn default_directive(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("graph_metrics={level},graph_metrics_core={level}")
    }
}
