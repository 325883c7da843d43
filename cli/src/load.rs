use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use graph_metrics_core::{Graph, RepresentationKind, VertexId};
use thiserror::Error;
use tracing::debug;

/// Failures while reading an edge-list file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open edge-list file {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid edge-list format at line {line}: {reason}")]
    InvalidFormat { line: usize, reason: String },

    #[error("I/O error while reading edge list: {0}")]
    Io(#[from] io::Error),
}

impl LoadError {
    fn format(line: usize, reason: impl Into<String>) -> Self {
        LoadError::InvalidFormat {
            line,
            reason: reason.into(),
        }
    }
}

/// Open `path` and build a graph on the requested representation.
pub fn load_edge_list(path: &Path, kind: RepresentationKind) -> Result<Graph, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    parse_edge_list(BufReader::new(file), kind)
}

/// Parse the edge-list text format.
///
/// The first non-blank line holds the vertex count, a positive integer.
/// Every following non-blank line holds exactly two whitespace-separated
/// vertex ids. Out-of-range ids are reported as a format error on the line
/// that carries them.
pub fn parse_edge_list<R: BufRead>(reader: R, kind: RepresentationKind) -> Result<Graph, LoadError> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(idx, line)| numbered_line(idx + 1, line));

    let (header_line, vertex_count) = loop {
        match lines.next() {
            Some(line) => {
                let (number, text) = line?;
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                break (number, parse_vertex_count(number, text)?);
            }
            None => return Err(LoadError::format(1, "missing vertex count")),
        }
    };

    let mut graph = Graph::new(vertex_count, kind)
        .map_err(|e| LoadError::format(header_line, e.to_string()))?;

    let mut pairs = 0usize;
    for line in lines {
        let (number, text) = line?;
        let tokens: Vec<&str> = text.split_whitespace().collect();
        match tokens.as_slice() {
            [] => continue,
            [u, v] => {
                let u = parse_vertex(number, u)?;
                let v = parse_vertex(number, v)?;
                graph
                    .add_edge(u, v)
                    .map_err(|e| LoadError::format(number, e.to_string()))?;
                pairs += 1;
            }
            other => {
                return Err(LoadError::format(
                    number,
                    format!("expected two vertex ids, found {} tokens", other.len()),
                ));
            }
        }
    }

    debug!(
        vertex_count,
        pairs,
        edges = graph.edge_count(),
        %kind,
        "edge list parsed"
    );
    Ok(graph)
}

/// Undecodable bytes are a format problem on that line; any other read
/// failure stays an I/O error.
fn numbered_line(number: usize, line: io::Result<String>) -> Result<(usize, String), LoadError> {
    match line {
        Ok(text) => Ok((number, text)),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            Err(LoadError::format(number, "line is not valid UTF-8"))
        }
        Err(e) => Err(LoadError::Io(e)),
    }
}

fn parse_vertex_count(line: usize, text: &str) -> Result<usize, LoadError> {
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(LoadError::format(
            line,
            format!("expected a positive vertex count, got '{}'", text),
        )),
    }
}

fn parse_vertex(line: usize, token: &str) -> Result<VertexId, LoadError> {
    token
        .parse::<VertexId>()
        .map_err(|_| LoadError::format(line, format!("'{}' is not a vertex id", token)))
}
