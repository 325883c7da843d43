use serde::Serialize;

/// Summary statistics over a graph's full degree sequence.
///
/// Isolated vertices count as degree 0 and are included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegreeMetrics {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    /// Middle value for an odd count; mean of the two middle values for an even count.
    pub median: f64,
}

impl DegreeMetrics {
    /// Compute metrics from a degree sequence in any order.
    /// An empty sequence yields all zeros.
    pub fn from_degrees(degrees: &[usize]) -> Self {
        if degrees.is_empty() {
            return Self {
                min: 0,
                max: 0,
                mean: 0.0,
                median: 0.0,
            };
        }

        let mut sorted = degrees.to_vec();
        sorted.sort_unstable();

        let n = sorted.len();
        let median = if n % 2 == 1 {
            sorted[n / 2] as f64
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
        };
        let total: usize = sorted.iter().sum();

        Self {
            min: sorted[0],
            max: sorted[n - 1],
            mean: total as f64 / n as f64,
            median,
        }
    }
}
