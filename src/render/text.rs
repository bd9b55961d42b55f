use std::io::Write;

use super::{Histogram, RenderError, Renderer};

const DEFAULT_BINS: usize = 10;
const BAR_WIDTH: usize = 50;
const BAR_CHARS: [char; 5] = ['#', '=', '*', '+', 'o'];

/// Equal-width bins shared by every series of a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    /// `counts.len() + 1` ascending edges; the last bin includes its upper edge.
    pub edges: Vec<f64>,
    /// Per series, one count per bin.
    pub counts: Vec<Vec<usize>>,
}

impl Bins {
    /// Bin the finite values of all series. `None` when there are none.
    pub fn from_histogram(histogram: &Histogram, bins: usize) -> Option<Self> {
        let finite = || {
            histogram
                .series
                .iter()
                .flat_map(|s| s.values.iter().copied())
                .filter(|v| v.is_finite())
        };
        let min = finite().fold(f64::INFINITY, f64::min);
        let max = finite().fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() {
            return None;
        }

        let bins = if min == max { 1 } else { bins.max(1) };
        // divide before subtracting so extreme ranges stay finite
        let width = if min == max {
            1.0
        } else {
            max / bins as f64 - min / bins as f64
        };
        let edges = (0..=bins)
            .map(|i| {
                if i == bins {
                    max.max(min + width)
                } else {
                    min + i as f64 * width
                }
            })
            .collect();

        let counts = histogram
            .series
            .iter()
            .map(|s| {
                let mut counts = vec![0; bins];
                for v in s.values.iter().filter(|v| v.is_finite()) {
                    let index = ((v / width - min / width).floor() as usize).min(bins - 1);
                    counts[index] += 1;
                }
                counts
            })
            .collect();

        Some(Self { edges, counts })
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Draws horizontal bars on a terminal.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    bins: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BINS)
    }
}

impl TextRenderer {
    pub fn new(bins: usize) -> Self {
        Self { bins: bins.max(1) }
    }

    fn bar_len(count: usize, max_count: usize, log: bool) -> usize {
        if count == 0 || max_count == 0 {
            return 0;
        }
        let fraction = if log {
            (count as f64 + 1.0).ln() / (max_count as f64 + 1.0).ln()
        } else {
            count as f64 / max_count as f64
        };
        ((fraction * BAR_WIDTH as f64).round() as usize).max(1)
    }
}

impl Renderer for TextRenderer {
    fn render(&self, histogram: &Histogram, out: &mut dyn Write) -> Result<(), RenderError> {
        writeln!(out, "{}", histogram.title)?;

        let bins = match Bins::from_histogram(histogram, self.bins) {
            Some(bins) => bins,
            None => {
                writeln!(out, "  (no data)")?;
                return Ok(());
            }
        };

        let label_width = histogram
            .series
            .iter()
            .map(|s| s.label.len())
            .max()
            .unwrap_or(0);
        let max_count = bins.max_count();

        let last = bins.edges.len() - 2;
        for (i, edge) in bins.edges.windows(2).enumerate() {
            let close = if i == last { "]" } else { ")" };
            let range = format!("[{:>10.2}, {:>10.2}{}", edge[0], edge[1], close);
            for (j, series) in histogram.series.iter().enumerate() {
                let count = bins.counts[j][i];
                let bar: String = std::iter::repeat(BAR_CHARS[j % BAR_CHARS.len()])
                    .take(Self::bar_len(count, max_count, histogram.log))
                    .collect();
                let prefix = if j == 0 { range.as_str() } else { "" };
                writeln!(
                    out,
                    "  {:<width$}  {:<label_width$}  {} {}",
                    prefix,
                    series.label,
                    bar,
                    count,
                    width = range.len(),
                    label_width = label_width
                )?;
            }
        }

        if histogram.log {
            writeln!(out, "  (log scale)")?;
        }
        Ok(())
    }
}
