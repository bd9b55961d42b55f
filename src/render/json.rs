use std::io::Write;

use super::{Histogram, RenderError, Renderer};

/// Writes the histogram description as JSON for an external plotter.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, histogram: &Histogram, out: &mut dyn Write) -> Result<(), RenderError> {
        serde_json::to_writer_pretty(&mut *out, histogram)?;
        writeln!(out)?;
        Ok(())
    }
}
