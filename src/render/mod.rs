mod error;
mod json;
mod text;

pub use error::RenderError;
pub use json::JsonRenderer;
pub use text::{Bins, TextRenderer};

use std::io::Write;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HistType {
    #[default]
    Bar,
    Step,
    StepFilled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// Everything a renderer needs to draw one histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub title: String,
    pub series: Vec<Series>,
    pub log: bool,
    pub style: HistType,
}

impl Histogram {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            series: Vec::new(),
            log: false,
            style: HistType::default(),
        }
    }

    pub fn series(mut self, label: impl Into<String>, values: Vec<f64>) -> Self {
        self.series.push(Series::new(label, values));
        self
    }

    pub fn log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    pub fn style(mut self, style: HistType) -> Self {
        self.style = style;
        self
    }
}

pub trait Renderer {
    fn render(&self, histogram: &Histogram, out: &mut dyn Write) -> Result<(), RenderError>;
}

pub fn renderer(format: OutputFormat, bins: usize) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer::new(bins)),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
