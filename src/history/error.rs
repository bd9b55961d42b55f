use thiserror::Error;

use crate::geo::GeocodeError;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid history document: {0}")]
    Document(String),
    #[error("malformed location record {index}: {message}")]
    DataFormat { index: usize, message: String },
    #[error("year {0} not present in location history")]
    YearNotFound(i32),
    #[error("home lookup failed: {0}")]
    Geocode(#[from] GeocodeError),
}
