use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}
