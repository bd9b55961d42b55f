use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("no location found for '{0}'")]
    NotFound(String),
    #[error("invalid geocoder response: {0}")]
    InvalidResponse(String),
}
