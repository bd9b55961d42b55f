use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;

use super::error::GeocodeError;
use super::Coordinate;

/// Structured address. Empty fields are left out of the lookup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postalcode: Option<String>,
}

impl Address {
    fn params(&self) -> Vec<(&'static str, &str)> {
        [
            ("street", &self.street),
            ("city", &self.city),
            ("county", &self.county),
            ("state", &self.state),
            ("country", &self.country),
            ("postalcode", &self.postalcode),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .filter(|(_, v)| !v.trim().is_empty())
        .collect()
    }
}

/// A place to look up.
///
/// Bare region codes are ambiguous: "CA" can resolve to Canada. Qualify them,
/// e.g. "Sacramento, CA, USA".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GeocodeQuery {
    Text(String),
    Structured(Address),
}

impl std::fmt::Display for GeocodeQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocodeQuery::Text(text) => write!(f, "{}", text),
            GeocodeQuery::Structured(address) => {
                let parts: Vec<_> = address.params().into_iter().map(|(_, v)| v).collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

impl From<&str> for GeocodeQuery {
    fn from(text: &str) -> Self {
        GeocodeQuery::Text(text.to_string())
    }
}

pub trait Geocoder {
    fn geocode(&self, query: &GeocodeQuery) -> Result<Coordinate, GeocodeError>;
}

/// Accepts only `"lat, lon"` text queries. Never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralGeocoder;

impl Geocoder for LiteralGeocoder {
    fn geocode(&self, query: &GeocodeQuery) -> Result<Coordinate, GeocodeError> {
        match query {
            GeocodeQuery::Text(text) => Coordinate::from_coordinates(text)
                .ok_or_else(|| GeocodeError::NotFound(text.clone())),
            GeocodeQuery::Structured(_) => Err(GeocodeError::NotFound(query.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

/// Geocoder backed by a Nominatim search endpoint.
///
/// Literal `"lat, lon"` text is resolved locally without a request.
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub const DEFAULT_URL: &'static str = "https://nominatim.openstreetmap.org";

    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search(&self, query: &GeocodeQuery) -> Result<Vec<Place>, GeocodeError> {
        let mut params: Vec<(&str, &str)> = vec![("format", "json"), ("limit", "1")];
        match query {
            GeocodeQuery::Text(text) => params.push(("q", text.as_str())),
            GeocodeQuery::Structured(address) => params.extend(address.params()),
        }

        let url = format!("{}/search", self.base_url);
        debug!("Geocoding '{}' via {}", query, url);

        let places = self
            .client
            .get(&url)
            .query(&params)
            .send()?
            .error_for_status()?
            .json::<Vec<Place>>()?;
        Ok(places)
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: &GeocodeQuery) -> Result<Coordinate, GeocodeError> {
        if let Ok(coordinate) = LiteralGeocoder.geocode(query) {
            return Ok(coordinate);
        }

        let place = self
            .search(query)?
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))?;

        let coordinate = parse_place(&place)?;
        info!("Geocoded '{}' to {} ({})", query, coordinate, place.display_name);
        Ok(coordinate)
    }
}

fn parse_place(place: &Place) -> Result<Coordinate, GeocodeError> {
    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|e| GeocodeError::InvalidResponse(format!("{}: '{}'", e, value)))
    };
    Ok(Coordinate::new(parse(&place.lat)?, parse(&place.lon)?))
}
