use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::Value;

use super::error::HistoryError;
use super::types::{utc_datetime, Sample};

const E7: f64 = 1e-7;
const MS: f64 = 1e-3;

/// Takeout location history under the user's home directory.
pub fn default_history_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join("Downloads")
            .join("Takeout")
            .join("Location History")
            .join("Location History.json"),
    )
}

/// Read a location history file and return its samples oldest-first.
pub fn load_track(path: &Path) -> Result<Vec<Sample>, HistoryError> {
    info!("Reading location history from {}", path.display());
    let content = fs::read_to_string(path)?;
    parse_track(&content)
}

pub fn parse_track(json: &str) -> Result<Vec<Sample>, HistoryError> {
    let root: Value = serde_json::from_str(json)?;
    track_from_document(&root)
}

/// Convert the `locations` list of a history document into a track.
///
/// The export lists the newest record first; the returned track is reversed
/// into chronological order, so `track[i]` comes from `locations[n - 1 - i]`.
pub fn track_from_document(root: &Value) -> Result<Vec<Sample>, HistoryError> {
    let locations = root
        .get("locations")
        .ok_or_else(|| HistoryError::Document("missing 'locations'".into()))?
        .as_array()
        .ok_or_else(|| HistoryError::Document("'locations' is not a list".into()))?;

    let mut track = locations
        .iter()
        .enumerate()
        .map(|(i, v)| parse_record(i, v))
        .collect::<Result<Vec<_>, _>>()?;
    track.reverse();

    match (track.first(), track.last()) {
        (Some(first), Some(last)) => info!(
            "Loaded {} samples from {:?} to {:?}",
            track.len(),
            first.datetime(),
            last.datetime()
        ),
        _ => info!("Location history is empty"),
    }

    Ok(track)
}

fn parse_record(index: usize, value: &Value) -> Result<Sample, HistoryError> {
    let err = |msg: String| HistoryError::DataFormat {
        index,
        message: msg,
    };
    let map = value
        .as_object()
        .ok_or_else(|| err("expected object".into()))?;

    let field = |key: &str| -> Result<i64, HistoryError> {
        let v = map.get(key).ok_or_else(|| err(format!("missing '{}'", key)))?;
        integer(v).ok_or_else(|| err(format!("'{}' is not an integer: {}", key, v)))
    };

    let latitude = field("latitudeE7")? as f64 * E7;
    let longitude = field("longitudeE7")? as f64 * E7;
    let timestamp = field("timestampMs")? as f64 * MS;

    if utc_datetime(timestamp).is_none() {
        return Err(err(format!("timestamp {} out of range", timestamp)));
    }

    Ok(Sample {
        latitude,
        longitude,
        timestamp,
    })
}

/// Integers arrive either as JSON numbers or as decimal strings.
fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => {
            debug!("Rejecting non-integer value {}", value);
            None
        }
    }
}
