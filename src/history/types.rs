use chrono::{DateTime, Utc};

use crate::geo::Coordinate;

/// One observed position, timestamp in seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: f64,
}

impl Sample {
    pub fn new(latitude: f64, longitude: f64, timestamp: f64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// UTC date-time of the sample, `None` when the timestamp is outside
    /// the range chrono can represent.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        utc_datetime(self.timestamp)
    }
}

pub(crate) fn utc_datetime(timestamp: f64) -> Option<DateTime<Utc>> {
    if !timestamp.is_finite() {
        return None;
    }
    let secs = timestamp.floor();
    let nanos = ((timestamp - secs) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
}

/// Travel statistics between a sample and its predecessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    pub miles: f64,
    pub seconds: f64,
    pub mph: f64,
}

impl Delta {
    /// Placeholder for the first sample of a track, which has no predecessor.
    pub const SENTINEL: Delta = Delta {
        miles: 0.0,
        seconds: 0.0,
        mph: 0.0,
    };

    pub fn new(miles: f64, seconds: f64) -> Self {
        let mph = if seconds == 0.0 {
            f64::NAN
        } else {
            miles / seconds * 3600.0
        };
        Self {
            miles,
            seconds,
            mph,
        }
    }

    pub fn field(&self, field: DeltaField) -> f64 {
        match field {
            DeltaField::Miles => self.miles,
            DeltaField::Seconds => self.seconds,
            DeltaField::Mph => self.mph,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, clap::ValueEnum)]
pub enum DeltaField {
    #[strum(serialize = "miles")]
    Miles,
    #[strum(serialize = "seconds")]
    Seconds,
    #[strum(serialize = "mph")]
    Mph,
}
