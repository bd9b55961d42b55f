use chrono::Datelike;
use log::debug;

use crate::geo::{Coordinate, Distance};

use super::error::HistoryError;
use super::types::{Delta, Sample};

pub const MAX_LEG_MILES: f64 = 200.0;
pub const MAX_LEG_MPH: f64 = 100.0;
pub const MAX_LEG_SECONDS: f64 = MAX_LEG_MILES / MAX_LEG_MPH * 3600.0;

/// Radius around home, in miles, inside which a sample counts as "at home".
pub const HOME_FENCE_MILES: f64 = 5280.0 / 200.0;

/// Whether a delta looks like a physically plausible vehicle leg.
///
/// All bounds are strict. A NaN speed (zero elapsed seconds) fails the
/// comparison and is rejected.
pub fn is_driving_leg(delta: &Delta) -> bool {
    delta.miles < MAX_LEG_MILES && delta.seconds < MAX_LEG_SECONDS && delta.mph < MAX_LEG_MPH
}

/// Indexes into `deltas` of the plausible driving legs.
pub fn driving_indexes(deltas: &[Delta]) -> Vec<usize> {
    deltas
        .iter()
        .enumerate()
        .filter(|(_, d)| is_driving_leg(d))
        .map(|(i, _)| i)
        .collect()
}

/// Split a run of samples into trips that start and end at `home`.
///
/// `track` and `deltas` must be aligned slices, typically one year. Miles
/// accumulate while the sample is outside the home fence; entering the fence
/// closes the current trip. An unfinished trip at the end is still reported.
pub fn home_trip_lengths<D: Distance>(
    track: &[Sample],
    deltas: &[Delta],
    home: Coordinate,
    distance: &D,
) -> Vec<f64> {
    debug_assert_eq!(track.len(), deltas.len());
    let mut trips = Vec::new();
    let mut trip_miles = 0.0;

    for (sample, delta) in track.iter().zip(deltas) {
        if distance.miles(home, sample.coordinate()) < HOME_FENCE_MILES {
            if trip_miles > 0.0 {
                trips.push(trip_miles);
                trip_miles = 0.0;
            }
        } else {
            trip_miles += delta.miles;
        }
    }

    if trip_miles > 0.0 {
        trips.push(trip_miles);
    }

    debug!("Found {} home trips in {} samples", trips.len(), track.len());
    trips
}

/// Total driving-leg miles per UTC calendar day.
///
/// Only plausible driving legs take part. The first point emits a leading
/// zero, every day change emits the finished day's total, and the last day's
/// total is emitted at the end. A point that opens a new day does not add its
/// own miles, since that leg ended on the previous day's step.
pub fn trips_by_day(track: &[Sample], deltas: &[Delta]) -> Result<Vec<f64>, HistoryError> {
    debug_assert_eq!(track.len(), deltas.len());
    let mut trips = Vec::new();
    let mut trip_miles = 0.0;
    let mut previous_day = None;

    for index in driving_indexes(deltas) {
        let (sample, delta) = (&track[index], &deltas[index]);
        let dt = sample.datetime().ok_or_else(|| HistoryError::DataFormat {
            index,
            message: format!("timestamp {} out of range", sample.timestamp),
        })?;
        let day = (dt.month(), dt.day());

        if previous_day != Some(day) {
            trips.push(trip_miles);
            previous_day = Some(day);
            trip_miles = 0.0;
        } else {
            trip_miles += delta.miles;
        }
    }

    if previous_day.is_some() {
        trips.push(trip_miles);
    }

    debug!("Found {} day groups in {} samples", trips.len(), track.len());
    Ok(trips)
}
