use std::path::Path;

use log::info;

use crate::geo::{Coordinate, GeocodeQuery, Geocoder, GreatCircle};

use super::deltas::compute_deltas;
use super::error::HistoryError;
use super::loader::{load_track, parse_track};
use super::trips::{driving_indexes, home_trip_lengths, trips_by_day};
use super::types::{Delta, DeltaField, Sample};
use super::years::YearPartition;

/// A loaded location history: the track, its deltas and the year index.
///
/// Everything is derived once at construction and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationHistory {
    track: Vec<Sample>,
    deltas: Vec<Delta>,
    years: YearPartition,
}

impl LocationHistory {
    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        Self::from_track(load_track(path)?)
    }

    pub fn from_json(json: &str) -> Result<Self, HistoryError> {
        Self::from_track(parse_track(json)?)
    }

    /// Build from samples already in chronological order.
    pub fn from_track(track: Vec<Sample>) -> Result<Self, HistoryError> {
        let years = YearPartition::from_track(&track)?;
        let deltas = compute_deltas(&track, &GreatCircle);
        info!(
            "Indexed {} samples across {} years",
            track.len(),
            years.len()
        );
        Ok(Self {
            track,
            deltas,
            years,
        })
    }

    pub fn track(&self) -> &[Sample] {
        &self.track
    }

    pub fn deltas(&self) -> &[Delta] {
        &self.deltas
    }

    pub fn years(&self) -> &YearPartition {
        &self.years
    }

    pub fn year_labels(&self) -> Vec<String> {
        self.years.labels()
    }

    /// Samples and deltas of one year.
    pub fn year(&self, year: i32) -> Result<(&[Sample], &[Delta]), HistoryError> {
        let range = self.years.range(year)?;
        Ok((&self.track[range.clone()], &self.deltas[range]))
    }

    /// Driving legs over the whole track.
    pub fn driving_leg_deltas(&self) -> Vec<Delta> {
        select(&self.deltas, &driving_indexes(&self.deltas))
    }

    /// Driving legs of each year, in year order.
    pub fn driving_leg_deltas_by_year(&self) -> Vec<Vec<Delta>> {
        self.years
            .ranges()
            .iter()
            .map(|r| {
                let yearly = &self.deltas[r.range()];
                select(yearly, &driving_indexes(yearly))
            })
            .collect()
    }

    /// One value series per year of the chosen driving-leg field.
    pub fn driving_leg_field_by_year(&self, field: DeltaField) -> Vec<Vec<f64>> {
        self.driving_leg_deltas_by_year()
            .iter()
            .map(|deltas| deltas.iter().map(|d| d.field(field)).collect())
            .collect()
    }

    pub fn home_trip_lengths(&self, year: i32, home: Coordinate) -> Result<Vec<f64>, HistoryError> {
        let (track, deltas) = self.year(year)?;
        Ok(home_trip_lengths(track, deltas, home, &GreatCircle))
    }

    /// Resolve `home` with `geocoder`, then split the year into home trips.
    pub fn home_trip_lengths_for<G: Geocoder + ?Sized>(
        &self,
        year: i32,
        home: &GeocodeQuery,
        geocoder: &G,
    ) -> Result<Vec<f64>, HistoryError> {
        self.years.range(year)?;
        let home = geocoder.geocode(home)?;
        self.home_trip_lengths(year, home)
    }

    pub fn trips_by_day(&self, year: i32) -> Result<Vec<f64>, HistoryError> {
        let (track, deltas) = self.year(year)?;
        trips_by_day(track, deltas)
    }
}

fn select(deltas: &[Delta], indexes: &[usize]) -> Vec<Delta> {
    indexes.iter().map(|&i| deltas[i]).collect()
}
