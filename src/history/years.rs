use std::ops::Range;

use chrono::Datelike;

use super::error::HistoryError;
use super::types::Sample;

/// Contiguous track index range belonging to one UTC calendar year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRange {
    pub year: i32,
    pub start: usize,
    pub stop: usize,
}

impl YearRange {
    pub fn range(&self) -> Range<usize> {
        self.start..self.stop
    }

    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }
}

/// Year ranges in track order. Ranges are contiguous and together cover the
/// whole track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearPartition {
    ranges: Vec<YearRange>,
}

impl YearPartition {
    pub fn from_track(track: &[Sample]) -> Result<Self, HistoryError> {
        let mut starts: Vec<(i32, usize)> = Vec::new();
        let mut previous_year = None;

        for (index, sample) in track.iter().enumerate() {
            let year = sample
                .datetime()
                .ok_or_else(|| HistoryError::DataFormat {
                    index,
                    message: format!("timestamp {} out of range", sample.timestamp),
                })?
                .year();
            if previous_year != Some(year) {
                starts.push((year, index));
                previous_year = Some(year);
            }
        }

        let ranges = starts
            .iter()
            .enumerate()
            .map(|(i, &(year, start))| YearRange {
                year,
                start,
                stop: starts.get(i + 1).map_or(track.len(), |&(_, next)| next),
            })
            .collect();

        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[YearRange] {
        &self.ranges
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.ranges.iter().map(|r| r.year)
    }

    pub fn labels(&self) -> Vec<String> {
        self.years().map(|y| y.to_string()).collect()
    }

    pub fn range(&self, year: i32) -> Result<Range<usize>, HistoryError> {
        self.ranges
            .iter()
            .find(|r| r.year == year)
            .map(YearRange::range)
            .ok_or(HistoryError::YearNotFound(year))
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
