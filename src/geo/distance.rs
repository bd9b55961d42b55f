use geo::{Distance as _, Haversine, Point};

use super::Coordinate;

pub const METERS_PER_MILE: f64 = 1609.344;

pub trait Distance {
    /// Distance between two positions in statute miles.
    fn miles(&self, a: Coordinate, b: Coordinate) -> f64;
}

/// Great-circle distance on the mean Earth sphere.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreatCircle;

impl GreatCircle {
    pub fn meters(&self, a: Coordinate, b: Coordinate) -> f64 {
        Haversine::distance(Point::from(a), Point::from(b))
    }
}

impl Distance for GreatCircle {
    fn miles(&self, a: Coordinate, b: Coordinate) -> f64 {
        self.meters(a, b) / METERS_PER_MILE
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(c: Coordinate) -> Self {
        Point::new(c.longitude, c.latitude)
    }
}
