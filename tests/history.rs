//! End-to-end checks of loading a history export and segmenting it.

use std::cell::Cell;
use std::fs;

use pretty_assertions::assert_eq;
use trip_o_mat::geo::{Coordinate, GeocodeError, GeocodeQuery, Geocoder, GreatCircle};
use trip_o_mat::history::{
    compute_deltas, driving_indexes, parse_track, HistoryError, LocationHistory, Sample,
    YearPartition,
};

const HOME: (f64, f64) = (37.7749, -122.4194);
const MINUTE_MS: i64 = 60_000;
// 2018-12-31T23:00:00Z
const NEW_YEARS_EVE: i64 = 1_546_297_200_000;

/// Records in chronological order; written newest-first like the export.
fn export(points: &[(f64, f64, i64)]) -> String {
    let records: Vec<String> = points
        .iter()
        .rev()
        .map(|&(lat, lon, ms)| {
            format!(
                r#"{{"latitudeE7": {}, "longitudeE7": {}, "timestampMs": "{}", "accuracy": 20}}"#,
                (lat * 1e7).round() as i64,
                (lon * 1e7).round() as i64,
                ms
            )
        })
        .collect();
    format!(r#"{{"locations": [{}]}}"#, records.join(",\n"))
}

/// Leave home just before midnight on New Year's Eve, drive out and back,
/// then leave again in 2019 without coming home.
fn sample_points() -> Vec<(f64, f64, i64)> {
    let (lat, lon) = HOME;
    let t = NEW_YEARS_EVE;
    vec![
        (lat, lon, t),
        (lat + 0.5, lon, t + 30 * MINUTE_MS),
        (lat + 1.0, lon, t + 60 * MINUTE_MS),
        (lat + 0.5, lon, t + 90 * MINUTE_MS),
        (lat, lon, t + 120 * MINUTE_MS),
        (lat, lon, t + 180 * MINUTE_MS),
        (lat + 1.0, lon, t + 240 * MINUTE_MS),
        (lat + 1.0, lon + 1.0, t + 300 * MINUTE_MS),
    ]
}

#[test]
fn load_from_file() {
    let path = std::env::temp_dir().join(format!("trip-o-mat-{}.json", std::process::id()));
    fs::write(&path, export(&sample_points())).unwrap();
    let history = LocationHistory::load(&path);
    fs::remove_file(&path).unwrap();

    let history = history.unwrap();
    assert_eq!(history.track().len(), 8);
    assert_eq!(history.year_labels(), vec!["2018", "2019"]);
}

#[test]
fn missing_file() {
    let path = std::env::temp_dir().join("trip-o-mat-does-not-exist.json");
    assert!(matches!(
        LocationHistory::load(&path),
        Err(HistoryError::Io(_))
    ));
}

#[test]
fn track_is_reversed_export() {
    let points = sample_points();
    let json = export(&points);
    let raw: serde_json::Value = serde_json::from_str(&json).unwrap();
    let track = parse_track(&json).unwrap();
    let n = track.len();

    for (i, sample) in track.iter().enumerate() {
        let record = &raw["locations"][n - 1 - i];
        let lat_e7 = record["latitudeE7"].as_i64().unwrap();
        assert_eq!(sample.latitude, lat_e7 as f64 * 1e-7);
    }
    assert!(track.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn deltas_and_partition_cover_the_track() {
    let history = LocationHistory::from_json(&export(&sample_points())).unwrap();
    let (track, deltas) = (history.track(), history.deltas());

    assert_eq!(deltas.len(), track.len());
    assert_eq!((deltas[0].miles, deltas[0].seconds, deltas[0].mph), (0.0, 0.0, 0.0));
    for i in 1..track.len() {
        assert_eq!(deltas[i].seconds, track[i].timestamp - track[i - 1].timestamp);
    }

    let ranges = history.years().ranges();
    assert_eq!(ranges[0].range(), 0..2);
    assert_eq!(ranges[1].range(), 2..8);
}

#[test]
fn home_trips_by_year() {
    let history = LocationHistory::from_json(&export(&sample_points())).unwrap();
    let home = Coordinate::new(HOME.0, HOME.1);
    let deltas = history.deltas();

    // 2018 ends half a degree north of home, an unfinished trip
    let trips = history.home_trip_lengths(2018, home).unwrap();
    assert_eq!(trips, vec![deltas[1].miles]);

    // 2019: back home at 01:00, then away until the end
    let trips = history.home_trip_lengths(2019, home).unwrap();
    assert_eq!(trips.len(), 2);
    let first: f64 = deltas[2..4].iter().map(|d| d.miles).sum();
    let second: f64 = deltas[6..8].iter().map(|d| d.miles).sum();
    assert_eq!(trips, vec![first, second]);
}

#[test]
fn never_home_is_one_year_long_trip() {
    let history = LocationHistory::from_json(&export(&sample_points())).unwrap();
    let far_away = Coordinate::new(-33.8688, 151.2093);
    let (_, deltas) = history.year(2019).unwrap();

    let trips = history.home_trip_lengths(2019, far_away).unwrap();
    let total: f64 = deltas.iter().map(|d| d.miles).sum();
    assert_eq!(trips, vec![total]);
}

#[test]
fn trips_by_day_within_year() {
    let history = LocationHistory::from_json(&export(&sample_points())).unwrap();
    let (_, deltas) = history.year(2019).unwrap();

    // every 2019 leg is plausible and they all fall on January 1st
    assert_eq!(driving_indexes(deltas).len(), 6);
    let expected: f64 = deltas[1..].iter().map(|d| d.miles).sum();
    let trips = history.trips_by_day(2019).unwrap();
    assert_eq!(trips, vec![0.0, expected]);

    let first_leg = history.deltas()[1].miles;
    assert_eq!(history.trips_by_day(2018).unwrap(), vec![0.0, first_leg]);
}

struct CountingGeocoder {
    calls: Cell<usize>,
    result: Option<Coordinate>,
}

impl Geocoder for CountingGeocoder {
    fn geocode(&self, query: &GeocodeQuery) -> Result<Coordinate, GeocodeError> {
        self.calls.set(self.calls.get() + 1);
        self.result
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))
    }
}

#[test]
fn geocoder_is_injected() {
    let history = LocationHistory::from_json(&export(&sample_points())).unwrap();
    let geocoder = CountingGeocoder {
        calls: Cell::new(0),
        result: Some(Coordinate::new(HOME.0, HOME.1)),
    };

    let trips = history
        .home_trip_lengths_for(2019, &"San Francisco, CA, USA".into(), &geocoder)
        .unwrap();
    assert_eq!(trips.len(), 2);
    assert_eq!(geocoder.calls.get(), 1);

    // unknown years fail before any lookup
    assert!(matches!(
        history.home_trip_lengths_for(1999, &"anywhere".into(), &geocoder),
        Err(HistoryError::YearNotFound(1999))
    ));
    assert_eq!(geocoder.calls.get(), 1);

    let failing = CountingGeocoder {
        calls: Cell::new(0),
        result: None,
    };
    assert!(matches!(
        history.home_trip_lengths_for(2019, &"nowhere".into(), &failing),
        Err(HistoryError::Geocode(GeocodeError::NotFound(_)))
    ));
}

#[test]
fn derivation_is_deterministic() {
    let json = export(&sample_points());
    let first = parse_track(&json).unwrap();
    let second = parse_track(&json).unwrap();
    assert_eq!(first, second);

    let d1 = compute_deltas(&first, &GreatCircle);
    let d2 = compute_deltas(&second, &GreatCircle);
    let bits = |d: &[trip_o_mat::history::Delta]| -> Vec<(u64, u64, u64)> {
        d.iter()
            .map(|d| (d.miles.to_bits(), d.seconds.to_bits(), d.mph.to_bits()))
            .collect()
    };
    assert_eq!(bits(&d1), bits(&d2));

    assert_eq!(
        YearPartition::from_track(&first).unwrap(),
        YearPartition::from_track(&second).unwrap()
    );
}

#[test]
fn samples_outside_chrono_range_are_rejected() {
    let json = r#"{"locations": [{"latitudeE7": 0, "longitudeE7": 0, "timestampMs": "9223372036854775807"}]}"#;
    assert!(matches!(
        parse_track(json),
        Err(HistoryError::DataFormat { index: 0, .. })
    ));
    assert!(YearPartition::from_track(&[Sample::new(0.0, 0.0, f64::INFINITY)]).is_err());
}
