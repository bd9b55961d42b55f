use crate::geo::Distance;

use super::types::{Delta, Sample};

/// Compute the delta of every sample against its predecessor.
///
/// The result is index-aligned with `track`; element 0 is [`Delta::SENTINEL`].
pub fn compute_deltas<D: Distance>(track: &[Sample], distance: &D) -> Vec<Delta> {
    let mut deltas = Vec::with_capacity(track.len());
    if track.is_empty() {
        return deltas;
    }
    deltas.push(Delta::SENTINEL);

    for pair in track.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        let seconds = current.timestamp - previous.timestamp;
        debug_assert!(
            seconds >= 0.0,
            "track out of order: {} after {}",
            current.timestamp,
            previous.timestamp
        );
        let miles = distance.miles(previous.coordinate(), current.coordinate());
        deltas.push(Delta::new(miles, seconds));
    }

    deltas
}
