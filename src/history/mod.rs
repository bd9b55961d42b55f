mod deltas;
mod error;
mod loader;
mod session;
mod trips;
mod types;
mod years;

pub use deltas::compute_deltas;
pub use error::HistoryError;
pub use loader::{default_history_path, load_track, parse_track, track_from_document};
pub use session::LocationHistory;
pub use trips::{
    driving_indexes, home_trip_lengths, is_driving_leg, trips_by_day, HOME_FENCE_MILES,
    MAX_LEG_MILES, MAX_LEG_MPH, MAX_LEG_SECONDS,
};
pub use types::{Delta, DeltaField, Sample};
pub use years::{YearPartition, YearRange};
