//! Travel histograms from a location-history export.
//!
//! A [`history::LocationHistory`] loads the export into a chronological
//! track, derives per-step [`history::Delta`]s and indexes the track by
//! year. From there it can filter plausible driving legs and split a year
//! into trips, either by returning home or by calendar day. The [`geo`] and
//! [`render`] modules hold the distance, geocoding and histogram
//! collaborators.

pub mod config;
pub mod geo;
pub mod history;
pub mod render;
