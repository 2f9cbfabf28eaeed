//! Agenda Algo - Nearby bike-share stations and parkings for cultural events
//!
//! This library filters a cultural agenda with user supplied text and date
//! expressions, then attaches to every surviving event the closest bike-share
//! stations (with bikes, with free docks) and parkings within a fixed radius.

pub mod cli;
pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use self::core::{compile, distance, normalize, MatchConfig, MatchError, MatchPipeline, ProximityMatcher};
pub use self::models::{Availability, EnrichedEvent, Event, FilterSpec, MatchReport, Parking, PointOfInterest, RankedNeighbor, Station};

/// Output field for stations with bikes to take
pub const FIELD_BICING_BIKES: &str = "bicing_bikes";
/// Output field for stations with free docks
pub const FIELD_BICING_SLOTS: &str = "bicing_slots";
/// Output field for parkings
pub const FIELD_PARKINGS: &str = "parkings";

/// The three neighbor categories of a standard run
pub fn standard_configs(
    stations: Vec<Station>,
    parkings: Vec<Parking>,
    matcher: ProximityMatcher,
) -> Vec<MatchConfig> {
    let stations: Vec<PointOfInterest> = stations.into_iter().map(PointOfInterest::from).collect();
    let parkings: Vec<PointOfInterest> = parkings.into_iter().map(PointOfInterest::from).collect();

    vec![
        MatchConfig::new(FIELD_BICING_BIKES, stations.clone(), matcher, Availability::FreeBikes),
        MatchConfig::new(FIELD_BICING_SLOTS, stations, matcher, Availability::FreeSlots),
        MatchConfig::new(FIELD_PARKINGS, parkings, matcher, Availability::Any),
    ]
}
