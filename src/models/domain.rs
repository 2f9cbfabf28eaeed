use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cultural agenda event as published by the events feed
///
/// Coordinates and dates are kept as the feed's text; they are parsed when a
/// filter or the proximity matcher needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub address: String,
    pub neighborhood: String,
    /// First day of the event, `dd/mm/yyyy`
    pub begin_date: String,
    /// Last day of the event, `dd/mm/yyyy`
    pub end_date: String,
    pub time_of_day: String,
    pub latitude: String,
    pub longitude: String,
}

/// Bike-share station snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub street: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(rename = "bikes")]
    pub available_bikes: u32,
    #[serde(rename = "slots")]
    pub available_slots: u32,
}

/// Public parking lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parking {
    pub name: String,
    pub address: String,
    pub latitude: String,
    pub longitude: String,
}

/// Anything with a textual latitude/longitude pair
pub trait Located {
    fn latitude(&self) -> &str;
    fn longitude(&self) -> &str;
}

impl Located for Event {
    fn latitude(&self) -> &str {
        &self.latitude
    }

    fn longitude(&self) -> &str {
        &self.longitude
    }
}

impl Located for Station {
    fn latitude(&self) -> &str {
        &self.latitude
    }

    fn longitude(&self) -> &str {
        &self.longitude
    }
}

impl Located for Parking {
    fn latitude(&self) -> &str {
        &self.latitude
    }

    fn longitude(&self) -> &str {
        &self.longitude
    }
}

/// A point of interest that can be ranked against an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointOfInterest {
    Station(Station),
    Parking(Parking),
}

impl Located for PointOfInterest {
    fn latitude(&self) -> &str {
        match self {
            PointOfInterest::Station(s) => s.latitude(),
            PointOfInterest::Parking(p) => p.latitude(),
        }
    }

    fn longitude(&self) -> &str {
        match self {
            PointOfInterest::Station(s) => s.longitude(),
            PointOfInterest::Parking(p) => p.longitude(),
        }
    }
}

impl From<Station> for PointOfInterest {
    fn from(station: Station) -> Self {
        PointOfInterest::Station(station)
    }
}

impl From<Parking> for PointOfInterest {
    fn from(parking: Parking) -> Self {
        PointOfInterest::Parking(parking)
    }
}

/// Secondary filter applied to candidates after the radius cut
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Every candidate qualifies
    #[default]
    Any,
    /// Stations with at least one bike to take
    FreeBikes,
    /// Stations with at least one dock to leave a bike
    FreeSlots,
}

impl Availability {
    /// Parkings carry no counters, so they only pass `Any`
    pub fn admits(&self, point: &PointOfInterest) -> bool {
        match (self, point) {
            (Availability::Any, _) => true,
            (Availability::FreeBikes, PointOfInterest::Station(s)) => s.available_bikes > 0,
            (Availability::FreeSlots, PointOfInterest::Station(s)) => s.available_slots > 0,
            (_, PointOfInterest::Parking(_)) => false,
        }
    }
}

/// A candidate annotated with its distance to one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNeighbor<P = PointOfInterest> {
    #[serde(flatten)]
    pub point: P,
    #[serde(rename = "distanceMeters")]
    pub distance_meters: f64,
    /// Set when the event or the candidate has no coordinates, in which case
    /// `distance_meters` is 0.0 and says nothing about proximity
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unresolved: bool,
}

/// Event plus its ranked neighbor lists, keyed by output field name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedEvent {
    #[serde(flatten)]
    pub event: Event,
    pub neighbors: BTreeMap<String, Vec<RankedNeighbor>>,
}

impl EnrichedEvent {
    pub fn new(event: Event) -> Self {
        Self {
            event,
            neighbors: BTreeMap::new(),
        }
    }

    /// Neighbors attached under `field`, empty when the field was never matched
    pub fn neighbors(&self, field: &str) -> &[RankedNeighbor] {
        self.neighbors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}
