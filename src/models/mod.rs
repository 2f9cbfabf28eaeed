// Model exports
pub mod domain;
pub mod filter;
pub mod responses;

pub use domain::{Availability, EnrichedEvent, Event, Located, Parking, PointOfInterest, RankedNeighbor, Station};
pub use filter::FilterSpec;
pub use responses::MatchReport;
