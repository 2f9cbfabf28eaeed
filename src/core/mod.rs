// Core algorithm exports
pub mod distance;
pub mod error;
pub mod filters;
pub mod matcher;
pub mod normalize;
pub mod pipeline;

pub use distance::{distance, distance_between, haversine_distance, GeoPoint, EARTH_RADIUS_M};
pub use error::MatchError;
pub use filters::{compile, parse_date, CompiledFilter, DATE_FORMAT};
pub use matcher::{ProximityMatcher, DEFAULT_RADIUS_M, DEFAULT_TOP_N};
pub use normalize::normalize;
pub use pipeline::{MatchConfig, MatchPipeline};
