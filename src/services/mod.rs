// Service exports
pub mod feeds;
pub mod records;
pub mod xml;

pub use feeds::{FeedClient, FeedError};
pub use records::{parse_events, parse_parkings, parse_stations};
