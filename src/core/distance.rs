use crate::core::error::MatchError;
use crate::models::Located;

/// Earth's radius in meters, as used by the agenda tooling
///
/// Slightly below the 6,371 km mean radius.
pub const EARTH_RADIUS_M: f64 = 6_367_000.0;

/// A validated decimal-degree position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, MatchError> {
        Ok(Self {
            latitude: check_range(latitude, 90.0, &latitude.to_string())?,
            longitude: check_range(longitude, 180.0, &longitude.to_string())?,
        })
    }

    /// Parse a position from feed text
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, MatchError> {
        Ok(Self {
            latitude: parse_degrees(latitude, 90.0)?,
            longitude: parse_degrees(longitude, 180.0)?,
        })
    }

    /// Resolve the position of a record
    ///
    /// Returns `Ok(None)` when the record carries no coordinates at all, an
    /// error when it carries something that is not a valid coordinate.
    pub fn of<L: Located + ?Sized>(record: &L) -> Result<Option<Self>, MatchError> {
        if record.latitude().trim().is_empty() || record.longitude().trim().is_empty() {
            return Ok(None);
        }
        Self::parse(record.latitude(), record.longitude()).map(Some)
    }
}

fn parse_degrees(value: &str, limit: f64) -> Result<f64, MatchError> {
    let degrees: f64 = value
        .trim()
        .parse()
        .map_err(|_| MatchError::coordinate(value, "not a number"))?;
    check_range(degrees, limit, value)
}

fn check_range(degrees: f64, limit: f64, raw: &str) -> Result<f64, MatchError> {
    if !degrees.is_finite() {
        return Err(MatchError::coordinate(raw, "not finite"));
    }
    if degrees.abs() > limit {
        return Err(MatchError::coordinate(raw, "out of range"));
    }
    Ok(degrees)
}

/// Calculate the Haversine distance between two points in meters
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

/// Distance in meters between two feed coordinates given as text
pub fn distance(lon1: &str, lat1: &str, lon2: &str, lat2: &str) -> Result<f64, MatchError> {
    let a = GeoPoint::parse(lat1, lon1)?;
    let b = GeoPoint::parse(lat2, lon2)?;
    Ok(distance_between(Some(&a), Some(&b)))
}

/// Distance in meters between two optional positions
///
/// A missing position yields 0.0, meaning "no meaningful distance" rather
/// than "co-located".
#[inline]
pub fn distance_between(a: Option<&GeoPoint>, b: Option<&GeoPoint>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude),
        _ => 0.0,
    }
}

/// Round to centimeters
#[inline]
pub fn round_meters(meters: f64) -> f64 {
    (meters * 100.0).round() / 100.0
}
