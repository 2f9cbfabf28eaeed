use crate::core::distance::{distance_between, round_meters, GeoPoint};
use crate::core::error::MatchError;
use crate::models::{Event, Located, RankedNeighbor};

/// Candidates farther than this from an event are never listed
pub const DEFAULT_RADIUS_M: f64 = 500.0;

/// Maximum neighbors kept per category and event
pub const DEFAULT_TOP_N: usize = 5;

/// Ranks located candidates around an event
///
/// # Ranking Stages
/// 1. Distance annotation on a fresh copy of every candidate
/// 2. Radius cut
/// 3. Optional availability predicate
/// 4. Stable ascending sort by distance
/// 5. Top-N truncation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityMatcher {
    radius_m: f64,
    top_n: usize,
}

impl ProximityMatcher {
    pub fn new(radius_m: f64, top_n: usize) -> Self {
        Self { radius_m, top_n }
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Rank `candidates` by distance to `event`
    ///
    /// The candidate slice is shared across events and never modified; each
    /// returned neighbor owns its own copy. An empty result is not an error.
    ///
    /// # Errors
    /// `InvalidCoordinate` when the event or a candidate carries a coordinate
    /// that does not parse or is out of range.
    pub fn rank<P, F>(
        &self,
        event: &Event,
        candidates: &[P],
        availability: Option<F>,
    ) -> Result<Vec<RankedNeighbor<P>>, MatchError>
    where
        P: Located + Clone,
        F: Fn(&P) -> bool,
    {
        let origin = GeoPoint::of(event)?;
        if origin.is_none() {
            tracing::debug!("Event {:?} has no coordinates, distances default to 0", event.name);
        }

        let mut ranked = Vec::new();
        for candidate in candidates {
            let position = GeoPoint::of(candidate)?;
            let distance_meters = round_meters(distance_between(origin.as_ref(), position.as_ref()));

            if distance_meters > self.radius_m {
                continue;
            }
            if let Some(admits) = availability.as_ref() {
                if !admits(candidate) {
                    continue;
                }
            }

            ranked.push(RankedNeighbor {
                point: candidate.clone(),
                distance_meters,
                unresolved: origin.is_none() || position.is_none(),
            });
        }

        // `sort_by` is stable, so equal distances keep feed order
        ranked.sort_by(|a, b| {
            a.distance_meters
                .partial_cmp(&b.distance_meters)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(self.top_n);

        Ok(ranked)
    }
}

impl Default for ProximityMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_M, DEFAULT_TOP_N)
    }
}
