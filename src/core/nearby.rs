use chrono::{DateTime, Utc};
use geo::Point;
use crate::core::ranker::rank_by_distance;
use crate::models::{PublicProfile, UserRecord};

/// Default cap on returned users
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Result of a nearby search
#[derive(Debug)]
pub struct NearbyResult {
    pub users: Vec<PublicProfile>,
    /// Candidates within the radius before truncation
    pub total_within_radius: usize,
}

/// Nearby-users orchestrator
///
/// # Pipeline Stages
/// 1. Coordinate extraction and distance per candidate
/// 2. Radius filter
/// 3. Stable ascending sort by distance
/// 4. Truncation to `max_results`
/// 5. Redaction into the public shape
#[derive(Debug, Clone)]
pub struct NearbyFinder {
    max_results: usize,
    include_bearing: bool,
}

impl NearbyFinder {
    pub fn new(max_results: usize, include_bearing: bool) -> Self {
        Self {
            max_results,
            include_bearing,
        }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Rank, truncate and redact `candidates` around (latitude, longitude)
    ///
    /// Inputs are expected to be validated by the caller; `radius_km` must be
    /// positive.
    pub fn find_nearby(
        &self,
        candidates: Vec<UserRecord>,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> NearbyResult {
        self.find_nearby_at(candidates, latitude, longitude, radius_km, Utc::now())
    }

    /// Same as [`find_nearby`](Self::find_nearby) with an explicit clock
    pub fn find_nearby_at(
        &self,
        candidates: Vec<UserRecord>,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        now: DateTime<Utc>,
    ) -> NearbyResult {
        let reference = Point::new(longitude, latitude);
        let mut ranked = rank_by_distance(candidates, reference, radius_km, self.include_bearing);
        let total_within_radius = ranked.len();

        ranked.truncate(self.max_results);

        let users = ranked
            .iter()
            .map(|candidate| PublicProfile::from_candidate(candidate, now))
            .collect();

        NearbyResult {
            users,
            total_within_radius,
        }
    }
}

impl Default for NearbyFinder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULTS, true)
    }
}
