use geo::Point;
use crate::models::{Candidate, UserRecord};
use crate::core::{
    coords::extract_coordinates,
    distance::{bearing, haversine_distance},
};

/// Filter records to those within `radius_km` of `reference` and rank them
///
/// `reference` is `(x = longitude, y = latitude)`. Records without a usable
/// coordinate are skipped. The result is sorted by ascending distance with a
/// stable sort, so equal distances keep their input order. Truncation is left
/// to the caller.
///
/// When `with_bearing` is set each candidate also carries the initial bearing
/// from the reference point towards it.
pub fn rank_by_distance(
    records: Vec<UserRecord>,
    reference: Point<f64>,
    radius_km: f64,
    with_bearing: bool,
) -> Vec<Candidate> {
    let (ref_lon, ref_lat) = (reference.x(), reference.y());

    let mut candidates: Vec<Candidate> = records
        .into_iter()
        .filter_map(|record| {
            let point = extract_coordinates(&record)?;
            let distance = haversine_distance(ref_lat, ref_lon, point.y(), point.x());

            if distance > radius_km {
                return None;
            }

            let bearing = with_bearing.then(|| bearing(ref_lat, ref_lon, point.y(), point.x()));

            Some(Candidate {
                record,
                distance,
                bearing,
            })
        })
        .collect();

    // slice::sort_by is stable
    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    tracing::debug!(
        "Filtered {} users within {}km from ({}, {})",
        candidates.len(),
        radius_km,
        ref_lat,
        ref_lon
    );

    candidates
}
