//! Coordinate extraction from user records.
//!
//! Records carry their position in one of two historical conventions: a
//! GeoJSON point `[lon, lat]` in `coords`, or a `"lat,lon"` string in
//! `location`. Extraction walks an ordered list of strategies and returns the
//! first usable coordinate. Anything unusable is absence, never an error.

use geo::Point;
use crate::models::UserRecord;

/// A way of reading a coordinate out of a record
type Strategy = fn(&UserRecord) -> Option<Point<f64>>;

/// Strategies in priority order
const STRATEGIES: &[Strategy] = &[from_geo_point, from_location_text];

/// Extract the canonical coordinate of a record
///
/// Returns a point with `x = longitude` and `y = latitude`, or `None` when no
/// strategy yields a valid, non-zero coordinate.
pub fn extract_coordinates(record: &UserRecord) -> Option<Point<f64>> {
    let point = STRATEGIES.iter().find_map(|strategy| strategy(record));

    if point.is_none() {
        tracing::debug!("No valid coordinates for user: {}", record.id);
    }

    point
}

/// Validate a (longitude, latitude) pair
///
/// (0, 0) is the "unset" sentinel and is rejected along with non-finite or
/// out-of-range values.
pub fn valid_coordinate(longitude: f64, latitude: f64) -> Option<Point<f64>> {
    let in_range = longitude.is_finite()
        && latitude.is_finite()
        && (-180.0..=180.0).contains(&longitude)
        && (-90.0..=90.0).contains(&latitude);

    if !in_range || (longitude == 0.0 && latitude == 0.0) {
        return None;
    }

    Some(Point::new(longitude, latitude))
}

fn from_geo_point(record: &UserRecord) -> Option<Point<f64>> {
    let coordinates = &record.coords.as_ref()?.coordinates;
    let [lon, lat] = coordinates.as_slice() else {
        return None;
    };

    valid_coordinate(lon.as_f64()?, lat.as_f64()?)
}

fn from_location_text(record: &UserRecord) -> Option<Point<f64>> {
    let text = record.location.as_deref()?;
    let mut parts = text.split(',');

    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        tracing::debug!("Invalid location format: {}", text);
        return None;
    };

    match (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
        (Ok(lat), Ok(lon)) => valid_coordinate(lon, lat),
        _ => {
            tracing::debug!("Invalid location format: {}", text);
            None
        }
    }
}
