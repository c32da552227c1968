// Core algorithm exports
pub mod coords;
pub mod distance;
pub mod nearby;
pub mod ranker;
pub mod redact;
pub mod relative_time;

pub use coords::{extract_coordinates, valid_coordinate};
pub use distance::{bearing, haversine_distance, round2};
pub use nearby::{NearbyFinder, NearbyResult, DEFAULT_MAX_RESULTS};
pub use ranker::rank_by_distance;
pub use relative_time::{parse_timestamp, relative_time};
