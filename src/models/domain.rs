use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder name shown for anonymous users
pub const ANONYMOUS_NAME: &str = "Anonymous User";

/// Stored GeoJSON point: `{"type": "Point", "coordinates": [lon, lat]}`
///
/// Coordinates are kept as raw JSON values. Legacy documents may carry
/// strings or nulls here and those must not break decoding of the record:
/// a non-array `coordinates` decodes as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default = "default_point_type", deserialize_with = "deserialize_kind")]
    pub kind: String,
    #[serde(default, deserialize_with = "deserialize_coordinates")]
    pub coordinates: Vec<Value>,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: default_point_type(),
            coordinates: vec![Value::from(longitude), Value::from(latitude)],
        }
    }

    /// Decode a stored point, `None` unless the value is a JSON object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }
}

fn default_point_type() -> String { "Point".to_string() }

fn deserialize_kind<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(kind) => kind,
        _ => default_point_type(),
    })
}

fn deserialize_coordinates<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => values,
        _ => Vec::new(),
    })
}

fn deserialize_coords<'de, D>(deserializer: D) -> Result<Option<GeoPoint>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(GeoPoint::from_value(Value::deserialize(deserializer)?))
}

/// User record as held by the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(rename = "profileImage", default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_coords")]
    pub coords: Option<GeoPoint>,
    #[serde(rename = "isAnonymous", default)]
    pub is_anonymous: Option<bool>,
    #[serde(
        rename = "lastLocationUpdate",
        default,
        deserialize_with = "deserialize_timestamp"
    )]
    pub last_location_update: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Helper to get is_anonymous as a bool, defaulting to false
    pub fn anonymous(&self) -> bool {
        self.is_anonymous.unwrap_or(false)
    }
}

/// Unparseable timestamps decode as absent rather than failing the record
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(crate::core::relative_time::parse_timestamp))
}

/// A user under evaluation for a proximity query
#[derive(Debug, Clone)]
pub struct Candidate {
    pub record: UserRecord,
    /// Kilometers, rounded to 2 decimals
    pub distance: f64,
    /// Degrees in [0, 360), rounded to 2 decimals
    pub bearing: Option<f64>,
}

/// Location write for the acting user
#[derive(Debug, Clone, PartialEq)]
pub struct LocationUpdate {
    pub coords: GeoPoint,
    pub location: String,
    pub last_location_update: DateTime<Utc>,
}

impl LocationUpdate {
    /// Build the update for a user reporting their position at `now`
    ///
    /// The text form is written as `"lat, lon"` to stay readable by
    /// consumers of the legacy location field.
    pub fn new(latitude: f64, longitude: f64, now: DateTime<Utc>) -> Self {
        Self {
            coords: GeoPoint::new(longitude, latitude),
            location: format!("{}, {}", latitude, longitude),
            last_location_update: now,
        }
    }
}

/// Filter handed to the record store when fetching proximity candidates
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    /// The acting user never appears in their own results
    pub exclude_user_id: Option<String>,
}

/// Public-safe user shape returned to the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub headline: String,
    #[serde(rename = "profileImage")]
    pub profile_image: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default)]
    pub bearing: Option<f64>,
    #[serde(rename = "lastVisit", default)]
    pub last_visit: Option<String>,
    #[serde(rename = "isAnonymous")]
    pub is_anonymous: bool,
}

/// Public profile summary returned by the profile search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: String,
    pub headline: String,
    pub link: String,
    pub position: String,
    pub thumbnail: String,
}

/// One page of profile search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSearchPage {
    pub profiles: Vec<ProfileSummary>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    #[serde(rename = "currentPage")]
    pub current_page: u32,
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
}
