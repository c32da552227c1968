use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Caller-side validation failures, reported before the core runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("Latitude and longitude are required")]
    MissingCoordinates,

    #[error("Invalid coordinates or radius")]
    InvalidCoordinates,

    #[error("At least one of job or location is required")]
    MissingSearchTerms,

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Numeric tool argument; agents send numbers or numeric strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericParam {
    Number(f64),
    Text(String),
    /// Anything else the agent sent; never parses
    Other(serde_json::Value),
}

impl NumericParam {
    fn is_blank(&self) -> bool {
        matches!(self, NumericParam::Text(s) if s.trim().is_empty())
    }

    fn parse(&self) -> Option<f64> {
        let value = match self {
            NumericParam::Number(n) => *n,
            NumericParam::Text(s) => s.trim().parse::<f64>().ok()?,
            NumericParam::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// Request for the nearby-users tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearbyUsersRequest {
    #[serde(default, alias = "latitude")]
    pub lat: Option<NumericParam>,
    #[serde(default, alias = "lon", alias = "longitude")]
    pub lng: Option<NumericParam>,
    #[serde(default)]
    pub radius: Option<NumericParam>,
    #[serde(default, alias = "user_id", rename = "userId")]
    pub user_id: Option<String>,
}

/// Validated nearby query
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub user_id: Option<String>,
}

impl NearbyUsersRequest {
    /// Validate raw arguments into numeric query parameters
    ///
    /// A missing radius falls back to `default_radius_km`.
    pub fn into_query(self, default_radius_km: f64) -> Result<NearbyQuery, RequestError> {
        let (lat, lng) = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if !lat.is_blank() && !lng.is_blank() => (lat, lng),
            _ => return Err(RequestError::MissingCoordinates),
        };

        let latitude = lat.parse().ok_or(RequestError::InvalidCoordinates)?;
        let longitude = lng.parse().ok_or(RequestError::InvalidCoordinates)?;
        let radius_km = match self.radius {
            Some(radius) => radius.parse().ok_or(RequestError::InvalidCoordinates)?,
            None => default_radius_km,
        };

        if !(-90.0..=90.0).contains(&latitude)
            || !(-180.0..=180.0).contains(&longitude)
            || radius_km <= 0.0
        {
            return Err(RequestError::InvalidCoordinates);
        }

        let user_id = self
            .user_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        Ok(NearbyQuery {
            latitude,
            longitude,
            radius_km,
            user_id,
        })
    }
}

/// Request for the people-search tool
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PeopleSearchRequest {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub job: Option<String>,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1, max = 100))]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

/// Validated people-search query
#[derive(Debug, Clone, PartialEq)]
pub struct PeopleQuery {
    pub job: String,
    pub location: String,
    pub page: u32,
}

impl PeopleSearchRequest {
    pub fn into_query(self) -> Result<PeopleQuery, RequestError> {
        self.validate()
            .map_err(|e| RequestError::Validation(e.to_string()))?;

        let job = self.job.unwrap_or_default().trim().to_string();
        let location = self.location.unwrap_or_default().trim().to_string();
        if job.is_empty() && location.is_empty() {
            return Err(RequestError::MissingSearchTerms);
        }

        Ok(PeopleQuery {
            job,
            location,
            page: self.page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nearby(body: serde_json::Value) -> Result<NearbyQuery, RequestError> {
        serde_json::from_value::<NearbyUsersRequest>(body)
            .unwrap()
            .into_query(10.0)
    }

    #[test]
    fn test_nearby_accepts_strings_and_numbers() {
        let query = nearby(serde_json::json!({"lat": "40.7", "lng": -74.0, "userId": "me"})).unwrap();

        assert_eq!(query.latitude, 40.7);
        assert_eq!(query.longitude, -74.0);
        assert_eq!(query.radius_km, 10.0);
        assert_eq!(query.user_id.as_deref(), Some("me"));
    }

    #[test]
    fn test_nearby_missing_coordinates() {
        assert_eq!(nearby(serde_json::json!({"lat": "40.7"})), Err(RequestError::MissingCoordinates));
        assert_eq!(nearby(serde_json::json!({"lat": "", "lng": "1"})), Err(RequestError::MissingCoordinates));
    }

    #[test]
    fn test_nearby_invalid_values() {
        assert_eq!(nearby(serde_json::json!({"lat": "abc", "lng": "1"})), Err(RequestError::InvalidCoordinates));
        assert_eq!(nearby(serde_json::json!({"lat": "1", "lng": "1", "radius": "0"})), Err(RequestError::InvalidCoordinates));
        assert_eq!(nearby(serde_json::json!({"lat": "1", "lng": "1", "radius": -3})), Err(RequestError::InvalidCoordinates));
        assert_eq!(nearby(serde_json::json!({"lat": "91", "lng": "1"})), Err(RequestError::InvalidCoordinates));
        assert_eq!(nearby(serde_json::json!({"lat": "NaN", "lng": "1"})), Err(RequestError::InvalidCoordinates));
    }

    #[test]
    fn test_nearby_non_numeric_types_are_invalid() {
        assert_eq!(nearby(serde_json::json!({"lat": true, "lng": "1"})), Err(RequestError::InvalidCoordinates));
        assert_eq!(nearby(serde_json::json!({"lat": "1", "lng": {"x": 1}})), Err(RequestError::InvalidCoordinates));
        assert_eq!(nearby(serde_json::json!({"lat": "1", "lng": "1", "radius": [5]})), Err(RequestError::InvalidCoordinates));
    }

    #[test]
    fn test_blank_user_id_is_anonymous_caller() {
        let query = nearby(serde_json::json!({"lat": 1, "lng": 2, "radius": "5", "userId": "  "})).unwrap();
        assert!(query.user_id.is_none());
        assert_eq!(query.radius_km, 5.0);
    }

    #[test]
    fn test_people_search_requires_a_term() {
        let req: PeopleSearchRequest = serde_json::from_value(serde_json::json!({"job": " "})).unwrap();
        assert_eq!(req.into_query(), Err(RequestError::MissingSearchTerms));
    }

    #[test]
    fn test_people_search_page_validation() {
        let req: PeopleSearchRequest =
            serde_json::from_value(serde_json::json!({"job": "engineer", "page": 0})).unwrap();
        assert!(matches!(req.into_query(), Err(RequestError::Validation(_))));

        let req: PeopleSearchRequest =
            serde_json::from_value(serde_json::json!({"job": "engineer", "page": 4294967295u32})).unwrap();
        assert!(matches!(req.into_query(), Err(RequestError::Validation(_))));

        let req: PeopleSearchRequest =
            serde_json::from_value(serde_json::json!({"job": "engineer", "page": 100})).unwrap();
        assert_eq!(req.into_query().unwrap().page, 100);

        let req: PeopleSearchRequest =
            serde_json::from_value(serde_json::json!({"location": "Berlin"})).unwrap();
        let query = req.into_query().unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.job, "");
        assert_eq!(query.location, "Berlin");
    }
}
