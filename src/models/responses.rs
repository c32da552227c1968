use serde::{Deserialize, Serialize};
use crate::models::domain::{ProfileSummary, PublicProfile};

/// Success envelope returned by every tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ToolResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchCenter {
    pub lat: f64,
    pub lng: f64,
}

/// Payload of the nearby-users tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyUsersData {
    pub users: Vec<PublicProfile>,
    pub count: usize,
    #[serde(rename = "searchRadius")]
    pub search_radius: f64,
    #[serde(rename = "searchCenter")]
    pub search_center: SearchCenter,
    #[serde(rename = "calculationMethod")]
    pub calculation_method: String,
}

/// Payload of the people-search tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeopleSearchData {
    pub profiles: Vec<ProfileSummary>,
    pub count: usize,
    #[serde(rename = "currentPage")]
    pub current_page: u32,
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
