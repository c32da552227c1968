//! SmartSeek - people lookup tools for a conversational search agent
//!
//! This library provides the geospatial ranking pipeline behind the
//! nearby-users tool, plus the store, search-provider and HTTP glue that
//! exposes the nearby, people-search and random-user tools to the agent.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{NearbyFinder, NearbyResult, distance::{bearing, haversine_distance}, extract_coordinates};
pub use models::{UserRecord, PublicProfile, Candidate, NearbyUsersRequest, PeopleSearchRequest};
