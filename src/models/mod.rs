// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Candidate, CandidateFilter, GeoPoint, LocationUpdate, ProfileSearchPage, ProfileSummary,
    PublicProfile, UserRecord, ANONYMOUS_NAME,
};
pub use requests::{NearbyQuery, NearbyUsersRequest, NumericParam, PeopleQuery, PeopleSearchRequest, RequestError};
pub use responses::{ErrorResponse, HealthResponse, NearbyUsersData, PeopleSearchData, SearchCenter, ToolResponse};
