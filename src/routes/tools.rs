use actix_web::{web, HttpResponse, Responder};
use crate::core::NearbyFinder;
use crate::models::{
    CandidateFilter, ErrorResponse, HealthResponse, LocationUpdate, NearbyUsersData,
    NearbyUsersRequest, PeopleSearchData, PeopleSearchRequest, ProfileSearchPage, PublicProfile,
    SearchCenter, ToolResponse,
};
use crate::services::{CacheKey, CacheManager, ProfileSearchProvider, UserStore};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub search: Arc<dyn ProfileSearchProvider>,
    pub cache: Arc<CacheManager>,
    pub finder: NearbyFinder,
    pub default_radius_km: f64,
}

/// Configure all tool routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/tools", web::get().to(tool_manifest))
        .route("/tools/nearby-users", web::post().to(nearby_users))
        .route("/tools/search-people", web::post().to(search_people))
        .route("/tools/random-user", web::get().to(random_user));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Tool descriptions for agent registration
///
/// GET /api/v1/tools
async fn tool_manifest(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "tools": [
            {
                "name": "search_nearby_users",
                "method": "POST",
                "path": "/api/v1/tools/nearby-users",
                "description": "Find users near a coordinate, closest first.",
                "parameters": {
                    "lat": {"type": "number", "required": true},
                    "lng": {"type": "number", "required": true},
                    "radius": {"type": "number", "required": false, "default": state.default_radius_km, "unit": "km"},
                    "userId": {"type": "string", "required": false},
                },
            },
            {
                "name": "search_people",
                "method": "POST",
                "path": "/api/v1/tools/search-people",
                "description": "Search public profiles by job and/or location. At least one is required.",
                "parameters": {
                    "job": {"type": "string", "required": false},
                    "location": {"type": "string", "required": false},
                    "page": {"type": "integer", "required": false, "default": 1, "minimum": 1, "maximum": 100},
                },
            },
            {
                "name": "search_random",
                "method": "GET",
                "path": "/api/v1/tools/random-user",
                "description": "Pick one random user.",
                "parameters": {},
            },
        ]
    }))
}

/// Nearby users tool
///
/// POST /api/v1/tools/nearby-users
///
/// Request body:
/// ```json
/// {
///   "lat": "40.7128",
///   "lng": "-74.0060",
///   "radius": "10",
///   "userId": "string"
/// }
/// ```
async fn nearby_users(
    state: web::Data<AppState>,
    req: web::Json<NearbyUsersRequest>,
) -> impl Responder {
    let query = match req.into_inner().into_query(state.default_radius_km) {
        Ok(query) => query,
        Err(e) => {
            tracing::info!("Rejected nearby users request: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()));
        }
    };

    tracing::info!(
        "Nearby users search: lat={}, lng={}, radius={}km, user={:?}",
        query.latitude,
        query.longitude,
        query.radius_km,
        query.user_id
    );

    // Record the acting user's position before searching
    if let Some(user_id) = &query.user_id {
        let update = LocationUpdate::new(query.latitude, query.longitude, chrono::Utc::now());
        if let Err(e) = state.store.update_location(user_id, &update).await {
            tracing::warn!("Failed to update location for {}, continuing: {}", user_id, e);
        }
    }

    let filter = CandidateFilter {
        exclude_user_id: query.user_id.clone(),
    };

    let candidates = match state.store.find_candidates(&filter).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to fetch candidate users: {}", e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new(format!("Failed to fetch users: {}", e)));
        }
    };

    let total_candidates = candidates.len();

    let result = state
        .finder
        .find_nearby(candidates, query.latitude, query.longitude, query.radius_km);

    tracing::info!(
        "Returning {} users within {}km ({} in radius, {} candidates)",
        result.users.len(),
        query.radius_km,
        result.total_within_radius,
        total_candidates
    );

    HttpResponse::Ok().json(ToolResponse::ok(NearbyUsersData {
        count: result.users.len(),
        users: result.users,
        search_radius: query.radius_km,
        search_center: SearchCenter {
            lat: query.latitude,
            lng: query.longitude,
        },
        calculation_method: "haversine".to_string(),
    }))
}

/// People search tool
///
/// POST /api/v1/tools/search-people
///
/// Request body:
/// ```json
/// {
///   "job": "string",
///   "location": "string",
///   "page": 1
/// }
/// ```
async fn search_people(
    state: web::Data<AppState>,
    req: web::Json<PeopleSearchRequest>,
) -> impl Responder {
    let query = match req.into_inner().into_query() {
        Ok(query) => query,
        Err(e) => {
            tracing::info!("Rejected people search request: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()));
        }
    };

    tracing::info!("People search: job={:?}, location={:?}, page={}", query.job, query.location, query.page);

    let cache_key = CacheKey::profile_search(&query.location, &query.job, query.page);

    let page = match state.cache.get::<ProfileSearchPage>(&cache_key).await {
        Ok(page) => {
            tracing::debug!("Serving people search from cache: {}", cache_key);
            page
        }
        Err(_) => match state
            .search
            .search_profiles(&query.location, &query.job, query.page)
            .await
        {
            Ok(page) => {
                if let Err(e) = state.cache.set(&cache_key, &page).await {
                    tracing::warn!("Failed to cache search results: {}", e);
                }
                page
            }
            Err(e) => {
                tracing::error!("Failed to search profiles: {}", e);
                return HttpResponse::BadGateway()
                    .json(ErrorResponse::new(format!("Failed to search profiles: {}", e)));
            }
        },
    };

    tracing::info!("Found {} profiles", page.profiles.len());

    HttpResponse::Ok().json(ToolResponse::ok(PeopleSearchData {
        count: page.profiles.len(),
        profiles: page.profiles,
        current_page: page.current_page,
        has_next_page: page.has_next_page,
    }))
}

/// Random user tool
///
/// GET /api/v1/tools/random-user
async fn random_user(state: web::Data<AppState>) -> impl Responder {
    match state.store.sample_one().await {
        Ok(Some(record)) => {
            tracing::info!("Found random user: {}", record.id);
            HttpResponse::Ok().json(ToolResponse::ok(PublicProfile::from_record(
                &record,
                chrono::Utc::now(),
            )))
        }
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::new("No users found")),
        Err(e) => {
            tracing::error!("Failed to find random user: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new(format!("Failed to find random user: {}", e)))
        }
    }
}
