// Integration tests for SmartSeek

use chrono::{Duration, Utc};
use mockito::Matcher;
use smartseek::core::NearbyFinder;
use smartseek::models::{CandidateFilter, GeoPoint, LocationUpdate, UserRecord};
use smartseek::services::{
    InMemoryUserStore, ProfileSearchError, ProfileSearchProvider, SerpApiClient, UserStore,
};

fn create_test_record(id: &str, lat: f64, lon: f64) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        name: Some(format!("User {}", id)),
        headline: Some("Engineer".to_string()),
        profile_image: None,
        location: None,
        coords: Some(GeoPoint::new(lon, lat)),
        is_anonymous: Some(false),
        last_location_update: None,
    }
}

/// Record `km` kilometers due north of (10, 20)
fn north_of_reference(id: &str, km: f64) -> UserRecord {
    create_test_record(id, 10.0 + km / 111.19, 20.0)
}

#[test]
fn test_integration_radius_and_order() {
    let finder = NearbyFinder::default();

    let candidates = vec![
        north_of_reference("five", 5.0),
        north_of_reference("two", 2.0),
        north_of_reference("eight", 8.0),
        north_of_reference("one", 1.0),
    ];

    let result = finder.find_nearby(candidates, 10.0, 20.0, 6.0);

    let ids: Vec<&str> = result.users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["one", "two"]);
    assert_eq!(result.users[0].distance, Some(1.0));
    assert_eq!(result.users[1].distance, Some(2.0));
}

#[test]
fn test_integration_mixed_storage_conventions() {
    let finder = NearbyFinder::default();
    let now = Utc::now();

    let mut legacy = create_test_record("legacy", 0.0, 0.0);
    legacy.location = Some("40.7300, -73.9950".to_string());
    legacy.last_location_update = Some(now - Duration::hours(3));

    let mut broken = create_test_record("broken", 0.0, 0.0);
    broken.location = Some("somewhere in Brooklyn".to_string());

    let candidates = vec![
        broken,
        legacy,
        create_test_record("modern", 40.7130, -74.0050),
    ];

    let result = finder.find_nearby_at(candidates, 40.7128, -74.0060, 5.0, now);

    let ids: Vec<&str> = result.users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["modern", "legacy"]);
    assert_eq!(result.users[1].last_visit.as_deref(), Some("3 hours ago"));
    assert!(result.users[0].last_visit.is_none());
    assert!(result.users.iter().all(|u| u.bearing.is_some_and(|b| (0.0..360.0).contains(&b))));
}

#[test]
fn test_integration_truncates_after_sort() {
    let finder = NearbyFinder::new(3, false);

    // Farthest first in input so truncation must happen after ranking
    let candidates: Vec<UserRecord> = (0..10)
        .rev()
        .map(|i| north_of_reference(&format!("u{}", i), 1.0 + i as f64))
        .collect();

    let result = finder.find_nearby(candidates, 10.0, 20.0, 100.0);

    let ids: Vec<&str> = result.users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["u0", "u1", "u2"]);
    assert_eq!(result.total_within_radius, 10);
}

#[tokio::test]
async fn test_integration_store_roundtrip_for_acting_user() {
    let store = InMemoryUserStore::with_users(vec![
        create_test_record("me", 1.0, 1.0),
        create_test_record("other", 52.5201, 13.4051),
    ]);

    store
        .update_location("me", &LocationUpdate::new(52.52, 13.405, Utc::now()))
        .await
        .unwrap();

    let filter = CandidateFilter {
        exclude_user_id: Some("me".to_string()),
    };
    let candidates = store.find_candidates(&filter).await.unwrap();
    let result = NearbyFinder::default().find_nearby(candidates, 52.52, 13.405, 1.0);

    assert_eq!(result.users.len(), 1);
    assert_eq!(result.users[0].id, "other");
}

fn create_client(server: &mockito::Server) -> SerpApiClient {
    SerpApiClient::new(
        format!("{}/search", server.url()),
        "test_key".to_string(),
        "google".to_string(),
        10,
        std::time::Duration::from_secs(5),
    )
    .expect("client")
}

#[tokio::test]
async fn test_profile_search_request_and_pagination() {
    let mut server = mockito::Server::new_async().await;

    let results: Vec<serde_json::Value> = (0..10)
        .map(|i| {
            serde_json::json!({
                "title": format!("Person {} - Rust Developer | LinkedIn", i),
                "link": format!("https://www.linkedin.com/in/person{}", i),
            })
        })
        .collect();

    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("engine".into(), "google".into()),
            Matcher::UrlEncoded("q".into(), r#"site:linkedin.com/in/ "Rust Developer" "Berlin""#.into()),
            Matcher::UrlEncoded("api_key".into(), "test_key".into()),
            Matcher::UrlEncoded("start".into(), "10".into()),
            Matcher::UrlEncoded("num".into(), "10".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "organic_results": results,
                "pagination": {"next": "https://serpapi.com/search?start=20"},
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = create_client(&server);
    let page = client.search_profiles("Berlin", "Rust Developer", 2).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.profiles.len(), 10);
    assert_eq!(page.current_page, 2);
    assert!(page.has_next_page);
    assert_eq!(page.total_results, 100);
    assert_eq!(page.profiles[0].name, "Person 0");
    assert_eq!(page.profiles[0].headline, "Rust Developer");
}

#[tokio::test]
async fn test_profile_search_short_page_has_no_next() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "organic_results": [
                    {"title": "Ada Lovelace - Analyst", "link": "https://linkedin.com/in/ada"}
                ],
                "pagination": {"next": "https://serpapi.com/search?start=10"},
            })
            .to_string(),
        )
        .create_async()
        .await;

    let page = create_client(&server).search_profiles("London", "", 1).await.unwrap();

    assert_eq!(page.profiles.len(), 1);
    assert!(!page.has_next_page);
}

#[tokio::test]
async fn test_profile_search_upstream_error() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let result = create_client(&server).search_profiles("London", "", 1).await;

    assert!(matches!(result, Err(ProfileSearchError::ApiError(_))));
}

#[tokio::test]
async fn test_profile_search_out_of_range_page_is_rejected() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result = create_client(&server).search_profiles("Berlin", "", u32::MAX).await;

    mock.assert_async().await;
    assert!(matches!(result, Err(ProfileSearchError::Configuration(_))));
}
