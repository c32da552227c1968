use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use crate::models::{ProfileSearchPage, ProfileSummary};

/// Only results under this path are treated as public profiles
const PROFILE_PATH: &str = "linkedin.com/in/";

/// Errors that can occur when interacting with the search provider
#[derive(Debug, Error)]
pub enum ProfileSearchError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// External source of public profile summaries
#[async_trait]
pub trait ProfileSearchProvider: Send + Sync {
    /// Search one page (1-based) of profiles by location text and role text
    async fn search_profiles(
        &self,
        location: &str,
        role: &str,
        page: u32,
    ) -> Result<ProfileSearchPage, ProfileSearchError>;
}

/// SerpAPI web-search client
///
/// Runs a site-restricted Google search and turns organic results into
/// [`ProfileSummary`] values.
pub struct SerpApiClient {
    endpoint: String,
    api_key: String,
    engine: String,
    page_size: u32,
    client: Client,
}

impl SerpApiClient {
    /// Create a new search client
    pub fn new(
        endpoint: String,
        api_key: String,
        engine: String,
        page_size: u32,
        timeout: Duration,
    ) -> Result<Self, ProfileSearchError> {
        if api_key.trim().is_empty() {
            return Err(ProfileSearchError::Configuration(
                "search API key is required".to_string(),
            ));
        }

        let client = Client::builder().timeout(timeout).build()?;

        tracing::info!("Initialized profile search client ({})", endpoint);

        Ok(Self {
            endpoint,
            api_key,
            engine,
            page_size: page_size.max(1),
            client,
        })
    }

    /// Build the site-restricted query string
    pub fn build_query(location: &str, role: &str) -> String {
        if role.is_empty() {
            format!("site:{} \"{}\"", PROFILE_PATH, location)
        } else {
            format!("site:{} \"{}\" \"{}\"", PROFILE_PATH, role, location)
        }
    }

    fn request_url(&self, query: &str, page: u32) -> Result<String, ProfileSearchError> {
        let start = (page.max(1) - 1)
            .checked_mul(self.page_size)
            .ok_or_else(|| ProfileSearchError::Configuration(format!("page {} is out of range", page)))?;

        Ok(format!(
            "{}?engine={}&q={}&api_key={}&start={}&num={}",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(&self.engine),
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key),
            start,
            self.page_size
        ))
    }

    /// Shape raw organic results into profile summaries
    pub fn transform_results(results: &[Value], limit: usize) -> Vec<ProfileSummary> {
        results
            .iter()
            .filter_map(|result| {
                let link = result.get("link").and_then(Value::as_str)?;
                if !link.contains(PROFILE_PATH) {
                    return None;
                }

                let title = result.get("title").and_then(Value::as_str).unwrap_or_default();
                let mut title_parts = title.split(" - ");
                let name = title_parts.next().unwrap_or_default().trim().to_string();

                let headline = match title_parts.next() {
                    Some(part) => part.replace(" | LinkedIn", "").trim().to_string(),
                    None => result
                        .get("snippet")
                        .and_then(Value::as_str)
                        .and_then(|snippet| snippet.split('.').next())
                        .unwrap_or_default()
                        .trim()
                        .to_string(),
                };

                let thumbnail = result
                    .get("thumbnail")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();

                Some(ProfileSummary {
                    name,
                    position: headline.clone(),
                    headline,
                    link: link.to_string(),
                    thumbnail,
                })
            })
            .take(limit)
            .collect()
    }
}

#[async_trait]
impl ProfileSearchProvider for SerpApiClient {
    async fn search_profiles(
        &self,
        location: &str,
        role: &str,
        page: u32,
    ) -> Result<ProfileSearchPage, ProfileSearchError> {
        tracing::info!("Searching profiles: location={}, role={}, page={}", location, role, page);

        let query = Self::build_query(location, role);
        let url = self.request_url(&query, page)?;

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Profile search returned {}", status);
            return Err(ProfileSearchError::ApiError(format!(
                "Search request failed: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        if let Some(error) = json.get("error").and_then(Value::as_str) {
            return Err(ProfileSearchError::ApiError(error.to_string()));
        }

        let organic = match json.get("organic_results") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(results)) => results.clone(),
            Some(_) => {
                return Err(ProfileSearchError::InvalidResponse(
                    "organic_results is not an array".into(),
                ))
            }
        };

        let page_size = self.page_size as usize;
        let profiles = Self::transform_results(&organic, page_size);
        let has_next = json
            .get("pagination")
            .and_then(|p| p.get("next"))
            .is_some_and(|next| !next.is_null());

        tracing::info!("Found {} profiles", profiles.len());

        Ok(ProfileSearchPage {
            total_results: profiles.len() * 10,
            current_page: page,
            has_next_page: has_next && profiles.len() == page_size,
            profiles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_requires_api_key() {
        let result = SerpApiClient::new(
            "https://serpapi.test/search".to_string(),
            " ".to_string(),
            "google".to_string(),
            10,
            Duration::from_secs(5),
        );

        assert!(matches!(result, Err(ProfileSearchError::Configuration(_))));
    }

    #[test]
    fn test_build_query() {
        assert_eq!(
            SerpApiClient::build_query("Berlin", "Data Engineer"),
            r#"site:linkedin.com/in/ "Data Engineer" "Berlin""#
        );
        assert_eq!(
            SerpApiClient::build_query("Berlin", ""),
            r#"site:linkedin.com/in/ "Berlin""#
        );
    }

    #[test]
    fn test_transform_results() {
        let results = vec![
            json!({
                "title": "Jane Doe - Staff Engineer at Acme | LinkedIn",
                "link": "https://de.linkedin.com/in/janedoe",
                "thumbnail": "https://img.test/jane.jpg",
            }),
            json!({
                "title": "John Roe",
                "link": "https://www.linkedin.com/in/johnroe",
                "snippet": "Product manager in Berlin. Previously at Initech.",
            }),
            json!({
                "title": "Acme Corp - Company page",
                "link": "https://www.linkedin.com/company/acme",
            }),
            json!({"title": "No link"}),
        ];

        let profiles = SerpApiClient::transform_results(&results, 10);

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].name, "Jane Doe");
        assert_eq!(profiles[0].headline, "Staff Engineer at Acme");
        assert_eq!(profiles[0].position, profiles[0].headline);
        assert_eq!(profiles[0].thumbnail, "https://img.test/jane.jpg");
        assert_eq!(profiles[1].name, "John Roe");
        assert_eq!(profiles[1].headline, "Product manager in Berlin");
        assert_eq!(profiles[1].thumbnail, "");
    }

    #[test]
    fn test_request_url_offsets() {
        let client = SerpApiClient::new(
            "https://serpapi.test/search/".to_string(),
            "key".to_string(),
            "google".to_string(),
            10,
            Duration::from_secs(5),
        )
        .unwrap();

        let url = client.request_url("q", 3).unwrap();
        assert!(url.starts_with("https://serpapi.test/search?"));
        assert!(url.contains("&start=20&num=10"));
        assert!(matches!(
            client.request_url("q", u32::MAX),
            Err(ProfileSearchError::Configuration(_))
        ));
    }

    #[test]
    fn test_transform_respects_limit() {
        let results: Vec<Value> = (0..15)
            .map(|i| json!({"title": format!("Person {}", i), "link": format!("https://linkedin.com/in/p{}", i)}))
            .collect();

        assert_eq!(SerpApiClient::transform_results(&results, 10).len(), 10);
    }
}
