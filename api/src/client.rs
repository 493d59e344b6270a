use crate::MatchSource;
use crate::wire::{Health, MatchListResponse, RawMatch, SyncResponse};
use log::debug;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const BASE_URL_ENV: &str = "CRICKET_API_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);
/// Per-attempt budget inside the resolution chain, so a slow canonical
/// endpoint cannot eat the whole page load before the list scans run.
const RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the cricket scores backend.
///
/// The base URL is fixed at construction; nothing in here re-reads the
/// environment after startup.
#[derive(Debug, Clone)]
pub struct CricketApi {
    client: Client,
    base_url: String,
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl CricketApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("crictui/0.1 (terminal cricket scores)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Build a client from `CRICKET_API_URL`, defaulting to localhost.
    pub fn from_env() -> Self {
        let base = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self::new(base)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Matches filtered by format (`T20`, `ODI`, `TEST`).
    pub async fn fetch_matches(&self, format: &str) -> ApiResult<Vec<RawMatch>> {
        let url = format!("{}/api/matches?format={format}", self.base_url);
        let list: MatchListResponse = self.get(&url, REQUEST_TIMEOUT).await?;
        Ok(list.into_vec())
    }

    /// Currently live matches, optionally capped (the ticker asks for 5).
    pub async fn fetch_live_matches(&self, limit: Option<usize>) -> ApiResult<Vec<RawMatch>> {
        let url = match limit {
            Some(n) => format!("{}/api/matches/live?limit={n}", self.base_url),
            None => format!("{}/api/matches/live", self.base_url),
        };
        let list: MatchListResponse = self.get(&url, REQUEST_TIMEOUT).await?;
        Ok(list.into_vec())
    }

    pub async fn fetch_upcoming_matches(&self) -> ApiResult<Vec<RawMatch>> {
        let url = format!("{}/api/matches/upcoming", self.base_url);
        let list: MatchListResponse = self.get(&url, REQUEST_TIMEOUT).await?;
        Ok(list.into_vec())
    }

    pub async fn fetch_recent_matches(&self) -> ApiResult<Vec<RawMatch>> {
        let url = format!("{}/api/matches/recent", self.base_url);
        let list: MatchListResponse = self.get(&url, REQUEST_TIMEOUT).await?;
        Ok(list.into_vec())
    }

    /// Canonical single-match lookup.
    pub async fn fetch_match(&self, id: &str) -> ApiResult<RawMatch> {
        let url = format!("{}/api/matches/{id}", self.base_url);
        self.get(&url, RESOLVE_TIMEOUT).await
    }

    /// Resolve a match id for the detail view.
    ///
    /// Fallback chain:
    /// 1) `GET /api/matches/{id}` — canonical lookup.
    /// 2) upcoming list scan — fixtures often exist only here.
    /// 3) live list scan.
    /// 4) recent list scan.
    ///
    /// Intermediate failures are logged and swallowed; only exhausting the
    /// chain is an error.
    pub async fn resolve_match(&self, id: &str) -> ApiResult<(RawMatch, MatchSource)> {
        match self.fetch_match(id).await {
            Ok(m) => return Ok((m, MatchSource::Main)),
            Err(e) => debug!("match {id}: canonical lookup failed, scanning lists: {e}"),
        }

        for (source, path) in [
            (MatchSource::Upcoming, "upcoming"),
            (MatchSource::Live, "live"),
            (MatchSource::Recent, "recent"),
        ] {
            let url = format!("{}/api/matches/{path}", self.base_url);
            match self.get::<MatchListResponse>(&url, RESOLVE_TIMEOUT).await {
                Ok(list) => {
                    if let Some(m) = list.into_vec().into_iter().find(|m| m.has_id(id)) {
                        return Ok((m, source));
                    }
                }
                Err(e) => debug!("match {id}: {path} scan failed: {e}"),
            }
        }

        Err(ApiError::NotFound(format!("match {id} not found in any source")))
    }

    /// Lazily-loaded detail section (`scorecard`, `historical-scorecard`,
    /// `commentary`, `overs`). The payload shape varies per provider, so this
    /// stays a raw JSON value; the UI renders it generically.
    pub async fn fetch_section(&self, id: &str, path: &str) -> ApiResult<serde_json::Value> {
        let url = format!("{}/api/matches/{id}/{path}", self.base_url);
        self.get(&url, REQUEST_TIMEOUT).await
    }

    /// Ask the backend to refresh a match from its upstream provider.
    /// A 404 means the backend has no sync route for this match.
    pub async fn sync_details(&self, id: &str) -> ApiResult<SyncResponse> {
        let url = format!("{}/api/matches/{id}/sync-details", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        match response.error_for_status() {
            Ok(res) => res.json().await.map_err(|e| ApiError::Parsing(e, url)),
            Err(e) if e.status() == Some(reqwest::StatusCode::NOT_FOUND) => Err(
                ApiError::NotFound("match data sync is not available for this match".into()),
            ),
            Err(e) => Err(ApiError::Api(e, url)),
        }
    }

    pub async fn fetch_health(&self) -> ApiResult<Health> {
        let url = format!("{}/api/health", self.base_url);
        self.get(&url, REQUEST_TIMEOUT).await
    }

    /// Team photo URL for an `imageId`. The TUI renders initials instead,
    /// but the URL scheme is part of the backend contract.
    pub fn photo_url(&self, image_id: &str) -> String {
        format!("{}/api/photos/image/{image_id}", self.base_url)
    }

    /// Every non-2xx is an error here: the resolution chain depends on a 404
    /// from the canonical endpoint being a failure so the list scans run.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str, timeout: Duration) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn resolve_uses_canonical_endpoint_first() {
        let mut server = mockito::Server::new_async().await;
        let main = server
            .mock("GET", "/api/matches/m123")
            .with_header("content-type", "application/json")
            .with_body(json!({ "matchId": "m123", "title": "India vs Australia" }).to_string())
            .create_async()
            .await;

        let api = CricketApi::new(server.url());
        let (m, source) = api.resolve_match("m123").await.expect("resolves");
        assert_eq!(source, MatchSource::Main);
        assert_eq!(m.match_id.as_deref(), Some("m123"));
        main.assert_async().await;
    }

    #[tokio::test]
    async fn resolve_falls_back_to_upcoming_list() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/matches/m123")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("GET", "/api/matches/upcoming")
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    { "matchId": "other", "title": "A vs B" },
                    { "_id": "m123", "title": "India vs Australia" },
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let api = CricketApi::new(server.url());
        let (m, source) = api.resolve_match("m123").await.expect("resolves from list");
        assert_eq!(source, MatchSource::Upcoming);
        assert_eq!(m.title.as_deref(), Some("India vs Australia"));
    }

    #[tokio::test]
    async fn resolve_reports_not_found_when_every_source_fails() {
        let mut server = mockito::Server::new_async().await;
        for path in ["m123", "upcoming", "live", "recent"] {
            server
                .mock("GET", format!("/api/matches/{path}").as_str())
                .with_status(500)
                .create_async()
                .await;
        }

        let api = CricketApi::new(server.url());
        let err = api.resolve_match("m123").await.expect_err("must fail");
        assert!(matches!(err, ApiError::NotFound(_)), "got {err}");
    }

    #[tokio::test]
    async fn list_endpoints_accept_wrapped_payloads() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/matches/live?limit=5")
            .with_header("content-type", "application/json")
            .with_body(json!({ "matches": [{ "matchId": "live1", "isLive": true }] }).to_string())
            .create_async()
            .await;

        let api = CricketApi::new(server.url());
        let matches = api.fetch_live_matches(Some(5)).await.expect("loads");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_id.as_deref(), Some("live1"));
    }

    #[tokio::test]
    async fn fetch_matches_passes_format_filter() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/matches?format=ODI")
            .with_header("content-type", "application/json")
            .with_body(json!([{ "matchId": "odi1", "format": "ODI" }]).to_string())
            .create_async()
            .await;

        let api = CricketApi::new(server.url());
        let matches = api.fetch_matches("ODI").await.expect("loads");
        assert_eq!(matches.len(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sync_details_returns_refreshed_match() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/matches/m9/sync-details")
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "message": "synced",
                    "match": { "matchId": "m9", "status": "Live", "isLive": true },
                })
                .to_string(),
            )
            .create_async()
            .await;

        let api = CricketApi::new(server.url());
        let synced = api.sync_details("m9").await.expect("syncs");
        let m = synced.match_data.expect("carries the refreshed match");
        assert_eq!(m.match_id.as_deref(), Some("m9"));
        assert_eq!(m.is_live, Some(true));
    }

    #[tokio::test]
    async fn sync_details_maps_404_to_a_friendly_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/matches/m9/sync-details")
            .with_status(404)
            .create_async()
            .await;

        let api = CricketApi::new(server.url());
        let err = api.sync_details("m9").await.expect_err("must fail");
        match err {
            ApiError::NotFound(msg) => assert!(msg.contains("not available")),
            other => panic!("expected NotFound, got {other}"),
        }
    }

    #[tokio::test]
    async fn health_payload_parses() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/health")
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "status": "ok",
                    "timestamp": "2026-03-12T10:00:00Z",
                    "environment": "production",
                    "apiUrl": "http://localhost:5000",
                })
                .to_string(),
            )
            .create_async()
            .await;

        let api = CricketApi::new(server.url());
        let health = api.fetch_health().await.expect("healthy");
        assert_eq!(health.status.as_deref(), Some("ok"));
        assert_eq!(health.environment.as_deref(), Some("production"));
    }

    #[test]
    fn photo_url_builds_from_base() {
        let api = CricketApi::new("http://example.test:5000/");
        assert_eq!(
            api.photo_url("c184221"),
            "http://example.test:5000/api/photos/image/c184221"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = CricketApi::new("http://example.test/");
        assert_eq!(api.base_url(), "http://example.test");
    }
}
