//! Thin fetch wrapper around the geo-data service.
//!
//! Builds URLs from a fixed base, performs the GET, and decodes the
//! `{ success, data }` envelope. Bodies are read as text and decoded with
//! `serde_json` so a non-JSON body surfaces as [`FetchError::Decode`] rather
//! than being folded into transport failures. No retries: a failed fetch is
//! the caller's problem immediately.

use std::time::Duration;

use anyhow::Context;
use log::debug;
use serde_json::Value;
use url::Url;

use crate::config::{HTTP_TIMEOUT_SECS, MAX_LIST_LIMIT};
use crate::error::FetchError;
use crate::level::AdministrativeLevel;
use crate::models::{ApiEnvelope, GeoDetail, LocationOption};

/// HTTP client for the remote geo-data service.
pub struct GeoDataClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GeoDataClient {
    /// Builds a client for the given base URL.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url).context("invalid base URL")?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .context("failed to build HTTP client")?;
        Ok(GeoDataClient { http, base_url })
    }

    /// Wraps an existing `reqwest::Client` (shared connection pool).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        GeoDataClient { http, base_url }
    }

    /// Performs a GET against `path` with the given query pairs and unwraps
    /// the response envelope.
    ///
    /// Failure taxonomy: no response at all → [`FetchError::Transport`];
    /// non-2xx → [`FetchError::Http`]; body not JSON → [`FetchError::Decode`];
    /// envelope `success: false` → [`FetchError::Service`].
    pub async fn fetch_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, FetchError> {
        let mut url = self.base_url.clone();
        {
            // Preserve any path prefix on the base URL.
            let joined = format!(
                "{}/{}",
                url.path().trim_end_matches('/'),
                path.trim_start_matches('/')
            );
            url.set_path(&joined);
        }
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }

        debug!("GET {url}");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(FetchError::from_reqwest)?;
        let envelope: ApiEnvelope<Value> = serde_json::from_str(&body)?;
        if !envelope.success {
            debug!("service refused {url}: success=false");
            return Err(FetchError::Service);
        }
        Ok(envelope.data)
    }

    /// Lists entities at `level`, scoped to `parent_code` where the level has
    /// a scoping parameter. `limit` is capped at [`MAX_LIST_LIMIT`].
    pub async fn list(
        &self,
        level: AdministrativeLevel,
        parent_code: Option<&str>,
        limit: u32,
        search: Option<&str>,
    ) -> Result<Vec<LocationOption>, FetchError> {
        let mut query: Vec<(&str, String)> =
            vec![("limit", limit.min(MAX_LIST_LIMIT).to_string())];
        if let (Some(param), Some(code)) = (level.scope_param(), parent_code) {
            query.push((param, code.to_string()));
        }
        if let Some(needle) = search {
            query.push(("search", needle.to_string()));
        }
        let data = self.fetch_json(level.list_path(), &query).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Fetches the descriptive detail of one entity.
    pub async fn detail(
        &self,
        level: AdministrativeLevel,
        code: &str,
    ) -> Result<GeoDetail, FetchError> {
        let data = self.fetch_json(&level.detail_path(code), &[]).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Fetches the richest detail available: the geo endpoint (coordinates
    /// and boundary) where the level has one, the plain detail otherwise.
    pub async fn geo_detail(
        &self,
        level: AdministrativeLevel,
        code: &str,
    ) -> Result<GeoDetail, FetchError> {
        let path = level
            .geo_path(code)
            .unwrap_or_else(|| level.detail_path(code));
        let data = self.fetch_json(&path, &[]).await?;
        Ok(serde_json::from_value(data)?)
    }
}
