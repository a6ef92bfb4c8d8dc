//! HTTP client wrapper - typed endpoints over the share-code API

use std::time::Duration;

use reqwest::{header, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::api::error::{ApiError, Result};
use crate::constants::{API_URL_ENV, DEFAULT_API_URL};
use crate::models::{CreateShareCode, Envelope, ListEnvelope, PageEnvelope, SortMode};

/// Query parameters for the paged listing endpoint
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort: Option<SortMode>,
}

impl PageQuery {
    /// Unset parameters are omitted from the query string entirely
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            params.push(("pageSize", page_size.to_string()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort", sort.as_str().to_string()));
        }
        params
    }
}

/// Query parameters for the flat listing endpoint
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ListQuery {
    pub sort: Option<SortMode>,
    pub limit: Option<u32>,
}

impl ListQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(sort) = self.sort {
            params.push(("sort", sort.as_str().to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// Thin typed client over the remote share-code API.
///
/// All calls funnel through [`ApiClient::execute`], which implements the
/// four-way error taxonomy of [`ApiError`]. No retries; every failure is a
/// single error the store turns into a display string.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        ApiClient {
            http: create_client(),
            base_url,
        }
    }

    /// `GET /sharecode/page?page=&pageSize=&sort=`
    pub async fn fetch_page(&self, query: PageQuery) -> Result<PageEnvelope> {
        let req = self
            .http
            .get(self.url("/sharecode/page"))
            .query(&query.params());
        self.execute(req).await
    }

    /// `GET /sharecode?sort=&limit=` - the flat list used by the bulk
    /// price-mode fetch
    pub async fn fetch_all(&self, query: ListQuery) -> Result<ListEnvelope> {
        let req = self.http.get(self.url("/sharecode")).query(&query.params());
        self.execute(req).await
    }

    /// `POST /sharecode/{code}/use` - marks a code as redeemed
    pub async fn use_code(&self, code: &str) -> Result<Envelope<serde_json::Value>> {
        let req = self.http.post(self.url(&use_code_path(code)));
        self.execute(req).await
    }

    /// `POST /sharecode` with a `{code, price}` body
    pub async fn create_code(
        &self,
        body: &CreateShareCode,
    ) -> Result<Envelope<serde_json::Value>> {
        let req = self.http.post(self.url("/sharecode")).json(body);
        self.execute(req).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Shared request path implementing the client error taxonomy:
    /// transport failure, non-2xx status, non-JSON content type, and
    /// undecodable body, in that order.
    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let req = req
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, "transport failure");
                return Err(ApiError::Unreachable);
            }
        };

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%status, "non-success status");
            return Err(ApiError::Http { status });
        }

        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !content_type.contains("application/json") {
            tracing::warn!(content_type, "non-JSON response");
            return Err(ApiError::BackendDown);
        }

        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "failed reading body");
                return Err(ApiError::Unreachable);
            }
        };
        Ok(serde_json::from_str(&body)?)
    }
}

fn use_code_path(code: &str) -> String {
    format!("/sharecode/{}/use", urlencoding::encode(code))
}

/// Resolve the API base URL: environment variable first, then the
/// persisted override, then the built-in default.
pub fn resolve_base_url(persisted: Option<&str>) -> String {
    pick_base_url(std::env::var(API_URL_ENV).ok(), persisted)
}

fn pick_base_url(env: Option<String>, persisted: Option<&str>) -> String {
    if let Some(url) = env {
        if !url.trim().is_empty() {
            return url;
        }
    }
    if let Some(url) = persisted {
        if !url.trim().is_empty() {
            return url.to_string();
        }
    }
    DEFAULT_API_URL.to_string()
}

/// HTTP client with default configuration
fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_omits_unset_params() {
        assert!(PageQuery::default().params().is_empty());

        let query = PageQuery {
            page: Some(2),
            page_size: Some(20),
            sort: Some(SortMode::Time),
        };
        assert_eq!(
            query.params(),
            vec![
                ("page", "2".to_string()),
                ("pageSize", "20".to_string()),
                ("sort", "time".to_string()),
            ]
        );
    }

    #[test]
    fn list_query_omits_unset_params() {
        assert!(ListQuery::default().params().is_empty());

        let query = ListQuery {
            sort: Some(SortMode::Price),
            limit: Some(10_000),
        };
        assert_eq!(
            query.params(),
            vec![
                ("sort", "price".to_string()),
                ("limit", "10000".to_string()),
            ]
        );
    }

    #[test]
    fn use_code_path_percent_encodes() {
        assert_eq!(use_code_path("ABC123"), "/sharecode/ABC123/use");
        assert_eq!(use_code_path("AB C/1"), "/sharecode/AB%20C%2F1/use");
    }

    #[test]
    fn base_url_trailing_slashes_trimmed() {
        let client = ApiClient::new("http://example.com/");
        assert_eq!(client.url("/sharecode"), "http://example.com/sharecode");
    }

    #[test]
    fn base_url_precedence() {
        assert_eq!(
            pick_base_url(Some("http://env".into()), Some("http://saved")),
            "http://env"
        );
        assert_eq!(
            pick_base_url(None, Some("http://saved")),
            "http://saved"
        );
        assert_eq!(pick_base_url(Some("  ".into()), None), DEFAULT_API_URL);
        assert_eq!(pick_base_url(None, None), DEFAULT_API_URL);
    }
}
