//! The single point where requests meet the network.
//!
//! # Design
//! `Transport` holds the base address and an `HttpExecutor`. For every call it
//! resolves the relative path, lays caller headers over the JSON defaults,
//! executes exactly one round trip, and turns the response into either the
//! decoded body or an `ApiError`. There are no retries, timeouts or caches.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const CONTENT_TYPE: &str = "Content-Type";
const JSON: &str = "application/json";

/// Performs one HTTP round trip.
///
/// Implementations must return non-2xx responses as `Ok(HttpResponse)`; only
/// failures that produced no response at all are `Err`.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Production executor backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl ReqwestExecutor {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.path);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Resolves, executes and interprets requests against one service.
#[derive(Clone)]
pub struct Transport {
    base_url: String,
    executor: Arc<dyn HttpExecutor>,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Transport {
    /// Transport using the default `reqwest` executor.
    pub fn new(base_url: &str) -> Self {
        Self::with_executor(base_url, Arc::new(ReqwestExecutor::default()))
    }

    pub fn with_executor(base_url: &str, executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            executor,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL and final header set for a relative request.
    ///
    /// The JSON content type comes first; a caller header with the same
    /// name (any case) replaces it.
    pub fn resolve(&self, request: HttpRequest) -> HttpRequest {
        let mut resolved = HttpRequest {
            method: request.method,
            path: format!("{}{}", self.base_url, request.path),
            headers: vec![(CONTENT_TYPE.to_string(), JSON.to_string())],
            body: request.body,
        };
        for (key, value) in request.headers {
            resolved = resolved.header(key, value);
        }
        resolved
    }

    /// Execute `request` and decode the response body as `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let request = self.resolve(request);
        let method = request.method;
        let url = request.path.clone();
        debug!(%method, %url, "sending request");

        let response = self.executor.execute(request).await.map_err(|e| {
            warn!(%method, %url, error = %e, "request failed before a response");
            e
        })?;

        parse_response(response).map_err(|e| {
            warn!(%method, %url, error = %e, "request failed");
            e
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Map a response to its decoded body or the matching `ApiError`.
pub fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Non-2xx responses become `Remote` errors carrying the body's `detail`, or a
/// generic message with the status code when it is missing or empty.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.detail)
        .filter(|detail| !detail.is_empty())
        .unwrap_or_else(|| format!("HTTP error, status {}", response.status));
    Err(ApiError::Remote {
        status: response.status,
        message,
    })
}
