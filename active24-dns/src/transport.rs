//! HTTP transport seam.
//!
//! The request executor prepares a fully signed [`ApiRequest`] and hands it to a
//! [`Transport`], which performs exactly one network exchange and returns the
//! raw [`ApiResponse`]. [`ReqwestTransport`] is the production implementation;
//! tests substitute a scripted one.
//!
//! A transport reads the response body to completion before returning, so the
//! underlying connection goes back to the pool on every path, success or error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Url};

use crate::error::{ApiError, Result};

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// A prepared, signed API request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL, query string included.
    pub url: Url,
    /// `Content-Type`, `Accept` and `Date`.
    pub headers: HeaderMap,
    /// HTTP Basic credentials: API key and request signature.
    pub basic_auth: BasicAuth,
    /// JSON body, if any.
    pub body: Option<String>,
}

/// HTTP Basic credentials attached to a request.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    /// The API key.
    pub username: String,
    /// The hex request signature.
    pub password: String,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<signature>")
            .finish()
    }
}

/// A raw API response with its body fully read.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body as text.
    pub body: String,
}

impl ApiResponse {
    /// Whether the status is one the API uses to report failure (`400..=599`).
    pub fn is_error(&self) -> bool {
        (400..600).contains(&self.status)
    }
}

/// One-shot HTTP executor.
///
/// Implementations perform exactly one network exchange per call: no retries,
/// no redirects into pagination, no caching.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the response with its body read.
    ///
    /// Fails with [`ApiError::InvalidRequest`], [`ApiError::Transport`] or
    /// [`ApiError::Timeout`]; HTTP error statuses are *not* errors at this layer.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// [`Transport`] backed by a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config {
                key: "http_client".to_string(),
                detail: e.to_string(),
            })?;
        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one shared with the rest of an application.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let ApiRequest {
            method,
            url,
            headers,
            basic_auth,
            body,
        } = request;

        let mut builder = self
            .client
            .request(method, url)
            .headers(headers)
            .basic_auth(basic_auth.username, Some(basic_auth.password));
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        // 读取完整响应体，连接随之归还连接池
        let body = response.text().await?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
