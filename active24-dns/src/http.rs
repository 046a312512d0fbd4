//! Active24 HTTP 请求方法
//!
//! [`RequestExecutor`] turns (method, path, query, body) into one signed request,
//! hands it to the [`Transport`] and returns the raw response. It issues exactly
//! one network call per invocation and never retries. Status checking and JSON
//! decoding are separate steps ([`check_status`], [`decode_json`]) applied by the
//! record operations.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{ACCEPT, CONTENT_TYPE, DATE, HeaderMap, HeaderValue};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::logging::Diagnostics;
use crate::sign::{canonical_message, signature};
use crate::transport::{ApiRequest, ApiResponse, BasicAuth, Transport};
use crate::utils::log_sanitizer::{mask_credential, truncate_for_log};
use crate::utils::path;

/// Query parameters in the order they are sent.
pub(crate) type Query = Vec<(String, String)>;

/// Signs and dispatches single API requests.
pub(crate) struct RequestExecutor {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    diagnostics: Diagnostics,
}

impl RequestExecutor {
    pub(crate) fn new(
        config: Arc<ClientConfig>,
        transport: Arc<dyn Transport>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            config,
            transport,
            diagnostics,
        }
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// 执行一次 API 请求
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<String>,
    ) -> Result<ApiResponse> {
        let request = self.prepare(method, path, query, body, Utc::now())?;

        self.diagnostics.debug(format_args!(
            "[active24] Calling API {} {} (key {})",
            request.method,
            request.url,
            mask_credential(self.config.auth_key())
        ));
        if let Some(body) = &request.body {
            self.diagnostics
                .trace(format_args!("Request Body: {}", truncate_for_log(body)));
        }

        let response = self.transport.execute(request).await.inspect_err(|e| {
            self.diagnostics.debug(format_args!("Transport failure: {e}"));
        })?;

        self.diagnostics
            .debug(format_args!("Response Status: {}", response.status));
        self.diagnostics.trace(format_args!(
            "Response Body: {}",
            truncate_for_log(&response.body)
        ));

        Ok(response)
    }

    /// 构造已签名请求
    ///
    /// The signature and the `Date` header are derived from the same instant `now`.
    pub(crate) fn prepare(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<ApiRequest> {
        // 1. 规范化路径并拼接 URL
        let path = path::normalize(path);
        let mut url = Url::parse(&format!("{}{path}", self.config.endpoint())).map_err(|e| {
            ApiError::InvalidRequest {
                detail: format!("invalid request URL for path '{path}': {e}"),
            }
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        // 2. 签名
        let message = canonical_message(method.as_str(), &path, now.timestamp());
        let password = signature(&message, self.config.auth_secret());

        // 3. 请求头
        let date = now.to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            DATE,
            HeaderValue::from_str(&date).map_err(|e| ApiError::InvalidRequest {
                detail: format!("invalid Date header '{date}': {e}"),
            })?,
        );

        Ok(ApiRequest {
            method,
            url,
            headers,
            basic_auth: BasicAuth {
                username: self.config.auth_key().to_string(),
                password,
            },
            body,
        })
    }
}

/// Turn a `400..=599` response into [`ApiError::Status`].
pub(crate) fn check_status(response: ApiResponse) -> Result<ApiResponse> {
    if response.is_error() {
        return Err(ApiError::Status {
            status: response.status,
            response: Box::new(response),
        });
    }
    Ok(response)
}

/// Decode a JSON body, keeping the response on failure.
pub(crate) fn decode_json<T: DeserializeOwned>(
    response: ApiResponse,
    diagnostics: &Diagnostics,
) -> Result<T> {
    serde_json::from_str(&response.body).map_err(|e| {
        diagnostics.error(format_args!("JSON parse failed: {e}"));
        diagnostics.error(format_args!(
            "Raw response: {}",
            truncate_for_log(&response.body)
        ));
        ApiError::Decode {
            detail: e.to_string(),
            response: Box::new(response),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn execute(&self, _request: ApiRequest) -> Result<ApiResponse> {
            Err(ApiError::Transport {
                detail: "unreachable".to_string(),
            })
        }
    }

    fn executor(endpoint: &str) -> RequestExecutor {
        let mut config = ClientConfig::new("my-key", "my-secret");
        config.set_endpoint(endpoint.to_string());
        RequestExecutor::new(
            Arc::new(config),
            Arc::new(Unreachable),
            Diagnostics::global(),
        )
    }

    fn instant() -> DateTime<Utc> {
        // 2024-01-15T08:00:00Z
        Utc.timestamp_opt(1_705_305_600, 0).single().unwrap_or_default()
    }

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            headers: HeaderMap::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn prepare_sets_headers_and_signature() {
        let res = executor("https://rest.active24.cz").prepare(
            Method::GET,
            "v2/service/42/dns/record",
            &[],
            None,
            instant(),
        );
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(req) = res else {
            return;
        };

        assert_eq!(
            req.url.as_str(),
            "https://rest.active24.cz/v2/service/42/dns/record"
        );
        assert_eq!(req.headers[CONTENT_TYPE], "application/json");
        assert_eq!(req.headers[ACCEPT], "application/json");
        assert_eq!(req.headers[DATE], "2024-01-15T08:00:00Z");
        assert_eq!(req.basic_auth.username, "my-key");
        assert_eq!(
            req.basic_auth.password,
            signature("GET /v2/service/42/dns/record 1705305600", "my-secret")
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn prepare_signs_path_without_query() {
        let query = vec![
            ("descending".to_string(), "false".to_string()),
            ("filters[type]".to_string(), r#"["CNAME"]"#.to_string()),
        ];
        let res = executor("https://rest.active24.cz").prepare(
            Method::GET,
            "/v2/service/42/dns/record",
            &query,
            None,
            instant(),
        );
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(req) = res else {
            return;
        };
        let pairs: Vec<(String, String)> = req.url.query_pairs().into_owned().collect();
        assert_eq!(pairs, query);
        assert_eq!(
            req.basic_auth.password,
            signature("GET /v2/service/42/dns/record 1705305600", "my-secret")
        );
    }

    #[test]
    fn prepare_without_query_has_no_question_mark() {
        let res = executor("https://rest.active24.cz").prepare(
            Method::DELETE,
            "v2/service/42/dns/record/7",
            &[],
            None,
            instant(),
        );
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(req) = res else {
            return;
        };
        assert_eq!(req.url.query(), None);
    }

    #[test]
    fn prepare_endpoint_with_path_prefix() {
        let res = executor("http://localhost:8080/mock").prepare(
            Method::PUT,
            "v2/service/1/dns/record/9",
            &[],
            Some("{}".to_string()),
            instant(),
        );
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(req) = res else {
            return;
        };
        assert_eq!(
            req.url.as_str(),
            "http://localhost:8080/mock/v2/service/1/dns/record/9"
        );
        // Only the request path is signed, not the endpoint prefix.
        assert_eq!(
            req.basic_auth.password,
            signature("PUT /v2/service/1/dns/record/9 1705305600", "my-secret")
        );
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn prepare_malformed_endpoint_is_invalid_request() {
        let res = executor("not a url").prepare(Method::GET, "v2", &[], None, instant());
        assert!(
            matches!(&res, Err(ApiError::InvalidRequest { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[tokio::test]
    async fn execute_propagates_transport_error() {
        let res = executor("https://rest.active24.cz")
            .execute(Method::GET, "v2/service/1/dns/record", &[], None)
            .await;
        assert!(
            matches!(&res, Err(ApiError::Transport { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn check_status_passes_success() {
        let res = check_status(response(204, ""));
        assert!(matches!(res, Ok(r) if r.status == 204));
    }

    #[test]
    fn check_status_rejects_4xx_and_5xx() {
        for status in [400, 404, 500, 599] {
            let res = check_status(response(status, "{}"));
            assert!(
                matches!(&res, Err(e) if e.status() == Some(status)),
                "status {status}: {res:?}"
            );
        }
    }

    #[test]
    fn decode_json_keeps_response_on_failure() {
        let res: Result<serde_json::Value> =
            decode_json(response(200, "<html>"), &Diagnostics::global());
        assert!(
            matches!(&res, Err(ApiError::Decode { response, .. }) if response.body == "<html>"),
            "unexpected result: {res:?}"
        );
    }
}
