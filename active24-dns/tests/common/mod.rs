//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::VecDeque;
use std::env;
use std::sync::{Arc, Mutex};

use active24_dns::{
    ApiError, ApiRequest, ApiResponse, Client, DnsRecord, Result, ServiceRecords, Transport,
};
use async_trait::async_trait;
use reqwest::header::HeaderMap;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

// ============ Scripted transport ============

/// In-memory [`Transport`] that replays queued outcomes in order and keeps
/// every request it receives.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a response with `status` and `body`.
    pub fn reply(&self, status: u16, body: impl Into<String>) -> &Self {
        self.push(Ok(ApiResponse {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }))
    }

    /// Queue a transport-level failure.
    pub fn fail(&self, error: ApiError) -> &Self {
        self.push(Err(error))
    }

    fn push(&self, outcome: Result<ApiResponse>) -> &Self {
        self.replies
            .lock()
            .expect("replies lock poisoned")
            .push_back(outcome);
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("requests lock poisoned").clone()
    }

    /// Decoded query pairs of the `index`-th request.
    pub fn query(&self, index: usize) -> Vec<(String, String)> {
        self.requests()[index]
            .url
            .query_pairs()
            .into_owned()
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(request);
        self.replies
            .lock()
            .expect("replies lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(ApiError::Transport {
                    detail: "no scripted reply left".to_string(),
                })
            })
    }
}

/// Value of `key` in a query, if present.
pub fn param<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

// ============ Fixtures ============

pub const SERVICE_ID: u64 = 12345;

/// Records for service [`SERVICE_ID`] backed by `transport`.
pub fn service(transport: &Arc<ScriptedTransport>, max_pages: usize) -> ServiceRecords {
    Client::builder("test-key", "test-secret")
        .max_pages(max_pages)
        .transport(transport.clone())
        .build()
        .expect("client should build")
        .dns(SERVICE_ID)
}

/// JSON body of one list page.
pub fn page_body(
    names: &[&str],
    next_page_url: Option<&str>,
    current_page: Option<u32>,
    total_pages: Option<u32>,
) -> String {
    let data: Vec<serde_json::Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            serde_json::json!({
                "id": i + 1,
                "type": "A",
                "name": name,
                "content": "192.0.2.1",
                "ttl": 300,
            })
        })
        .collect();

    let mut body = serde_json::json!({ "data": data });
    if let Some(url) = next_page_url {
        body["nextPageUrl"] = url.into();
    }
    if let Some(current) = current_page {
        body["currentPage"] = current.into();
    }
    if let Some(total) = total_pages {
        body["totalPages"] = total.into();
    }
    body.to_string()
}

pub fn names(records: &[DnsRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

// ============ Live API ============

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// 测试上下文 - 封装真实 API 客户端和服务 ID
pub struct TestContext {
    pub client: Client,
    pub service_id: u64,
}

impl TestContext {
    pub fn from_env() -> Option<Self> {
        let service_id = env::var("ACTIVE24_SERVICE_ID").ok()?.parse().ok()?;
        let client = Client::from_env().ok()?;
        Some(Self { client, service_id })
    }

    pub fn records(&self) -> ServiceRecords {
        self.client.dns(self.service_id)
    }
}
