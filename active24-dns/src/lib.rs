//! # active24-dns
//!
//! Client library for the [Active24](https://www.active24.cz/) DNS record REST API.
//!
//! Every request is signed with HMAC-SHA1 over `"METHOD /path unix-timestamp"`
//! and sent with HTTP Basic credentials (API key, signature) plus a matching
//! `Date` header. Listings are paged transparently: the client follows either
//! the server's `nextPageUrl` locator or its `currentPage`/`totalPages`
//! counters, up to a configurable page limit.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use active24_dns::{Client, DnsRecord, DnsRecordType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a client (or `Client::from_env()`)
//!     let client = Client::new("api-key", "api-secret")?;
//!     let records = client.dns(12345);
//!
//!     // 2. List every record of the service
//!     for record in records.list_all().await? {
//!         println!("{:?} {} {:?}", record.record_type, record.name, record.content);
//!     }
//!
//!     // 3. Create a CNAME record
//!     let cname = DnsRecord::new("www", 600)
//!         .with_type(DnsRecordType::Cname)
//!         .with_content("example.com.");
//!     records.create(&cname).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Manual Paging
//!
//! ```rust,no_run
//! # use active24_dns::*;
//! # async fn example(records: ServiceRecords) -> Result<()> {
//! let mut continuation = None;
//! loop {
//!     let page = records
//!         .list_page(Some(DnsRecordType::Txt), None, continuation.as_ref())
//!         .await?;
//!     println!("{} records", page.records.len());
//!     match page.next {
//!         Some(next) => continuation = Some(next),
//!         None => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ApiError>`](ApiError):
//!
//! - [`ApiError::Transport`] / [`ApiError::Timeout`] — no response was received
//! - [`ApiError::Status`] — the API answered 400–599; the response is attached
//! - [`ApiError::Decode`] — the body could not be parsed; the response is attached
//! - [`ApiError::PageLimitExceeded`] — the listing was cut short; the records
//!   fetched so far are attached
//!
//! Nothing is retried automatically.

mod client;
mod config;
mod error;
mod http;
mod logging;
mod paginate;
mod records;
mod sign;
mod transport;
mod types;
mod utils;

// Re-export error types
pub use error::{ApiError, Result};

// Re-export client and configuration
pub use client::{Client, ClientBuilder};
pub use config::{
    ClientConfig, DEFAULT_ENDPOINT, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT, ENV_API_ENDPOINT,
    ENV_API_KEY, ENV_API_SECRET, ENV_MAX_PAGES, ENV_TIMEOUT_SECS,
};
pub use logging::Diagnostics;
pub use records::ServiceRecords;

// Re-export transport seam
pub use transport::{ApiRequest, ApiResponse, BasicAuth, ReqwestTransport, Transport};

// Re-export types
pub use types::{Continuation, DnsRecord, DnsRecordType, RecordCollection, RecordPage};
