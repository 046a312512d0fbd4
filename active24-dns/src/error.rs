use thiserror::Error;

use crate::transport::ApiResponse;
use crate::types::DnsRecord;

/// Unified error type for all Active24 API operations.
///
/// Variants fall into four families:
///
/// - construction / transport failures ([`InvalidRequest`](Self::InvalidRequest),
///   [`Transport`](Self::Transport), [`Timeout`](Self::Timeout),
///   [`Serialization`](Self::Serialization)):
///   no response was received, [`response()`](Self::response) is `None`;
/// - API-reported failures ([`Status`](Self::Status)): any status in `400..=599`;
/// - decode failures ([`Decode`](Self::Decode)): a response arrived but its body
///   did not have the expected shape;
/// - [`PageLimitExceeded`](Self::PageLimitExceeded): synthetic, raised by the
///   paginator, carrying the records fetched before the limit was hit.
///
/// Nothing in this crate retries on any of these.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be built (bad endpoint, path, locator or header value).
    #[error("Invalid request: {detail}")]
    InvalidRequest {
        /// What was wrong with the request.
        detail: String,
    },

    /// A network-level failure: connection refused, DNS failure, broken body stream.
    #[error("Network error: {detail}")]
    Transport {
        /// Error details from the HTTP stack.
        detail: String,
    },

    /// The per-request timeout fired before a response arrived.
    #[error("Request timeout: {detail}")]
    Timeout {
        /// Error details from the HTTP stack.
        detail: String,
    },

    /// A record could not be encoded as JSON.
    #[error("Serialization error: {detail}")]
    Serialization {
        /// Details about the serialization failure.
        detail: String,
    },

    /// The API answered with a status code in `400..=599`.
    #[error("Invalid response from API: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The full response, body included.
        response: Box<ApiResponse>,
    },

    /// The response body could not be parsed into the expected shape.
    #[error("Failed to decode API response: {detail}")]
    Decode {
        /// Details about the parse failure.
        detail: String,
        /// The response whose body failed to decode.
        response: Box<ApiResponse>,
    },

    /// Listing stopped after `max_pages` fetches while the server still reported more pages.
    ///
    /// The records fetched so far are usable and are carried in `records`.
    #[error(
        "maximum page limit reached in List, partial result returned, maxPages: {max_pages}, increase the limit in the configuration"
    )]
    PageLimitExceeded {
        /// The configured page limit.
        max_pages: usize,
        /// Records accumulated before the limit was reached, in server order.
        records: Vec<DnsRecord>,
    },

    /// Client configuration could not be loaded.
    #[error("Configuration error ({key}): {detail}")]
    Config {
        /// Setting or environment variable at fault.
        key: String,
        /// What was wrong with it.
        detail: String,
    },
}

impl ApiError {
    /// The HTTP response attached to this error, if one was received.
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Status { response, .. } | Self::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// HTTP status code of the attached response, if any.
    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.status)
    }

    /// Whether the request never produced a response (construction, network or timeout).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest { .. } | Self::Transport { .. } | Self::Timeout { .. }
        )
    }

    /// Whether this is a transport error caused by the request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Whether this is the page-limit condition (partial data available).
    pub fn is_page_limit(&self) -> bool {
        matches!(self, Self::PageLimitExceeded { .. })
    }

    /// Records accumulated before the page limit was hit.
    ///
    /// `None` for every other variant: no other failure carries usable partial data.
    pub fn partial_records(&self) -> Option<&[DnsRecord]> {
        match self {
            Self::PageLimitExceeded { records, .. } => Some(records),
            _ => None,
        }
    }

    /// Consumes the error, returning the partial records of a page-limit failure.
    pub fn into_partial_records(self) -> Option<Vec<DnsRecord>> {
        match self {
            Self::PageLimitExceeded { records, .. } => Some(records),
            _ => None,
        }
    }

    /// 是否为预期行为（API 拒绝、分页上限等），用于日志分级。
    pub(crate) fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::PageLimitExceeded { .. } | Self::Config { .. }
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            Self::InvalidRequest {
                detail: e.to_string(),
            }
        } else if e.is_timeout() {
            Self::Timeout {
                detail: e.to_string(),
            }
        } else {
            Self::Transport {
                detail: e.to_string(),
            }
        }
    }
}

/// Convenience alias used by every public operation.
pub type Result<T> = std::result::Result<T, ApiError>;
