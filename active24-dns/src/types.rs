use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============ DNS Record Types ============

/// DNS record type tag, as understood by the Active24 record API.
///
/// Serialized as the uppercase tag (`"A"`, `"AAAA"`, `"CNAME"`, ...).
/// Tags outside the known set are kept verbatim in [`Other`](Self::Other) so
/// that a listing never fails just because the server grew a new type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Apex alias record (CNAME-like, allowed at the zone apex).
    Aname,
    /// Certificate Authority Authorization record.
    Caa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Service locator record.
    Srv,
    /// Text record.
    Txt,
    /// Certificate record.
    Cert,
    /// Location record.
    Loc,
    /// SSH key fingerprint record.
    Sshfp,
    /// TLSA certificate association record.
    Tlsa,
    /// Delegation signer record.
    Ds,
    /// Name server record.
    Ns,
    /// Any tag not listed above, kept as received.
    Other(String),
}

impl DnsRecordType {
    /// Every tag the API documents, in the API's own order.
    pub const KNOWN: [Self; 14] = [
        Self::A,
        Self::Aaaa,
        Self::Aname,
        Self::Caa,
        Self::Cname,
        Self::Mx,
        Self::Srv,
        Self::Txt,
        Self::Cert,
        Self::Loc,
        Self::Sshfp,
        Self::Tlsa,
        Self::Ds,
        Self::Ns,
    ];

    /// Wire representation of the tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Aname => "ANAME",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
            Self::Cert => "CERT",
            Self::Loc => "LOC",
            Self::Sshfp => "SSHFP",
            Self::Tlsa => "TLSA",
            Self::Ds => "DS",
            Self::Ns => "NS",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DnsRecordType {
    type Err = std::convert::Infallible;

    /// Case-insensitive; unknown tags become [`DnsRecordType::Other`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Ok(Self::KNOWN
            .into_iter()
            .find(|t| t.as_str() == upper)
            .unwrap_or_else(|| Self::Other(s.to_string())))
    }
}

impl Serialize for DnsRecordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DnsRecordType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        let Ok(record_type) = tag.parse::<Self>();
        Ok(record_type)
    }
}

// ============ DNS Record ============

/// A DNS resource record under one service (domain).
///
/// Optional fields are omitted from the JSON payload when unset: the API
/// distinguishes "absent" from `null` or `0`, so they are never sent as such.
/// `name` and `ttl` are always emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Record type tag. Required by the API for create/update of most types.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<DnsRecordType>,
    /// Server-assigned identifier; present only on records read back from the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Host label relative to the service's domain (e.g. `"www"`).
    #[serde(default)]
    pub name: String,
    /// Record value: address, target, text, ... depending on the type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Time to live, in seconds.
    #[serde(default)]
    pub ttl: u32,
    /// Priority (MX, SRV).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// Port (SRV).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    /// Weight (SRV).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

impl DnsRecord {
    /// A record with only the always-present fields set.
    pub fn new(name: impl Into<String>, ttl: u32) -> Self {
        Self {
            record_type: None,
            id: None,
            name: name.into(),
            content: None,
            ttl,
            priority: None,
            port: None,
            weight: None,
        }
    }

    /// Set the record type.
    #[must_use]
    pub fn with_type(mut self, record_type: DnsRecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    /// Set the record value.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the priority (MX, SRV).
    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the port (SRV).
    #[must_use]
    pub fn with_port(mut self, port: u32) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the weight (SRV).
    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }
}

// ============ Pagination ============

/// One page of a record listing, exactly as the API returns it.
///
/// All metadata fields are optional; a missing `data` array means an empty page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCollection {
    /// 1-indexed number of this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    /// Total number of pages for the query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    /// Total number of records for the query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_records: Option<u32>,
    /// Page size the server used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_per_page: Option<u32>,
    /// Relative locator of the next page, typically `"/?page=2"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_url: Option<String>,
    /// Records of this page, in server order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<DnsRecord>,
}

/// How to ask for the page after the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Query-string fragment taken from `nextPageUrl`, leading `/` and `?` stripped.
    Locator(String),
    /// Explicit page number computed from `currentPage` / `totalPages`.
    Page(u32),
}

/// One page of records plus the state needed to fetch the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPage {
    /// Records of this page, in server order.
    pub records: Vec<DnsRecord>,
    /// `None` when this was the last page.
    pub next: Option<Continuation>,
}
