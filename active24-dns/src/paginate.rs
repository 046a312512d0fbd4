//! Page walking for record listings.
//!
//! The API signals "more pages" in one of two ways: an opaque `nextPageUrl`
//! query fragment (preferred), or `currentPage`/`totalPages` counters. Both are
//! folded into a [`Continuation`] after each page, and [`Paginator`] keeps
//! fetching until no continuation is left or the page budget is spent.

use std::future::Future;

use crate::error::{ApiError, Result};
use crate::http::Query;
use crate::types::{Continuation, DnsRecord, DnsRecordType, RecordCollection, RecordPage};

/// Work out how the page after `page` should be requested, if at all.
///
/// A non-empty locator wins; otherwise the page counters are consulted.
pub(crate) fn next_continuation(page: &RecordCollection) -> Option<Continuation> {
    // 服务端通常返回 "/?page=2"，去掉开头的 "/" 与 "?"
    let locator = page
        .next_page_url
        .as_deref()
        .map(|url| url.trim_start_matches(['/', '?']))
        .unwrap_or_default();
    if !locator.is_empty() {
        return Some(Continuation::Locator(locator.to_string()));
    }

    match (page.current_page, page.total_pages) {
        (Some(current), Some(total)) if current < total => Some(Continuation::Page(current + 1)),
        _ => None,
    }
}

/// Build the query string for one listing request.
///
/// Sorting is always ascending by name. Filters are added only when given.
/// Pairs from a locator replace base pairs with the same key and are appended
/// otherwise; an explicit `page` is sent only for [`Continuation::Page`] above 1.
pub(crate) fn page_query(
    record_type: Option<&DnsRecordType>,
    name: Option<&str>,
    continuation: Option<&Continuation>,
) -> Result<Query> {
    let mut query: Query = vec![
        ("descending".to_string(), "false".to_string()),
        ("sortBy".to_string(), "name".to_string()),
    ];
    if let Some(record_type) = record_type.filter(|t| !t.as_str().is_empty()) {
        query.push(("filters[type]".to_string(), format!(r#"["{record_type}"]"#)));
    }
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        query.push(("filters[name]".to_string(), name.to_string()));
    }

    match continuation {
        Some(Continuation::Locator(locator)) => {
            for (key, value) in parse_locator(locator)? {
                match query.iter_mut().find(|(k, _)| *k == key) {
                    Some(slot) => slot.1 = value,
                    None => query.push((key, value)),
                }
            }
        }
        Some(Continuation::Page(page)) if *page > 1 => {
            query.push(("page".to_string(), page.to_string()));
        }
        _ => {}
    }

    Ok(query)
}

/// Split a locator fragment into decoded `key=value` pairs.
fn parse_locator(locator: &str) -> Result<Query> {
    let decode = |raw: &str| {
        urlencoding::decode(&raw.replace('+', " "))
            .map(std::borrow::Cow::into_owned)
            .map_err(|e| ApiError::InvalidRequest {
                detail: format!("invalid next page locator '{locator}': {e}"),
            })
    };

    let mut pairs = Vec::new();
    for part in locator.trim_start_matches(['/', '?']).split('&') {
        let (key, value) = part.split_once('=').unwrap_or((part, ""));
        let (key, value) = (decode(key)?, decode(value)?);
        if !key.is_empty() && !value.is_empty() {
            pairs.push((key, value));
        }
    }
    Ok(pairs)
}

/// Drives a single-page fetch until the listing is complete.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Paginator {
    max_pages: usize,
}

impl Paginator {
    pub(crate) fn new(max_pages: usize) -> Self {
        Self {
            max_pages: max_pages.max(1),
        }
    }

    /// Fetch pages in order and concatenate their records.
    ///
    /// `fetch` receives the continuation for the page to load (`None` for the
    /// first). At most `max_pages` fetches are made; if the last one still
    /// signals more data, the records gathered so far come back inside
    /// [`ApiError::PageLimitExceeded`]. Any fetch error ends the walk and the
    /// accumulated records are dropped.
    pub(crate) async fn collect<F, Fut>(&self, mut fetch: F) -> Result<Vec<DnsRecord>>
    where
        F: FnMut(Option<Continuation>) -> Fut,
        Fut: Future<Output = Result<RecordPage>>,
    {
        let mut records = Vec::new();
        let mut continuation = None;
        let mut fetched = 0;

        loop {
            let page = fetch(continuation.take()).await?;
            fetched += 1;
            records.extend(page.records);

            match page.next {
                None => return Ok(records),
                Some(_) if fetched >= self.max_pages => {
                    return Err(ApiError::PageLimitExceeded {
                        max_pages: self.max_pages,
                        records,
                    });
                }
                next => continuation = next,
            }
        }
    }
}
