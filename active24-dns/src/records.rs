//! DNS record operations scoped to one service.

use std::sync::Arc;

use reqwest::Method;

use crate::error::{ApiError, Result};
use crate::http::{RequestExecutor, check_status, decode_json};
use crate::paginate::{Paginator, next_continuation, page_query};
use crate::types::{Continuation, DnsRecord, DnsRecordType, RecordCollection, RecordPage};

/// Record operations for a single Active24 service (domain).
///
/// Obtained from [`Client::dns`](crate::Client::dns). Cheap to clone; every
/// clone shares the client's configuration and transport.
#[derive(Clone)]
pub struct ServiceRecords {
    executor: Arc<RequestExecutor>,
    service_id: u64,
}

impl ServiceRecords {
    pub(crate) fn new(executor: Arc<RequestExecutor>, service_id: u64) -> Self {
        Self {
            executor,
            service_id,
        }
    }

    /// The service these operations act on.
    pub fn service_id(&self) -> u64 {
        self.service_id
    }

    fn collection_path(&self) -> String {
        format!("v2/service/{}/dns/record", self.service_id)
    }

    fn record_path(&self, record_id: u64) -> String {
        format!("v2/service/{}/dns/record/{record_id}", self.service_id)
    }

    // ==================== 查询 ====================

    /// Every record of the service, across all pages.
    ///
    /// # Errors
    ///
    /// See [`list`](Self::list).
    pub async fn list_all(&self) -> Result<Vec<DnsRecord>> {
        self.list(None, None).await
    }

    /// Records matching the optional type and name filters, across all pages.
    ///
    /// Pages are requested one after another, sorted ascending by name, and
    /// concatenated in server order. Dropping the returned future stops the
    /// walk between two requests.
    ///
    /// # Errors
    ///
    /// [`ApiError::PageLimitExceeded`] when the configured page limit is hit
    /// while the server still reports more pages; the records fetched so far
    /// are inside the error. Any other failure aborts the walk and no records
    /// are returned.
    pub async fn list(
        &self,
        record_type: Option<DnsRecordType>,
        name: Option<&str>,
    ) -> Result<Vec<DnsRecord>> {
        let record_type = record_type.as_ref();
        let paginator = Paginator::new(self.executor.config().max_pages());
        let result = paginator
            .collect(|continuation| self.fetch_page(record_type, name, continuation))
            .await;
        self.report("List", result)
    }

    /// Exactly one page of records, plus how to ask for the next.
    ///
    /// Pass `None` for the first page and the returned
    /// [`next`](RecordPage::next) afterwards; `next` is `None` on the last page.
    ///
    /// # Errors
    ///
    /// Transport, status and decode failures of the single request.
    pub async fn list_page(
        &self,
        record_type: Option<DnsRecordType>,
        name: Option<&str>,
        continuation: Option<&Continuation>,
    ) -> Result<RecordPage> {
        let result = self
            .fetch_page(record_type.as_ref(), name, continuation.cloned())
            .await;
        self.report("ListPage", result)
    }

    /// One page as the API returns it, page descriptor included.
    ///
    /// # Errors
    ///
    /// Transport, status and decode failures of the single request.
    pub async fn list_paginated(
        &self,
        record_type: Option<DnsRecordType>,
        name: Option<&str>,
        continuation: Option<&Continuation>,
    ) -> Result<RecordCollection> {
        let result = self
            .fetch_collection(record_type.as_ref(), name, continuation)
            .await;
        self.report("ListPaginated", result)
    }

    async fn fetch_page(
        &self,
        record_type: Option<&DnsRecordType>,
        name: Option<&str>,
        continuation: Option<Continuation>,
    ) -> Result<RecordPage> {
        let collection = self
            .fetch_collection(record_type, name, continuation.as_ref())
            .await?;
        let next = next_continuation(&collection);
        Ok(RecordPage {
            records: collection.data,
            next,
        })
    }

    async fn fetch_collection(
        &self,
        record_type: Option<&DnsRecordType>,
        name: Option<&str>,
        continuation: Option<&Continuation>,
    ) -> Result<RecordCollection> {
        let query = page_query(record_type, name, continuation)?;
        let response = self
            .executor
            .execute(Method::GET, &self.collection_path(), &query, None)
            .await?;
        decode_json(check_status(response)?, self.executor.diagnostics())
    }

    // ==================== 变更 ====================

    /// Create a record.
    ///
    /// The API's reply carries no record ID; list the records to find it.
    ///
    /// # Errors
    ///
    /// [`ApiError::Serialization`], transport failures, or
    /// [`ApiError::Status`] when the API rejects the record.
    pub async fn create(&self, record: &DnsRecord) -> Result<()> {
        let result = self
            .send(Method::POST, self.collection_path(), Some(record))
            .await;
        self.report("Create", result)
    }

    /// Replace the record with ID `record_id`.
    ///
    /// # Errors
    ///
    /// Same as [`create`](Self::create).
    pub async fn update(&self, record_id: u64, record: &DnsRecord) -> Result<()> {
        let result = self
            .send(Method::PUT, self.record_path(record_id), Some(record))
            .await;
        self.report("Update", result)
    }

    /// Delete the record with ID `record_id`.
    ///
    /// # Errors
    ///
    /// Transport failures, or [`ApiError::Status`] (e.g. 404 for an unknown ID).
    pub async fn delete(&self, record_id: u64) -> Result<()> {
        let result = self
            .send(Method::DELETE, self.record_path(record_id), None)
            .await;
        self.report("Delete", result)
    }

    async fn send(&self, method: Method, path: String, record: Option<&DnsRecord>) -> Result<()> {
        let body = record
            .map(|r| {
                serde_json::to_string(r).map_err(|e| ApiError::Serialization {
                    detail: e.to_string(),
                })
            })
            .transpose()?;
        let response = self.executor.execute(method, &path, &[], body).await?;
        check_status(response)?;
        Ok(())
    }

    /// 记录失败日志：预期错误用 warn，其余用 error
    fn report<T>(&self, operation: &str, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            let diagnostics = self.executor.diagnostics();
            if e.is_expected() {
                diagnostics.warn(format_args!(
                    "[active24] {operation} (service {}) failed: {e}",
                    self.service_id
                ));
            } else {
                diagnostics.error(format_args!(
                    "[active24] {operation} (service {}) failed: {e}",
                    self.service_id
                ));
            }
        }
        result
    }
}

impl std::fmt::Debug for ServiceRecords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRecords")
            .field("service_id", &self.service_id)
            .field("endpoint", &self.executor.config().endpoint())
            .finish_non_exhaustive()
    }
}
