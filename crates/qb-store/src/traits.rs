use async_trait::async_trait;
use futures::stream::BoxStream;
use qb_core::QuestionRecord;
use serde_json::Value;

use crate::error::Result;

/// One raw document yielded by a full-corpus scan. The source stays untyped
/// here; validation happens where the document is consumed.
#[derive(Debug, Clone)]
pub struct ScanHit {
    pub id: String,
    pub source: Value,
}

/// Outcome of a single delete. A missing document is not an error at this
/// layer; callers decide how to count it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Counters from a bulk ingest.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulkReport {
    pub indexed: usize,
    pub failed: usize,
}

/// Document-store capabilities the engine consumes.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Lazily iterate every document in the index. Each call starts a fresh
    /// scan; yield order is unspecified and may differ between runs.
    fn scan_all(&self) -> BoxStream<'_, Result<ScanHit>>;

    /// Fetch one document by id, decoded into a typed record.
    async fn get_by_id(&self, id: &str) -> Result<Option<QuestionRecord>>;

    /// Delete one document by id. Idempotent: deleting a missing id reports
    /// [`DeleteOutcome::NotFound`] rather than failing.
    async fn delete_by_id(&self, id: &str) -> Result<DeleteOutcome>;

    /// Index a batch of records, assigning ids. Per-document failures are
    /// counted in the report and never abort the batch.
    async fn bulk_index(&self, docs: Vec<QuestionRecord>) -> Result<BulkReport>;

    /// Number of documents currently in the index.
    async fn count(&self) -> Result<usize>;
}
