//! In-memory store, used by tests and demos.

use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use qb_core::QuestionRecord;
use serde_json::Value;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::traits::{BulkReport, DeleteOutcome, QuestionStore, ScanHit};

/// Documents held in insertion order behind a lock. Scans snapshot the list,
/// so a scan never observes concurrent mutation part-way through.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<Vec<(String, Value)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw document under an explicit id, replacing any existing one.
    pub fn insert_raw(&self, id: impl Into<String>, source: Value) {
        let id = id.into();
        let mut docs = self.docs.write().unwrap();
        if let Some(entry) = docs.iter_mut().find(|(existing, _)| *existing == id) {
            entry.1 = source;
        } else {
            docs.push((id, source));
        }
    }

    /// Insert a typed record under an explicit id.
    pub fn insert(&self, id: impl Into<String>, record: &QuestionRecord) -> Result<()> {
        self.insert_raw(id, serde_json::to_value(record)?);
        Ok(())
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    fn scan_all(&self) -> BoxStream<'_, Result<ScanHit>> {
        let snapshot: Vec<ScanHit> = self
            .docs
            .read()
            .unwrap()
            .iter()
            .map(|(id, source)| ScanHit {
                id: id.clone(),
                source: source.clone(),
            })
            .collect();
        Box::pin(stream::iter(snapshot.into_iter().map(Ok)))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<QuestionRecord>> {
        let docs = self.docs.read().unwrap();
        match docs.iter().find(|(existing, _)| existing == id) {
            Some((_, source)) => Ok(Some(serde_json::from_value(source.clone())?)),
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<DeleteOutcome> {
        let mut docs = self.docs.write().unwrap();
        let before = docs.len();
        docs.retain(|(existing, _)| existing != id);
        if docs.len() < before {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }

    async fn bulk_index(&self, records: Vec<QuestionRecord>) -> Result<BulkReport> {
        let mut report = BulkReport::default();
        for record in records {
            match serde_json::to_value(&record) {
                Ok(source) => {
                    let id = format!("q_{}", Uuid::new_v4().simple());
                    self.docs.write().unwrap().push((id, source));
                    report.indexed += 1;
                }
                Err(err) => {
                    report.failed += 1;
                    tracing::warn!(%err, "failed to encode record for indexing");
                }
            }
        }
        Ok(report)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.docs.read().unwrap().len())
    }
}
