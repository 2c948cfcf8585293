//! JSONL-file store — one document per line, rewritten in full on mutation.
//!
//! Stands in for a live index when running against a corpus dump. The whole
//! file is loaded at open; corpus dumps are bounded, so no incremental reads.

use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use qb_core::QuestionRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::traits::{BulkReport, DeleteOutcome, QuestionStore, ScanHit};

/// On-disk line shape, mirroring what a scan yields.
#[derive(Debug, Serialize, Deserialize)]
struct Line {
    id: String,
    source: Value,
}

pub struct JsonlStore {
    path: PathBuf,
    docs: RwLock<Vec<(String, Value)>>,
}

impl JsonlStore {
    /// Open a corpus file, creating an empty store when the file is missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut docs = Vec::new();
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let parsed: Line = serde_json::from_str(line)?;
                docs.push((parsed.id, parsed.source));
            }
        }
        tracing::info!(path = %path.display(), documents = docs.len(), "opened corpus file");
        Ok(Self {
            path,
            docs: RwLock::new(docs),
        })
    }

    /// Rewrite the whole file from the in-memory state.
    fn persist(&self) -> Result<()> {
        let docs = self.docs.read().unwrap();
        let mut out = String::new();
        for (id, source) in docs.iter() {
            let line = Line {
                id: id.clone(),
                source: source.clone(),
            };
            out.push_str(&serde_json::to_string(&line)?);
            out.push('\n');
        }
        std::fs::write(&self.path, out)?;
        Ok(())
    }
}

#[async_trait]
impl QuestionStore for JsonlStore {
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
        let removed = {
            let mut docs = self.docs.write().unwrap();
            let before = docs.len();
            docs.retain(|(existing, _)| existing != id);
            docs.len() < before
        };
        if removed {
            self.persist()?;
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }

    async fn bulk_index(&self, records: Vec<QuestionRecord>) -> Result<BulkReport> {
        let mut report = BulkReport::default();
        {
            let mut docs = self.docs.write().unwrap();
            for record in records {
                match serde_json::to_value(&record) {
                    Ok(source) => {
                        let id = format!("q_{}", Uuid::new_v4().simple());
                        docs.push((id, source));
                        report.indexed += 1;
                    }
                    Err(err) => {
                        report.failed += 1;
                        tracing::warn!(%err, "failed to encode record for indexing");
                    }
                }
            }
        }
        self.persist()?;
        Ok(report)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.docs.read().unwrap().len())
    }
}
