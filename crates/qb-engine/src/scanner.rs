//! Full-corpus duplicate scan.

use futures::StreamExt;
use qb_core::{DedupConfig, QuestionRecord};
use qb_store::QuestionStore;
use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::normalize::normalize;
use crate::signature::signature;

/// One record inside a duplicate group, in arrival order.
#[derive(Debug, Clone)]
pub struct GroupMember {
    pub id: String,
    pub record: QuestionRecord,
    /// Truncated normalized title, used as the fuzzy-pass pre-filter.
    pub title_preview: String,
}

/// Groups keyed by signature (or synthetic merge key). BTreeMap keeps
/// iteration deterministic across runs.
pub type DuplicateGroups = BTreeMap<String, Vec<GroupMember>>;

/// Whether a scan drained the index or was cut short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Completed,
    Cancelled,
}

/// Counters reported for observability; never failure conditions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanStats {
    pub scanned: usize,
    pub malformed: usize,
}

/// Scan result: groups of two or more records sharing a signature, plus
/// counters and the completion status. Singleton groups are already dropped.
#[derive(Debug)]
pub struct ScanOutcome {
    pub groups: DuplicateGroups,
    pub stats: ScanStats,
    pub status: ScanStatus,
}

pub struct DuplicateScanner {
    config: DedupConfig,
}

impl DuplicateScanner {
    pub fn new(config: DedupConfig) -> Self {
        Self { config }
    }

    /// Scan the full index, grouping records by content signature.
    ///
    /// Malformed documents are counted and skipped, never fatal. A store
    /// failure mid-stream aborts the run. Cancellation stops iteration and
    /// returns whatever accumulated so far, marked [`ScanStatus::Cancelled`].
    pub async fn scan(
        &self,
        store: &dyn QuestionStore,
        cancel: &CancellationToken,
    ) -> Result<ScanOutcome> {
        let mut groups: DuplicateGroups = BTreeMap::new();
        let mut stats = ScanStats::default();
        let mut status = ScanStatus::Completed;

        let mut hits = store.scan_all();
        while let Some(hit) = hits.next().await {
            if cancel.is_cancelled() {
                warn!(scanned = stats.scanned, "scan cancelled, returning partial groups");
                status = ScanStatus::Cancelled;
                break;
            }
            let hit = hit?;
            stats.scanned += 1;
            if stats.scanned % 100 == 0 {
                debug!(
                    scanned = stats.scanned,
                    malformed = stats.malformed,
                    "scan progress"
                );
            }

            let record: QuestionRecord = match serde_json::from_value(hit.source) {
                Ok(record) => record,
                Err(err) => {
                    stats.malformed += 1;
                    warn!(id = %hit.id, %err, "skipping malformed document");
                    continue;
                }
            };

            let sig = signature(&record);
            let title_preview = preview(
                &normalize(record.title.as_deref().unwrap_or("")),
                self.config.preview_len,
            );
            groups.entry(sig).or_default().push(GroupMember {
                id: hit.id,
                record,
                title_preview,
            });
        }

        groups.retain(|_, members| members.len() > 1);
        info!(
            scanned = stats.scanned,
            malformed = stats.malformed,
            duplicate_groups = groups.len(),
            "scan finished"
        );
        Ok(ScanOutcome {
            groups,
            stats,
            status,
        })
    }
}

/// First `len` characters of a normalized title.
pub(crate) fn preview(normalized: &str, len: usize) -> String {
    normalized.chars().take(len).collect()
}
