//! Scan → merge → resolve orchestration.

use qb_core::DedupConfig;
use qb_store::QuestionStore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::Result;
use crate::merger::FuzzyMerger;
use crate::resolver::{resolve_duplicates, ResolveReport};
use crate::scanner::{DuplicateGroups, DuplicateScanner, ScanStats, ScanStatus};

/// One end-to-end dedup run over an injected store.
///
/// The store handle is owned by the caller; nothing here is process-global.
/// Concurrent runs against the same store are unsupported — there is no
/// run-level locking.
pub struct DedupPipeline {
    store: Arc<dyn QuestionStore>,
    config: DedupConfig,
}

/// Everything one run produced. Groups and previews are listed before any
/// destructive action is reflected, so callers can render a summary.
#[derive(Debug)]
pub struct DedupReport {
    pub scan_stats: ScanStats,
    pub scan_status: ScanStatus,
    /// Final groups after the fuzzy merge pass, each with at least 2 members.
    pub groups: DuplicateGroups,
    pub resolution: ResolveReport,
}

impl DedupPipeline {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self::with_config(store, DedupConfig::default())
    }

    pub fn with_config(store: Arc<dyn QuestionStore>, config: DedupConfig) -> Self {
        Self { store, config }
    }

    /// Run the full cycle. `confirmed` gates deletion; without it the run is
    /// read-only and the report simply describes what would be removed.
    ///
    /// A cancelled scan still yields its partial groups in the report, but is
    /// never treated as authoritative: deletion is skipped regardless of
    /// `confirmed`.
    pub async fn run(&self, confirmed: bool, cancel: &CancellationToken) -> Result<DedupReport> {
        let scanner = DuplicateScanner::new(self.config);
        let outcome = scanner.scan(self.store.as_ref(), cancel).await?;

        let merger = FuzzyMerger::new(self.config);
        let groups = merger.merge(&outcome.groups);
        info!(
            exact_groups = outcome.groups.len(),
            final_groups = groups.len(),
            "fuzzy merge finished"
        );

        let confirmed = match outcome.status {
            ScanStatus::Completed => confirmed,
            ScanStatus::Cancelled => {
                if confirmed {
                    warn!("scan incomplete, refusing to delete from partial groups");
                }
                false
            }
        };
        let resolution = resolve_duplicates(self.store.as_ref(), &groups, confirmed).await;

        Ok(DedupReport {
            scan_stats: outcome.stats,
            scan_status: outcome.status,
            groups,
            resolution,
        })
    }
}
