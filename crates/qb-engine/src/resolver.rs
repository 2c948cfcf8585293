//! Destructive resolution — keeps one survivor per group, deletes the rest.

use qb_store::{DeleteOutcome, QuestionStore};
use tracing::{info, warn};

use crate::scanner::DuplicateGroups;

/// Whether deletions were actually applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStatus {
    Applied,
    Declined,
}

/// Ids touched while resolving one group.
#[derive(Debug, Clone)]
pub struct GroupResolution {
    pub survivor: String,
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

/// Aggregate outcome of a resolution pass.
#[derive(Debug, Clone)]
pub struct ResolveReport {
    pub status: ResolveStatus,
    /// Total duplicates found: sum over groups of (size - 1).
    pub duplicates: usize,
    pub deleted: usize,
    pub failed: usize,
    pub groups: Vec<GroupResolution>,
}

/// Delete every non-survivor in every group. The first member by arrival
/// order survives. Each deletion is attempted independently: one failure is
/// logged and counted without blocking the rest. Without confirmation this is
/// a no-op that still reports how many duplicates exist.
pub async fn resolve_duplicates(
    store: &dyn QuestionStore,
    groups: &DuplicateGroups,
    confirmed: bool,
) -> ResolveReport {
    let duplicates: usize = groups
        .values()
        .map(|group| group.len().saturating_sub(1))
        .sum();

    if !confirmed {
        info!(duplicates, "resolution declined, corpus untouched");
        return ResolveReport {
            status: ResolveStatus::Declined,
            duplicates,
            deleted: 0,
            failed: 0,
            groups: Vec::new(),
        };
    }

    let mut report = ResolveReport {
        status: ResolveStatus::Applied,
        duplicates,
        deleted: 0,
        failed: 0,
        groups: Vec::new(),
    };

    for members in groups.values() {
        let Some((survivor, rest)) = members.split_first() else {
            continue;
        };
        let mut resolution = GroupResolution {
            survivor: survivor.id.clone(),
            deleted: Vec::new(),
            failed: Vec::new(),
        };
        info!(
            survivor = %survivor.id,
            group_size = members.len(),
            preview = %survivor.title_preview,
            "keeping first member of group"
        );

        for member in rest {
            match store.delete_by_id(&member.id).await {
                Ok(DeleteOutcome::Deleted) => {
                    report.deleted += 1;
                    resolution.deleted.push(member.id.clone());
                    info!(id = %member.id, "deleted duplicate");
                }
                Ok(DeleteOutcome::NotFound) => {
                    report.failed += 1;
                    resolution.failed.push(member.id.clone());
                    warn!(id = %member.id, "duplicate already gone");
                }
                Err(err) => {
                    report.failed += 1;
                    resolution.failed.push(member.id.clone());
                    warn!(id = %member.id, %err, "failed to delete duplicate");
                }
            }
        }
        report.groups.push(resolution);
    }

    info!(
        deleted = report.deleted,
        failed = report.failed,
        "resolution finished"
    );
    report
}
