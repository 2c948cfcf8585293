//! Fuzzy merge pass — joins groups whose exact signatures differ but whose
//! content overlaps enough to be the same question (typically one extra or
//! missing option after a reformat).
//!
//! Pairwise over all members of the incoming groups, so quadratic in the
//! flattened member count. Acceptable because the scan phase has already
//! shrunk the candidate pool to signature-confirmed duplicates.

use qb_core::DedupConfig;
use std::collections::HashSet;
use tracing::debug;

use crate::normalize::option_text;
use crate::scanner::{DuplicateGroups, GroupMember};

pub struct FuzzyMerger {
    config: DedupConfig,
}

impl FuzzyMerger {
    pub fn new(config: DedupConfig) -> Self {
        Self { config }
    }

    /// Merge near-duplicate members across groups. Input groups are carried
    /// forward unchanged; pairs that clear the overlap threshold additionally
    /// land in a synthetic group keyed off their shared title preview. Only
    /// groups with two or more members survive.
    pub fn merge(&self, groups: &DuplicateGroups) -> DuplicateGroups {
        let mut merged = groups.clone();

        let members: Vec<&GroupMember> = groups.values().flatten().collect();
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                let (a, b) = (members[i], members[j]);
                if a.title_preview != b.title_preview {
                    continue;
                }

                let options_a = option_set(a);
                let options_b = option_set(b);
                let common = options_a.intersection(&options_b).count();
                let smaller = options_a.len().min(options_b.len());
                if (common as f64) < self.config.merge_threshold * smaller as f64 {
                    continue;
                }

                debug!(
                    a = %a.id,
                    b = %b.id,
                    common,
                    preview = %a.title_preview,
                    "merging near-duplicate pair"
                );
                let key = merge_key(&a.title_preview, common);
                let group = merged.entry(key).or_default();
                for member in [a, b] {
                    if !group.iter().any(|existing| existing.id == member.id) {
                        group.push((*member).clone());
                    }
                }
            }
        }

        merged.retain(|_, group| group.len() > 1);
        merged
    }
}

/// Non-empty option texts of a member, as a set.
fn option_set(member: &GroupMember) -> HashSet<String> {
    member
        .record
        .options
        .iter()
        .map(option_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Synthetic key for a merged group, distinct from any content signature.
fn merge_key(title_preview: &str, common: usize) -> String {
    let input = format!("merged_{title_preview}_{common}");
    format!("{:x}", md5::compute(input.as_bytes()))
}
