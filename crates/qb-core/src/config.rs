use serde::{Deserialize, Serialize};

/// Tuning knobs for a dedup run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DedupConfig {
    /// Minimum option-overlap ratio (against the smaller option set) for the
    /// fuzzy merge pass. Fixed per run, never adaptive.
    pub merge_threshold: f64,
    /// Length in characters of the normalized-title preview used as the
    /// cheap equality pre-filter before pairwise option comparison.
    pub preview_len: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            merge_threshold: 0.8,
            preview_len: 50,
        }
    }
}
