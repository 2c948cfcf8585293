//! Near-duplicate detection and resolution for a question index.
//!
//! Three phases, run in order:
//! 1. Scan — fingerprint every document and bucket exact matches by signature.
//! 2. Fuzzy merge — join buckets whose titles match and whose option sets
//!    mostly overlap, catching reformatted option lists.
//! 3. Resolve — keep the first member of each bucket, delete the rest.

pub mod error;
pub mod merger;
pub mod normalize;
pub mod pipeline;
pub mod resolver;
pub mod scanner;
pub mod signature;

pub use error::{DedupError, Result};
pub use merger::FuzzyMerger;
pub use pipeline::{DedupPipeline, DedupReport};
pub use resolver::{resolve_duplicates, GroupResolution, ResolveReport, ResolveStatus};
pub use scanner::{
    DuplicateGroups, DuplicateScanner, GroupMember, ScanOutcome, ScanStats, ScanStatus,
};
pub use signature::signature;
