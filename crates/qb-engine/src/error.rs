use thiserror::Error;

#[derive(Error, Debug)]
pub enum DedupError {
    /// The store failed before or during iteration. Fatal to the run: a scan
    /// that never drained the index must not drive deletions.
    #[error("store error: {0}")]
    Store(#[from] qb_store::StoreError),
}

pub type Result<T> = std::result::Result<T, DedupError>;
