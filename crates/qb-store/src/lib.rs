//! Storage adapters for the question index.
//!
//! The dedup engine talks to any document store through the [`QuestionStore`]
//! trait. Two adapters ship here: an in-memory store for tests and demos, and
//! a JSONL-file store for standalone runs against a corpus dump.

pub mod error;
pub mod jsonl;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use jsonl::JsonlStore;
pub use memory::MemoryStore;
pub use traits::{BulkReport, DeleteOutcome, QuestionStore, ScanHit};
