//! Shared domain types for the qbank workspace.

pub mod config;
pub mod question;

pub use config::DedupConfig;
pub use question::{QuestionOption, QuestionRecord};
