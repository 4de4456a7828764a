//! Storage Layer
//!
//! Session-scoped, append-only history of scored readings.

mod history;

pub use history::{HistoryEntry, HistoryRow, HistoryStats, HistoryStore, TrendPoint};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("No readings recorded in this session")]
    EmptyHistory,
    #[error("History lock poisoned: {0}")]
    LockPoisoned(String),
}
