use thiserror::Error;

use crate::models::{DataError, ProgressScreenData};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("progress feed unavailable: {0}")]
    Unavailable(String),

    #[error("progress feed sent an invalid snapshot: {0}")]
    Invalid(#[from] DataError),
}

/// Source of progress snapshots. Called from a worker thread during a refresh,
/// so implementations must be shareable across threads.
pub trait ProgressProvider: Send + Sync {
    fn fetch_progress_snapshot(&self) -> Result<ProgressScreenData, FetchError>;
}
