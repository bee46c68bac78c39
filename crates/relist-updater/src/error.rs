use relist_diff::DiffError;
use thiserror::Error;

/// Errors produced while driving updates.
#[derive(Debug, Error)]
pub enum UpdaterError {
    #[error("diff failed: {0}")]
    Diff(#[from] DiffError),

    #[error("update target failed: {0}")]
    Target(String),
}

pub type UpdaterResult<T> = Result<T, UpdaterError>;
