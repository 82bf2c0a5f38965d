use thiserror::Error;

use crate::core::runner::CommandError;

/// Why a run of autopush did not succeed.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("GitHub CLI (gh) not found")]
    GhMissing,

    #[error("Repository name cannot be empty")]
    EmptyName,

    #[error(transparent)]
    Step(#[from] CommandError),

    #[error("Failed to create repository '{name}'")]
    CreateRepo { name: String },

    #[error("Failed to push: {detail}")]
    Push { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Config loading and local file setup.
    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

impl PushError {
    /// Hard precondition failures stop the run before any flow starts.
    pub fn is_precondition(&self) -> bool {
        matches!(self, PushError::GhMissing | PushError::EmptyName)
    }
}
