//! Error types for the menu finalization workflow.
use menu_voting_repository::MenuRepositoryError;
use thiserror::Error;

/// Represents errors that can occur within the finalization workflow.
///
/// Finalize-while-finalized and reset-while-open are not errors; they are
/// no-op outcomes returned from the workflow itself.
#[derive(Debug, Error)]
pub enum FinalizationError {
    #[error("Permission denied")]
    PermissionDenied,

    #[error("Repository error: {0}")]
    Repository(#[from] MenuRepositoryError),
}
