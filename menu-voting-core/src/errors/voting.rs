//! Error types for the voting protocol.
//! Defines the typed failures CastVote, RevokeVote, and Tally can surface to
//! a caller. Soft outcomes such as "already voted" are not errors.
use menu_voting_repository::MenuRepositoryError;
use menu_voting_shared::types::MenuItemId;
use thiserror::Error;

/// Represents errors that can occur within the voting protocol.
#[derive(Debug, Error)]
pub enum VotingError {
    /// The principal is not allowed to perform the operation; the caller
    /// should prompt re-authentication rather than silently fail.
    #[error("Permission denied")]
    PermissionDenied,

    /// The weekly menu is finalized; voting is closed until reset.
    #[error("Voting is closed for the week")]
    VotingClosed,

    #[error("Menu item not found: {0}")]
    ItemNotFound(MenuItemId),

    /// The store could not complete the atomic vote transaction. The whole
    /// call is safe to retry: a re-run either finds the vote record present
    /// and reports already-voted, or completes normally.
    #[error("Transaction aborted: {0}")]
    TransactionAborted(String),

    #[error("Repository error: {0}")]
    Repository(#[from] MenuRepositoryError),
}
