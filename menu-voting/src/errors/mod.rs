//! Error types for the menu voting service binary.
//! Consolidates errors from the repository and workflow layers with the
//! failures that can occur while wiring dependencies.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Repository error: {0}")]
    Repository(#[from] menu_voting_repository::MenuRepositoryError),
    #[error("Finalization error: {0}")]
    Finalization(#[from] menu_voting_core::FinalizationError),
}
