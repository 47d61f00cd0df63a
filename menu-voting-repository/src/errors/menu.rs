//! Error types for the menu repository.
//! Defines specific errors that can occur during store operations on menu
//! items, vote records, and the weekly menu state.
use menu_voting_shared::types::MenuItemId;
use thiserror::Error;

/// Represents errors that can occur within the menu repository.
///
/// This enum consolidates various error conditions specific to store
/// interactions, such as SQLx errors during database operations.
#[derive(Debug, Error)]
pub enum MenuRepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Menu item not found: {0}")]
    ItemNotFound(MenuItemId),

    #[error("Transaction aborted: {0}")]
    TransactionAborted(String),

    #[error("Invalid column value: {0}")]
    InvalidValue(String),
}
