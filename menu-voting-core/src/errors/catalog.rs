//! Error types for the menu catalog surface.
use menu_voting_repository::MenuRepositoryError;
use menu_voting_shared::types::MenuItemId;
use thiserror::Error;

/// Represents errors that can occur while managing the menu catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Permission denied")]
    PermissionDenied,

    #[error("Menu item not found: {0}")]
    ItemNotFound(MenuItemId),

    #[error("Repository error: {0}")]
    Repository(#[from] MenuRepositoryError),
}
