//! Error types for the menu voting repository.
//! Consolidates and re-exports error types related to menu store operations.
mod menu;

pub use menu::MenuRepositoryError;
