//! PostgreSQL implementations of the menu voting repository.
mod menu_repository;

pub use menu_repository::PostgresMenuRepository;
