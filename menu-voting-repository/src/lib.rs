//! # Menu Voting Repository
//! This crate provides traits and implementations for interacting with the
//! menu voting data store. It includes definitions for errors, interfaces,
//! and concrete implementations for PostgreSQL and in-memory storage.
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use errors::MenuRepositoryError;
pub use interfaces::{MenuRepository, StateTransition, VoteDelete, VoteInsert};
pub use memory::MemoryMenuRepository;
pub use postgres::PostgresMenuRepository;
