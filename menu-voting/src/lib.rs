//! Menu Voting Service
//!
//! This library provides the service wiring for the menu voting system:
//! configuration management, error handling, and dependency injection.

pub mod config;
pub mod errors;

pub use config::Dependencies;
pub use errors::ServiceError;
