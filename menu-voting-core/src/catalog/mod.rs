//! The menu catalog surface: management proposes, edits, and deletes dishes,
//! and can seed an empty catalog.
mod service;

pub use service::MenuCatalogService;
