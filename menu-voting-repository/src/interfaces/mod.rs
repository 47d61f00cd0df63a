//! This module defines and re-exports the interfaces for the menu repository.
//! It serves as a central point for accessing traits related to data interaction.
mod menu;

pub use menu::{MenuRepository, StateTransition, VoteDelete, VoteInsert};
