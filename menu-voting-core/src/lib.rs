//! # Menu Voting Core
//!
//! This crate implements the voting protocol and the weekly menu finalization
//! workflow on top of the repository seam, together with the menu catalog
//! surface for management, the identity-provider seam, and the Monday
//! auto-finalize scheduler.
pub mod catalog;
pub mod errors;
pub mod finalization;
pub mod identity;
pub mod scheduler;
pub mod voting;

pub use catalog::MenuCatalogService;
pub use errors::{CatalogError, FinalizationError, IdentityError, VotingError};
pub use finalization::{
    FinalizationService, FinalizeOutcome, RankedItem, ResetOutcome, StudentMenu,
};
pub use identity::{resolve_role, validate_email, IdentityProvider, MemoryIdentityProvider};
pub use scheduler::FinalizeScheduler;
pub use voting::{CastVoteOutcome, RevokeVoteOutcome, VotingService};
