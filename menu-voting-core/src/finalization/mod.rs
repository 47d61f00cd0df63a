//! The weekly menu finalization workflow: the Open/Finalized state machine,
//! winner computation, and the student and management read paths.
mod service;

pub use service::{FinalizationService, FinalizeOutcome, RankedItem, ResetOutcome, StudentMenu};
