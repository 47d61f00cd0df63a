//! The voting protocol: at most one vote per (principal, item), atomic
//! counter updates, and tally reads for management.
mod service;

pub use service::{CastVoteOutcome, RevokeVoteOutcome, VotingService};
