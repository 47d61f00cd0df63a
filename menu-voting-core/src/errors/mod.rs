mod catalog;
mod finalization;
mod identity;
mod voting;

pub use catalog::CatalogError;
pub use finalization::FinalizationError;
pub use identity::IdentityError;
pub use voting::VotingError;
