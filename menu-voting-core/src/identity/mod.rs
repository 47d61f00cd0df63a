//! The identity seam: the account-directory trait consumed by the rest of
//! the system, email validation, role derivation, and an in-memory provider
//! for tests and local runs.
mod email;
mod memory;
mod provider;

pub use email::{is_student_email, resolve_role, validate_email};
pub use memory::MemoryIdentityProvider;
pub use provider::IdentityProvider;
