//! Error types for the identity seam.
//! Mirrors the error kinds the account directory reports during
//! sign-in and sign-up flows.
use thiserror::Error;

/// Represents errors reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Wrong credentials")]
    WrongCredential,

    #[error("User not found")]
    UserNotFound,

    #[error("Too many attempts, try again later")]
    TooManyRequests,

    #[error("Email already in use")]
    EmailInUse,

    #[error("Password is too weak")]
    WeakPassword,

    #[error("Identity provider error: {0}")]
    Provider(String),
}
