//! This module defines the `IdentityProvider` trait, the seam to the external
//! account directory that authenticates principals and issues their stable
//! identifiers.
use crate::errors::IdentityError;
use menu_voting_shared::types::Principal;

/// A trait that defines the interface for the external account directory.
///
/// Implementors authenticate a principal by email and password and return a
/// `Principal` carrying the role resolved from the email pattern.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticates an existing account.
    ///
    /// # Arguments
    ///
    /// * `email` - The account email address.
    /// * `password` - The account password.
    ///
    /// # Returns
    ///
    /// The authenticated `Principal`, or an `IdentityError` describing why
    /// authentication failed (wrong credential, unknown user, throttled).
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, IdentityError>;

    /// Registers a new account and signs it in.
    ///
    /// # Arguments
    ///
    /// * `email` - The account email address; must be well-formed.
    /// * `password` - The chosen password; weak passwords are rejected.
    /// * `display_name` - Name shown in place of the email.
    ///
    /// # Returns
    ///
    /// The newly created `Principal`, or an `IdentityError` (invalid email,
    /// email in use, weak password).
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Principal, IdentityError>;

    /// Returns the currently signed-in principal, if any.
    async fn current_principal(&self) -> Result<Option<Principal>, IdentityError>;

    /// Ends the current session.
    async fn sign_out(&self) -> Result<(), IdentityError>;
}
