//! In-memory identity provider for tests and local runs.
//!
//! Mirrors the behavior of the hosted account directory closely enough to
//! exercise the sign-in/sign-up branching: duplicate emails, weak passwords,
//! wrong credentials, and unknown users.
use crate::errors::IdentityError;
use crate::identity::{is_student_email, resolve_role, validate_email, IdentityProvider};
use menu_voting_shared::types::{Principal, Role};
use std::collections::HashMap;
use tokio::sync::Mutex;

const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    id: String,
    password: String,
    display_name: String,
}

#[derive(Default)]
struct Directory {
    accounts: HashMap<String, Account>,
    session: Option<Principal>,
    next_id: u64,
}

/// Mutex-guarded in-memory account directory.
#[derive(Default)]
pub struct MemoryIdentityProvider {
    directory: Mutex<Directory>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, IdentityError> {
        if !validate_email(email) {
            return Err(IdentityError::InvalidEmail(email.to_string()));
        }
        let mut directory = self.directory.lock().await;
        let account = directory
            .accounts
            .get(email)
            .ok_or(IdentityError::UserNotFound)?;
        if account.password != password {
            return Err(IdentityError::WrongCredential);
        }
        let principal = Principal {
            id: account.id.clone(),
            email: email.to_string(),
            display_name: account.display_name.clone(),
            role: resolve_role(email),
        };
        directory.session = Some(principal.clone());
        Ok(principal)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Principal, IdentityError> {
        if !validate_email(email) {
            return Err(IdentityError::InvalidEmail(email.to_string()));
        }
        // Students register with their institute roll-number mailbox only;
        // management mailboxes are recognized by `resolve_role` directly.
        let role = resolve_role(email);
        if role == Role::Student && !is_student_email(email) {
            return Err(IdentityError::InvalidEmail(email.to_string()));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(IdentityError::WeakPassword);
        }
        let mut directory = self.directory.lock().await;
        if directory.accounts.contains_key(email) {
            return Err(IdentityError::EmailInUse);
        }
        directory.next_id += 1;
        let id = format!("user-{}", directory.next_id);
        directory.accounts.insert(
            email.to_string(),
            Account {
                id: id.clone(),
                password: password.to_string(),
                display_name: display_name.to_string(),
            },
        );
        let principal = Principal {
            id,
            email: email.to_string(),
            display_name: display_name.to_string(),
            role,
        };
        directory.session = Some(principal.clone());
        Ok(principal)
    }

    async fn current_principal(&self) -> Result<Option<Principal>, IdentityError> {
        Ok(self.directory.lock().await.session.clone())
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.directory.lock().await.session = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_voting_shared::types::Role;

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let provider = MemoryIdentityProvider::new();

        let created = provider
            .sign_up("23cs105@psgitech.ac.in", "secret-pass", "Student 105")
            .await
            .unwrap();
        assert_eq!(created.role, Role::Student);

        provider.sign_out().await.unwrap();
        assert!(provider.current_principal().await.unwrap().is_none());

        let signed_in = provider
            .sign_in("23cs105@psgitech.ac.in", "secret-pass")
            .await
            .unwrap();
        assert_eq!(signed_in.id, created.id);
        assert_eq!(
            provider.current_principal().await.unwrap().unwrap().id,
            created.id
        );
    }

    #[tokio::test]
    async fn test_sign_up_rejections() {
        let provider = MemoryIdentityProvider::new();

        assert_eq!(
            provider.sign_up("bad-email", "secret-pass", "X").await.unwrap_err(),
            IdentityError::InvalidEmail("bad-email".to_string())
        );
        assert_eq!(
            provider
                .sign_up("23cs105@psgitech.ac.in", "short", "X")
                .await
                .unwrap_err(),
            IdentityError::WeakPassword
        );

        provider
            .sign_up("23cs105@psgitech.ac.in", "secret-pass", "X")
            .await
            .unwrap();
        assert_eq!(
            provider
                .sign_up("23cs105@psgitech.ac.in", "other-pass", "Y")
                .await
                .unwrap_err(),
            IdentityError::EmailInUse
        );
    }

    #[tokio::test]
    async fn test_sign_in_rejections() {
        let provider = MemoryIdentityProvider::new();
        provider
            .sign_up("23cs105@psgitech.ac.in", "secret-pass", "X")
            .await
            .unwrap();

        assert_eq!(
            provider
                .sign_in("missing@psgitech.ac.in", "secret-pass")
                .await
                .unwrap_err(),
            IdentityError::UserNotFound
        );
        assert_eq!(
            provider
                .sign_in("23cs105@psgitech.ac.in", "wrong-pass")
                .await
                .unwrap_err(),
            IdentityError::WrongCredential
        );
    }

    #[tokio::test]
    async fn test_sign_up_requires_roll_number_mailbox() {
        let provider = MemoryIdentityProvider::new();

        assert_eq!(
            provider
                .sign_up("someone@example.com", "secret-pass", "X")
                .await
                .unwrap_err(),
            IdentityError::InvalidEmail("someone@example.com".to_string())
        );
        assert_eq!(
            provider
                .sign_up("19cs105@psgitech.ac.in", "secret-pass", "X")
                .await
                .unwrap_err(),
            IdentityError::InvalidEmail("19cs105@psgitech.ac.in".to_string())
        );

        let student = provider
            .sign_up("25ee7@psgitech.ac.in", "secret-pass", "Student 7")
            .await
            .unwrap();
        assert_eq!(student.role, Role::Student);
    }

    #[tokio::test]
    async fn test_management_role_from_email() {
        let provider = MemoryIdentityProvider::new();
        let principal = provider
            .sign_up("management@psgitech.ac.in", "secret-pass", "Mess Management")
            .await
            .unwrap();
        assert_eq!(principal.role, Role::Management);
    }
}
