use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// Role a principal acts under, resolved once at authentication time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Management,
}

/// An authenticated identity.
///
/// The identity provider is authoritative for the id, email, and display
/// name; the role is derived from the email pattern during sign-in/sign-up
/// and carried here so call sites never re-derive it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

impl Principal {
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    pub fn is_management(&self) -> bool {
        self.role == Role::Management
    }
}
