//! Email-format validation and role derivation.
//!
//! The role is derived from the email pattern exactly once, at sign-in or
//! sign-up; the resulting `Role` travels on the `Principal` so call sites
//! never re-match strings.
use lazy_static::lazy_static;
use menu_voting_shared::types::Role;
use regex::Regex;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    // Student accounts are institute roll-number mailboxes, e.g.
    // 23cs105@psgitech.ac.in for a 2023 admission.
    static ref STUDENT_RE: Regex =
        Regex::new(r"(?i)^(2[0-5])[a-z]+[0-9]{1,3}@psgitech\.ac\.in$").unwrap();
    static ref MANAGEMENT_RE: Regex =
        Regex::new(r"(?i)^(management|mess\.management)@psgitech\.ac\.in$").unwrap();
}

/// Checks the basic shape of an email address before any provider call.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Derives the role a principal acts under from their email address.
///
/// Management mailboxes get `Role::Management`; everything else, including
/// the roll-number student pattern, is a student.
pub fn resolve_role(email: &str) -> Role {
    if MANAGEMENT_RE.is_match(email) {
        Role::Management
    } else {
        Role::Student
    }
}

/// Returns whether `email` matches the institute student mailbox pattern.
pub fn is_student_email(email: &str) -> bool {
    STUDENT_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_shapes() {
        assert!(validate_email("23cs105@psgitech.ac.in"));
        assert!(validate_email("management@psgitech.ac.in"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("spaces in@local.part"));
        assert!(!validate_email("missing@tld"));
    }

    #[test]
    fn test_role_resolution() {
        assert_eq!(resolve_role("management@psgitech.ac.in"), Role::Management);
        assert_eq!(resolve_role("MESS.MANAGEMENT@psgitech.ac.in"), Role::Management);
        assert_eq!(resolve_role("23cs105@psgitech.ac.in"), Role::Student);
        assert_eq!(resolve_role("someone@example.com"), Role::Student);
    }

    #[test]
    fn test_student_mailbox_pattern() {
        assert!(is_student_email("23cs105@psgitech.ac.in"));
        assert!(is_student_email("25ee7@psgitech.ac.in"));
        assert!(!is_student_email("19cs105@psgitech.ac.in"));
        assert!(!is_student_email("management@psgitech.ac.in"));
    }
}
