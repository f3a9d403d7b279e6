//! User and session types.

use crate::error::{AuthError, Result};
use chrono::{DateTime, Utc};
use railbook_core::UserId;
use serde::{Deserialize, Serialize};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// A registered user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier, handed to the reservation core as the requester.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Argon2 password hash in PHC string format. Never serialized out.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Registration request, validated before any storage access.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password; hashed immediately, never stored.
    pub password: String,
}

impl NewUser {
    /// Validate email format and password policy.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`] or [`AuthError::WeakPassword`].
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }
        Ok(())
    }
}

/// A server-side session record.
///
/// Only the SHA-256 digest of the bearer token is stored; the raw token is
/// returned to the client exactly once at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Digest of the bearer token (see [`crate::token::digest`]).
    pub token_digest: String,
    /// The user this session authenticates.
    pub user_id: UserId,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Returns `true` if the session expiry has passed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Validate email address format.
///
/// Basic structural checks only: exactly one `@`, non-empty local and
/// domain parts, total length between 3 and 255 characters.
///
/// # Errors
///
/// Returns [`AuthError::InvalidEmail`] if any check fails.
pub fn validate_email(email: &str) -> Result<()> {
    let len = email.chars().count();
    if !(3..=255).contains(&len) {
        return Err(AuthError::InvalidEmail);
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AuthError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a@b").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert_eq!(validate_email(""), Err(AuthError::InvalidEmail));
        assert_eq!(validate_email("no-at-sign"), Err(AuthError::InvalidEmail));
        assert_eq!(validate_email("@domain"), Err(AuthError::InvalidEmail));
        assert_eq!(validate_email("local@"), Err(AuthError::InvalidEmail));
        assert_eq!(validate_email("two@@ats"), Err(AuthError::InvalidEmail));
    }

    #[test]
    fn new_user_password_policy() {
        let user = NewUser {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password: "short".into(),
        };
        assert_eq!(
            user.validate(),
            Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_LEN
            })
        );
    }

    #[test]
    fn session_expiry() {
        let now = Utc::now();
        let session = Session {
            token_digest: "digest".into(),
            user_id: UserId::new(),
            created_at: now,
            expires_at: now + chrono::Duration::hours(1),
        };
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + chrono::Duration::hours(2)));
    }
}
