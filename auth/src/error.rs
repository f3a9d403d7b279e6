//! Error types for authentication operations.

use thiserror::Error;

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Error taxonomy for authentication and session handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Email or password did not match.
    ///
    /// Deliberately covers both "unknown email" and "wrong password" so
    /// login responses do not reveal which emails are registered.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The email is already registered.
    #[error("Email already exists")]
    EmailTaken,

    /// The email address is malformed.
    #[error("Invalid email address")]
    InvalidEmail,

    /// The password does not meet the minimum policy.
    #[error("Password must be at least {min} characters")]
    WeakPassword {
        /// Minimum accepted length.
        min: usize,
    },

    /// No user with the given id exists.
    #[error("User not found")]
    UserNotFound,

    /// The presented session token is unknown or malformed.
    #[error("Session not found")]
    SessionNotFound,

    /// The session exists but its expiry has passed.
    #[error("Session has expired")]
    SessionExpired,

    /// Password hashing or verification failed internally.
    #[error("Password hashing failed")]
    Hashing,

    /// The storage layer failed.
    #[error("Database error: {0}")]
    Database(String),
}

impl AuthError {
    /// Returns `true` if this error is due to invalid user input rather
    /// than a system fault.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials
                | Self::EmailTaken
                | Self::InvalidEmail
                | Self::WeakPassword { .. }
                | Self::SessionNotFound
                | Self::SessionExpired
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_classified() {
        assert!(AuthError::InvalidCredentials.is_user_error());
        assert!(AuthError::SessionExpired.is_user_error());
        assert!(!AuthError::Hashing.is_user_error());
        assert!(!AuthError::Database("down".into()).is_user_error());
    }
}
