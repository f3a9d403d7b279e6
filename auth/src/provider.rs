//! Storage traits for users and sessions.
//!
//! Implemented durably by `railbook-postgres` and in memory by
//! [`crate::mocks::MemoryAuthStore`].

use crate::error::Result;
use crate::types::{Session, User};
use railbook_core::UserId;

/// Persistent storage for user accounts.
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailTaken`](crate::AuthError::EmailTaken) if
    /// the email is already registered, or `Database` on storage failure.
    fn create_user(&self, user: &User) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Look a user up by email.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`](crate::AuthError::UserNotFound)
    /// if no account uses that email.
    fn user_by_email(&self, email: &str)
        -> impl std::future::Future<Output = Result<User>> + Send;

    /// Look a user up by id.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`](crate::AuthError::UserNotFound)
    /// if the id is unknown.
    fn user_by_id(&self, id: UserId) -> impl std::future::Future<Output = Result<User>> + Send;
}

/// Persistent storage for sessions, keyed by token digest.
pub trait SessionStore: Send + Sync {
    /// Insert a new session.
    ///
    /// # Errors
    ///
    /// Returns `Database` on storage failure.
    fn create_session(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Fetch a session by the digest of the presented token.
    ///
    /// Expiry is checked by the caller
    /// ([`crate::service::authenticate`]), not here.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionNotFound`](crate::AuthError::SessionNotFound)
    /// if no session matches the digest.
    fn session_by_digest(
        &self,
        digest: &str,
    ) -> impl std::future::Future<Output = Result<Session>> + Send;
}
