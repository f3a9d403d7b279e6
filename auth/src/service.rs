//! Registration, login and session validation flows.
//!
//! Free functions generic over the storage traits so the same logic runs
//! against Postgres in production and the in-memory mocks in tests.

use crate::error::{AuthError, Result};
use crate::provider::{SessionStore, UserStore};
use crate::types::{NewUser, Session, User};
use crate::{password, token};
use chrono::{Duration, Utc};
use railbook_core::UserId;
use serde::Serialize;

/// A freshly issued bearer token.
///
/// The raw token is handed out exactly once; the store only keeps its
/// digest.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    /// The raw bearer token for the `Authorization` header.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: chrono::DateTime<Utc>,
}

/// Register a new user account.
///
/// Validates input, hashes the password, and inserts the user.
///
/// # Errors
///
/// Returns [`AuthError::InvalidEmail`] or [`AuthError::WeakPassword`] on
/// bad input (no side effect), [`AuthError::EmailTaken`] on a duplicate
/// email, or `Database` / `Hashing` on system failure.
pub async fn register<S: UserStore>(store: &S, new: NewUser) -> Result<User> {
    new.validate()?;
    let user = User {
        id: UserId::new(),
        name: new.name,
        email: new.email,
        password_hash: password::hash_password(&new.password)?,
        created_at: Utc::now(),
    };
    store.create_user(&user).await?;
    tracing::info!(user_id = %user.id, "user registered");
    Ok(user)
}

/// Authenticate credentials and mint a session token.
///
/// Unknown email and wrong password both surface as
/// [`AuthError::InvalidCredentials`] so responses do not reveal which
/// emails exist.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] on a failed login, or
/// `Database` / `Hashing` on system failure.
pub async fn login<S>(store: &S, email: &str, password: &str, ttl: Duration) -> Result<IssuedToken>
where
    S: UserStore + SessionStore,
{
    let user = match store.user_by_email(email).await {
        Ok(user) => user,
        Err(AuthError::UserNotFound) => return Err(AuthError::InvalidCredentials),
        Err(other) => return Err(other),
    };
    password::verify_password(password, &user.password_hash)?;

    let raw = token::generate();
    let now = Utc::now();
    let session = Session {
        token_digest: token::digest(&raw),
        user_id: user.id,
        created_at: now,
        expires_at: now + ttl,
    };
    store.create_session(&session).await?;
    tracing::info!(user_id = %user.id, expires_at = %session.expires_at, "session issued");

    Ok(IssuedToken {
        token: raw,
        expires_at: session.expires_at,
    })
}

/// Resolve a presented bearer token to a verified [`UserId`].
///
/// # Errors
///
/// Returns [`AuthError::SessionNotFound`] for an unknown token and
/// [`AuthError::SessionExpired`] for a stale one.
pub async fn authenticate<S: SessionStore>(store: &S, bearer: &str) -> Result<UserId> {
    let session = store.session_by_digest(&token::digest(bearer)).await?;
    if session.is_expired(Utc::now()) {
        return Err(AuthError::SessionExpired);
    }
    Ok(session.user_id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mocks::MemoryAuthStore;

    fn alice() -> NewUser {
        NewUser {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password: "correct horse battery staple".into(),
        }
    }

    #[tokio::test]
    async fn register_login_authenticate_roundtrip() {
        let store = MemoryAuthStore::new();
        let user = register(&store, alice()).await.unwrap();

        let issued = login(
            &store,
            "alice@example.com",
            "correct horse battery staple",
            Duration::hours(1),
        )
        .await
        .unwrap();

        let verified = authenticate(&store, &issued.token).await.unwrap();
        assert_eq!(verified, user.id);
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let store = MemoryAuthStore::new();
        register(&store, alice()).await.unwrap();
        let err = register(&store, alice()).await.unwrap_err();
        assert_eq!(err, AuthError::EmailTaken);
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_look_identical() {
        let store = MemoryAuthStore::new();
        register(&store, alice()).await.unwrap();

        let unknown = login(&store, "bob@example.com", "whatever-pass", Duration::hours(1))
            .await
            .unwrap_err();
        let wrong = login(&store, "alice@example.com", "wrong password", Duration::hours(1))
            .await
            .unwrap_err();
        assert_eq!(unknown, AuthError::InvalidCredentials);
        assert_eq!(wrong, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn expired_session_rejected() {
        let store = MemoryAuthStore::new();
        register(&store, alice()).await.unwrap();
        let issued = login(
            &store,
            "alice@example.com",
            "correct horse battery staple",
            Duration::seconds(-1),
        )
        .await
        .unwrap();

        let err = authenticate(&store, &issued.token).await.unwrap_err();
        assert_eq!(err, AuthError::SessionExpired);
    }

    #[tokio::test]
    async fn random_token_rejected() {
        let store = MemoryAuthStore::new();
        let err = authenticate(&store, "not-a-real-token").await.unwrap_err();
        assert_eq!(err, AuthError::SessionNotFound);
    }
}
