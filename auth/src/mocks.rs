//! In-memory user and session stores for tests.

use crate::error::{AuthError, Result};
use crate::provider::{SessionStore, UserStore};
use crate::types::{Session, User};
use railbook_core::UserId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, User>,
    users_by_email: HashMap<String, UserId>,
    sessions: HashMap<String, Session>,
}

/// In-memory implementation of [`UserStore`] and [`SessionStore`].
#[derive(Clone, Default)]
pub struct MemoryAuthStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryAuthStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryAuthStore {
    async fn create_user(&self, user: &User) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.users_by_email.contains_key(&user.email) {
            return Err(AuthError::EmailTaken);
        }
        inner.users_by_email.insert(user.email.clone(), user.id);
        inner.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn user_by_email(&self, email: &str) -> Result<User> {
        let inner = self.inner.read().await;
        inner
            .users_by_email
            .get(email)
            .and_then(|id| inner.users.get(id))
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }

    async fn user_by_id(&self, id: UserId) -> Result<User> {
        self.inner
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }
}

impl SessionStore for MemoryAuthStore {
    async fn create_session(&self, session: &Session) -> Result<()> {
        self.inner
            .write()
            .await
            .sessions
            .insert(session.token_digest.clone(), session.clone());
        Ok(())
    }

    async fn session_by_digest(&self, digest: &str) -> Result<Session> {
        self.inner
            .read()
            .await
            .sessions
            .get(digest)
            .cloned()
            .ok_or(AuthError::SessionNotFound)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(email: &str) -> User {
        User {
            id: UserId::new(),
            name: "Test".into(),
            email: email.into(),
            password_hash: "$argon2id$stub".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_and_fetch_user() {
        let store = MemoryAuthStore::new();
        let u = user("a@example.com");
        store.create_user(&u).await.unwrap();
        assert_eq!(store.user_by_email("a@example.com").await.unwrap(), u);
        assert_eq!(store.user_by_id(u.id).await.unwrap(), u);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryAuthStore::new();
        store.create_user(&user("a@example.com")).await.unwrap();
        let err = store.create_user(&user("a@example.com")).await.unwrap_err();
        assert_eq!(err, AuthError::EmailTaken);
    }
}
