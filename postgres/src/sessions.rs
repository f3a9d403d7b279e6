//! Postgres implementations of the auth storage traits.

use chrono::{DateTime, Utc};
use railbook_auth::error::{AuthError, Result};
use railbook_auth::{Session, SessionStore, User, UserStore};
use railbook_core::UserId;
use uuid::Uuid;

use crate::store::PostgresStore;

/// Map any sqlx failure to the auth database error.
fn database(err: sqlx::Error) -> AuthError {
    AuthError::Database(err.to_string())
}

impl UserStore for PostgresStore {
    async fn create_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(user.id.0)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::EmailTaken;
                }
            }
            database(e)
        })?;
        Ok(())
    }

    async fn user_by_email(&self, email: &str) -> Result<User> {
        let row: Option<(Uuid, String, String, String, DateTime<Utc>)> = sqlx::query_as(
            r"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .map_err(database)?;

        row.map(into_user).ok_or(AuthError::UserNotFound)
    }

    async fn user_by_id(&self, id: UserId) -> Result<User> {
        let row: Option<(Uuid, String, String, String, DateTime<Utc>)> = sqlx::query_as(
            r"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.0)
        .fetch_optional(self.pool())
        .await
        .map_err(database)?;

        row.map(into_user).ok_or(AuthError::UserNotFound)
    }
}

fn into_user((id, name, email, password_hash, created_at): (Uuid, String, String, String, DateTime<Utc>)) -> User {
    User {
        id: UserId(id),
        name,
        email,
        password_hash,
        created_at,
    }
}

impl SessionStore for PostgresStore {
    async fn create_session(&self, session: &Session) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO sessions (token_digest, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(&session.token_digest)
        .bind(session.user_id.0)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(self.pool())
        .await
        .map_err(database)?;
        Ok(())
    }

    async fn session_by_digest(&self, digest: &str) -> Result<Session> {
        let row: Option<(String, Uuid, DateTime<Utc>, DateTime<Utc>)> = sqlx::query_as(
            r"
            SELECT token_digest, user_id, created_at, expires_at
            FROM sessions
            WHERE token_digest = $1
            ",
        )
        .bind(digest)
        .fetch_optional(self.pool())
        .await
        .map_err(database)?;

        let (token_digest, user_id, created_at, expires_at) =
            row.ok_or(AuthError::SessionNotFound)?;
        Ok(Session {
            token_digest,
            user_id: UserId(user_id),
            created_at,
            expires_at,
        })
    }
}
