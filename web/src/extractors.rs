//! Custom Axum extractors for authentication.
//!
//! - [`CurrentUser`]: validates the `Authorization: Bearer <token>` session
//!   and yields the verified requester id.
//! - [`AdminKey`]: constant-time check of the `x-api-key` header against
//!   the configured admin key; the capability predicate for the train
//!   catalog's create boundary.

use crate::error::AppError;
use crate::state::{AppState, AuthStore, BookingStore};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use railbook_core::UserId;

/// Bearer token extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| {
                AppError::unauthorized("Invalid authorization format. Expected 'Bearer <token>'")
            })?
            .to_string();

        if token.is_empty() {
            return Err(AppError::unauthorized("Empty bearer token"));
        }

        Ok(Self(token))
    }
}

/// The authenticated requester.
///
/// Use as a handler parameter to require a valid, unexpired session.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

#[async_trait]
impl<S, A> FromRequestParts<AppState<S, A>> for CurrentUser
where
    S: BookingStore,
    A: AuthStore,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S, A>,
    ) -> Result<Self, Self::Rejection> {
        let bearer = BearerToken::from_request_parts(parts, state).await?;
        let user_id = railbook_auth::authenticate(&state.auth, &bearer.0).await?;
        Ok(Self(user_id))
    }
}

/// Proof that the request carried the admin API key.
///
/// An empty configured key never matches, so an unconfigured deployment
/// rejects all administrative requests instead of accepting empty headers.
#[derive(Debug, Clone, Copy)]
pub struct AdminKey;

#[async_trait]
impl<S, A> FromRequestParts<AppState<S, A>> for AdminKey
where
    S: BookingStore,
    A: AuthStore,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S, A>,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get("x-api-key")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing x-api-key header"))?;

        let configured = &state.config.admin_api_key;
        if configured.is_empty() || !railbook_auth::token::verify_api_key(presented, configured) {
            return Err(AppError::unauthorized("Unauthorized"));
        }
        Ok(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn bearer_token_extracted() {
        let req = Request::builder()
            .header("authorization", "Bearer abc123")
            .body(())
            .unwrap();
        let (mut parts, ()) = req.into_parts();
        let token = BearerToken::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(token.0, "abc123");
    }

    #[tokio::test]
    async fn missing_header_rejected() {
        let req = Request::builder().body(()).unwrap();
        let (mut parts, ()) = req.into_parts();
        let err = BearerToken::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_bearer_scheme_rejected() {
        let req = Request::builder()
            .header("authorization", "Basic dXNlcjpwYXNz")
            .body(())
            .unwrap();
        let (mut parts, ()) = req.into_parts();
        assert!(BearerToken::from_request_parts(&mut parts, &())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn empty_bearer_rejected() {
        let req = Request::builder()
            .header("authorization", "Bearer ")
            .body(())
            .unwrap();
        let (mut parts, ()) = req.into_parts();
        assert!(BearerToken::from_request_parts(&mut parts, &())
            .await
            .is_err());
    }
}
