//! Registration and login endpoints.

use crate::error::AppError;
use crate::state::{AppState, AuthStore, BookingStore};
use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use railbook_auth::NewUser;
use railbook_core::UserId;
use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// Plaintext password; hashed before storage
    pub password: String,
}

/// Response after successful registration.
///
/// Never includes the password hash.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// New user id
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

/// Register a new user.
///
/// # Endpoint
///
/// ```text
/// POST /api/register
/// ```
///
/// # Errors
///
/// - 422 on malformed email or weak password
/// - 409 if the email is already registered
pub async fn register<S, A>(
    State(state): State<AppState<S, A>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError>
where
    S: BookingStore,
    A: AuthStore,
{
    let user = railbook_auth::register(
        &state.auth,
        NewUser {
            name: request.name,
            email: request.email,
            password: request.password,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            name: user.name,
            email: user.email,
        }),
    ))
}

/// Request to log in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Response carrying the bearer token.
///
/// The token is returned exactly once; only its digest is stored.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Opaque bearer token for the `Authorization` header
    pub token: String,
    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Authenticate and mint a session token.
///
/// # Endpoint
///
/// ```text
/// POST /api/login
/// ```
///
/// # Errors
///
/// - 401 on unknown email or wrong password (indistinguishable)
pub async fn login<S, A>(
    State(state): State<AppState<S, A>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError>
where
    S: BookingStore,
    A: AuthStore,
{
    let issued = railbook_auth::login(
        &state.auth,
        &request.email,
        &request.password,
        state.config.session_ttl,
    )
    .await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}
