//! Application state for Axum handlers.

use railbook_auth::{SessionStore, UserStore};
use railbook_core::{AvailabilityReader, BookingLedger, SeatAllocator, TrainCatalog};
use std::env;

/// Everything a booking-side store must provide to back the HTTP surface.
///
/// Blanket-implemented; `PostgresStore` satisfies it in production and the
/// in-memory store in tests.
pub trait BookingStore:
    TrainCatalog
    + BookingLedger
    + SeatAllocator
    + AvailabilityReader
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> BookingStore for T where
    T: TrainCatalog
        + BookingLedger
        + SeatAllocator
        + AvailabilityReader
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Everything an auth-side store must provide.
pub trait AuthStore: UserStore + SessionStore + Clone + Send + Sync + 'static {}

impl<T> AuthStore for T where T: UserStore + SessionStore + Clone + Send + Sync + 'static {}

/// Web-layer configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Pre-shared key gating train creation (`ADMIN_API_KEY`).
    pub admin_api_key: String,
    /// Session lifetime (`SESSION_TTL_HOURS`, default 24).
    pub session_ttl: chrono::Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `ADMIN_API_KEY` has no usable default: if unset it becomes the
    /// empty string, which [`crate::AdminKey`] never accepts.
    #[must_use]
    pub fn from_env() -> Self {
        let ttl_hours: i64 = env::var("SESSION_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);
        Self {
            admin_api_key: env::var("ADMIN_API_KEY").unwrap_or_default(),
            session_ttl: chrono::Duration::hours(ttl_hours),
        }
    }
}

/// Application state shared across all HTTP handlers.
///
/// Generic over the two store halves so production (Postgres for both) and
/// tests (in-memory for both) use the same handlers.
#[derive(Debug)]
pub struct AppState<S, A> {
    /// Booking-side store: catalog, ledger, allocator, availability.
    pub store: S,
    /// Auth-side store: users and sessions.
    pub auth: A,
    /// Web-layer configuration.
    pub config: AppConfig,
}

impl<S: Clone, A: Clone> Clone for AppState<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            auth: self.auth.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S, A> AppState<S, A> {
    /// Create a new application state.
    pub const fn new(store: S, auth: A, config: AppConfig) -> Self {
        Self {
            store,
            auth,
            config,
        }
    }
}
