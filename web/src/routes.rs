//! Router configuration.

use crate::handlers::{auth, bookings, health, trains};
use crate::middleware::request_id;
use crate::state::{AppState, AuthStore, BookingStore};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Routes:
/// - `GET  /health`: liveness (no authentication)
/// - `POST /api/register`, `POST /api/login`: account plumbing
/// - `POST /api/trains`: admin train creation (`x-api-key`)
/// - `GET  /api/trains/availability`: advisory availability listing
/// - `POST /api/bookings`: seat reservation (bearer token)
/// - `GET  /api/bookings/:id`: booking lookup (bearer token, owner only)
pub fn build_router<S, A>(state: AppState<S, A>) -> Router
where
    S: BookingStore,
    A: AuthStore,
{
    let api_routes = Router::new()
        .route("/register", post(auth::register::<S, A>))
        .route("/login", post(auth::login::<S, A>))
        .route("/trains", post(trains::create_train::<S, A>))
        .route("/trains/availability", get(trains::list_availability::<S, A>))
        .route("/bookings", post(bookings::create_booking::<S, A>))
        .route("/bookings/:id", get(bookings::get_booking::<S, A>));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .layer(axum::middleware::from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
