//! Axum HTTP surface for Railbook.
//!
//! Thin imperative shell over the storage traits: handlers extract and
//! validate request data, call one store operation, and map the outcome to
//! an HTTP response. All capacity logic lives below the traits; nothing in
//! this crate gates a reservation on anything it read outside the
//! allocator's transaction.
//!
//! # Request flow
//!
//! 1. Request arrives; the request-id layer tags it and opens a span.
//! 2. Extractors authenticate ([`CurrentUser`] for riders, [`AdminKey`]
//!    for the catalog's create boundary).
//! 3. The handler calls the store and converts domain errors through
//!    [`AppError`] into `{code, message}` JSON with a distinct status per
//!    error kind.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use extractors::{AdminKey, CurrentUser};
pub use routes::build_router;
pub use state::{AppConfig, AppState, AuthStore, BookingStore};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
