//! Booking endpoints: the HTTP face of the seat allocator.

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::state::{AppState, AuthStore, BookingStore};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use railbook_core::{Booking, BookingError, BookingId, TrainId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to reserve one seat.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    /// The train to reserve a seat on
    pub train_id: TrainId,
}

/// A booking as returned to its owner.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    /// Booking id
    pub booking_id: BookingId,
    /// Train the seat is on
    pub train_id: TrainId,
    /// Owning user
    pub user_id: UserId,
    /// When the allocation committed
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            booking_id: b.id,
            train_id: b.train_id,
            user_id: b.user_id,
            created_at: b.created_at,
        }
    }
}

/// Reserve a seat for the authenticated user.
///
/// Delegates entirely to the allocator's atomic reserve; this handler adds
/// no capacity logic of its own.
///
/// # Endpoint
///
/// ```text
/// POST /api/bookings
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// - 401 without a valid session
/// - 404 if the train does not exist
/// - 409 if the train is sold out
/// - 500 on storage failure (the client may retry; see the allocator's
///   at-least-once note)
pub async fn create_booking<S, A>(
    State(state): State<AppState<S, A>>,
    user: CurrentUser,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError>
where
    S: BookingStore,
    A: AuthStore,
{
    match state.store.reserve(request.train_id, user.0).await {
        Ok(booking) => {
            metrics::counter!("railbook_reservations_granted_total").increment(1);
            Ok((StatusCode::CREATED, Json(booking.into())))
        }
        Err(err) => {
            if matches!(err, BookingError::SoldOut) {
                metrics::counter!("railbook_reservations_sold_out_total").increment(1);
            }
            Err(err.into())
        }
    }
}

/// Fetch one of the authenticated user's bookings.
///
/// # Endpoint
///
/// ```text
/// GET /api/bookings/{id}
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// - 401 without a valid session
/// - 404 if the booking does not exist or belongs to another user
pub async fn get_booking<S, A>(
    State(state): State<AppState<S, A>>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError>
where
    S: BookingStore,
    A: AuthStore,
{
    let booking = state.store.booking(BookingId(id), user.0).await?;
    Ok(Json(booking.into()))
}
