//! Train catalog and availability endpoints.

use crate::error::AppError;
use crate::extractors::AdminKey;
use crate::state::{AppState, AuthStore, BookingStore};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use railbook_core::{NewTrain, Train, TrainAvailability};
use serde::Deserialize;

/// Request to create a train.
#[derive(Debug, Deserialize)]
pub struct CreateTrainRequest {
    /// Display name
    pub name: String,
    /// Origin station identifier
    pub origin: String,
    /// Destination station identifier
    pub destination: String,
    /// Total seat capacity; must be positive
    pub total_seats: u32,
}

/// Create a new train (administrative).
///
/// The [`AdminKey`] extractor is the entire role check: possession of the
/// pre-shared key is the capability to create trains.
///
/// # Endpoint
///
/// ```text
/// POST /api/trains
/// x-api-key: <admin key>
/// ```
///
/// # Errors
///
/// - 401 on a missing or wrong `x-api-key`
/// - 422 on zero capacity
pub async fn create_train<S, A>(
    _admin: AdminKey,
    State(state): State<AppState<S, A>>,
    Json(request): Json<CreateTrainRequest>,
) -> Result<(StatusCode, Json<Train>), AppError>
where
    S: BookingStore,
    A: AuthStore,
{
    let train = state
        .store
        .create_train(NewTrain {
            name: request.name,
            origin: request.origin,
            destination: request.destination,
            total_seats: request.total_seats,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(train)))
}

/// Availability query parameters.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Origin station identifier
    pub origin: String,
    /// Destination station identifier
    pub destination: String,
}

/// List trains between two stations with remaining seats.
///
/// Advisory figures only: a seat shown here can be gone by the time a
/// booking request arrives. The allocator never consults this path.
///
/// # Endpoint
///
/// ```text
/// GET /api/trains/availability?origin=STN-A&destination=STN-B
/// ```
///
/// # Errors
///
/// - 500 on storage failure
pub async fn list_availability<S, A>(
    State(state): State<AppState<S, A>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<TrainAvailability>>, AppError>
where
    S: BookingStore,
    A: AuthStore,
{
    let listed = state
        .store
        .list_availability(&query.origin, &query.destination)
        .await?;
    Ok(Json(listed))
}
