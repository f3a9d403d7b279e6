//! Core domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a train run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainId(pub Uuid);

/// Unique identifier for an authenticated user (the requester).
///
/// The reservation core never interprets this beyond equality; it is
/// supplied by the authentication collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

/// Unique identifier for a booking (one consumed seat).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub Uuid);

macro_rules! impl_id {
    ($name:ident) => {
        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

impl_id!(TrainId);
impl_id!(UserId);
impl_id!(BookingId);

/// A capacity-bounded bookable train run.
///
/// Immutable after creation: no update or delete operations exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Train {
    /// Train identifier.
    pub id: TrainId,
    /// Display name (e.g. "Night Express").
    pub name: String,
    /// Origin station identifier (opaque, not interpreted by the core).
    pub origin: String,
    /// Destination station identifier (opaque).
    pub destination: String,
    /// Total seat capacity. Positive, fixed for the lifetime of the train.
    pub total_seats: u32,
}

/// Request to create a new train.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrain {
    /// Display name.
    pub name: String,
    /// Origin station identifier.
    pub origin: String,
    /// Destination station identifier.
    pub destination: String,
    /// Total seat capacity; must be positive.
    pub total_seats: u32,
}

impl NewTrain {
    /// Validate the request before any storage access.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidCapacity`] if `total_seats` is zero.
    pub const fn validate(&self) -> crate::Result<()> {
        if self.total_seats == 0 {
            return Err(crate::BookingError::InvalidCapacity);
        }
        Ok(())
    }
}

/// A committed, irrevocable consumption of one seat.
///
/// Bookings are fungible (count-based): no seat number is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Booking identifier.
    pub id: BookingId,
    /// The train this booking consumes a seat on.
    pub train_id: TrainId,
    /// The requester the seat belongs to.
    pub user_id: UserId,
    /// When the allocation committed.
    pub created_at: DateTime<Utc>,
}

/// Remaining capacity for one train, as reported by the
/// [`AvailabilityReader`](crate::AvailabilityReader).
///
/// Advisory only: transiently stale relative to in-flight reservations and
/// never consulted by the allocator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainAvailability {
    /// Train identifier.
    pub id: TrainId,
    /// Display name.
    pub name: String,
    /// Total seat capacity.
    pub total_seats: u32,
    /// Seats not yet booked at the time of the query.
    pub available_seats: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BookingError;

    #[test]
    fn new_train_rejects_zero_capacity() {
        let new = NewTrain {
            name: "Empty".into(),
            origin: "AAA".into(),
            destination: "BBB".into(),
            total_seats: 0,
        };
        assert_eq!(new.validate(), Err(BookingError::InvalidCapacity));
    }

    #[test]
    fn new_train_accepts_positive_capacity() {
        let new = NewTrain {
            name: "Express".into(),
            origin: "AAA".into(),
            destination: "BBB".into(),
            total_seats: 1,
        };
        assert!(new.validate().is_ok());
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(TrainId::new(), TrainId::new());
        assert_ne!(BookingId::new(), BookingId::new());
    }

    #[test]
    fn id_display_matches_inner_uuid() {
        let id = UserId::new();
        assert_eq!(id.to_string(), id.0.to_string());
    }
}
