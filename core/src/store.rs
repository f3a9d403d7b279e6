//! Storage traits for the reservation core.
//!
//! These traits abstract over durable storage so the HTTP layer can be
//! exercised against the in-memory store while production runs on
//! `railbook-postgres`. They mirror the component split of the system:
//! catalog, ledger, allocator, availability reporter.

use crate::error::Result;
use crate::types::{Booking, BookingId, NewTrain, Train, TrainAvailability, TrainId, UserId};

/// Catalog of capacity-bearing trains.
///
/// Trains are immutable after creation and never deleted; the catalog has
/// no update or delete operations.
pub trait TrainCatalog: Send + Sync {
    /// Create a new train.
    ///
    /// Implementations must call [`NewTrain::validate`] before touching
    /// storage so a non-positive capacity is rejected with no side effect.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidCapacity`](crate::BookingError::InvalidCapacity)
    /// for a zero capacity, or `Storage` if the write fails.
    fn create_train(&self, new: NewTrain) -> impl std::future::Future<Output = Result<Train>> + Send;

    /// Fetch a train by id.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::TrainNotFound`](crate::BookingError::TrainNotFound)
    /// if no such train exists.
    fn train(&self, id: TrainId) -> impl std::future::Future<Output = Result<Train>> + Send;
}

/// Append-only ledger of granted bookings.
///
/// The ledger is the source of truth for "how many seats are used". It
/// carries no capacity logic itself: enforcement lives in
/// [`SeatAllocator::reserve`], which is the only component allowed to write
/// ledger entries.
pub trait BookingLedger: Send + Sync {
    /// Count committed bookings for a train.
    ///
    /// Advisory outside the allocator: the durable implementation re-runs
    /// this count inside the reservation transaction, where the per-train
    /// lock guarantees it observes every prior commit.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the query fails.
    fn count_for(&self, train_id: TrainId) -> impl std::future::Future<Output = Result<u32>> + Send;

    /// Fetch a booking, enforcing ownership.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::BookingNotFound`](crate::BookingError::BookingNotFound)
    /// if the booking does not exist **or** belongs to a different user, so
    /// other users' records never leak.
    fn booking(
        &self,
        id: BookingId,
        requester: UserId,
    ) -> impl std::future::Future<Output = Result<Booking>> + Send;
}

/// The concurrency-safe allocation engine.
pub trait SeatAllocator: Send + Sync {
    /// Atomically reserve one seat on `train_id` for `requester`.
    ///
    /// The operation is serializable with respect to every other concurrent
    /// `reserve` on the same train: implementations serialize through a
    /// per-train exclusive section (a `SELECT ... FOR UPDATE` row lock in
    /// Postgres, a per-train mutex in memory), re-read the committed
    /// booking count inside that section, and only then append. Reserves on
    /// different trains must not contend.
    ///
    /// Admission order is lock-acquisition order. Dropping the returned
    /// future before completion rolls the scope back, leaving no partial
    /// allocation.
    ///
    /// Retry semantics are at-least-once: after a `Storage` failure the
    /// caller may retry the whole call, but a failure between commit and
    /// acknowledgment can already have consumed a seat, so a retry can
    /// allocate twice for the same requester.
    ///
    /// # Errors
    ///
    /// - [`BookingError::TrainNotFound`](crate::BookingError::TrainNotFound)
    ///   if the train does not exist; no booking is written.
    /// - [`BookingError::SoldOut`](crate::BookingError::SoldOut) if the
    ///   committed count has reached `total_seats`; no booking is written.
    /// - [`BookingError::Storage`](crate::BookingError::Storage) on lock
    ///   timeout, deadlock or commit failure; the scope was rolled back.
    fn reserve(
        &self,
        train_id: TrainId,
        requester: UserId,
    ) -> impl std::future::Future<Output = Result<Booking>> + Send;
}

/// Read-only remaining-capacity aggregation for listings.
pub trait AvailabilityReader: Send + Sync {
    /// List trains between two stations with their remaining seats.
    ///
    /// Takes no locks and may be transiently stale relative to in-flight
    /// reservations; callers must not treat the figures as a reservation
    /// guarantee.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the query fails.
    fn list_availability(
        &self,
        origin: &str,
        destination: &str,
    ) -> impl std::future::Future<Output = Result<Vec<TrainAvailability>>> + Send;
}
