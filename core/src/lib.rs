//! Domain model and storage traits for the Railbook reservation core.
//!
//! This crate defines WHAT the reservation system stores and guarantees;
//! the `railbook-postgres` crate defines HOW it is persisted. The split
//! keeps the capacity invariant testable at memory speed while the durable
//! implementation is validated against a real database.
//!
//! # The capacity invariant
//!
//! For every train `T`, the number of bookings referencing `T` never
//! exceeds `T.total_seats`, no matter how many reservation attempts race.
//! Every [`SeatAllocator`] implementation must uphold this by serializing
//! conflicting reservations through a per-train exclusive section; see the
//! trait documentation for the exact contract.
//!
//! # Components
//!
//! - [`TrainCatalog`]: capacity-bearing resources (trains), immutable after
//!   creation.
//! - [`BookingLedger`]: append-only record of granted seats, the source of
//!   truth for "how many are used".
//! - [`SeatAllocator`]: the concurrency-safe decision engine.
//! - [`AvailabilityReader`]: advisory read-only aggregation for listings.

pub mod error;
pub mod store;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod memory;

pub use error::{BookingError, Result};
pub use store::{AvailabilityReader, BookingLedger, SeatAllocator, TrainCatalog};
pub use types::{Booking, BookingId, NewTrain, Train, TrainAvailability, TrainId, UserId};
