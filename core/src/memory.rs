//! In-memory store for tests.
//!
//! Implements every storage trait with the same contract as the durable
//! store so the HTTP layer can be tested at memory speed. Reservations on
//! the same train serialize through a per-train async mutex (the in-memory
//! equivalent of the Postgres row lock); reservations on different trains
//! proceed in parallel.
//!
//! Not intended for production: state does not survive a restart and is not
//! shared between instances.

use crate::error::{BookingError, Result};
use crate::store::{AvailabilityReader, BookingLedger, SeatAllocator, TrainCatalog};
use crate::types::{Booking, BookingId, NewTrain, Train, TrainAvailability, TrainId, UserId};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// One train plus its booking ledger.
///
/// The mutex around the ledger is the per-train serialization point: a
/// reservation holds it across the count-compare-append sequence.
struct TrainSlot {
    train: Train,
    bookings: Mutex<Vec<Booking>>,
}

/// In-memory implementation of the reservation store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    trains: Arc<RwLock<HashMap<TrainId, Arc<TrainSlot>>>>,
    bookings_by_id: Arc<RwLock<HashMap<BookingId, Booking>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, id: TrainId) -> Result<Arc<TrainSlot>> {
        self.trains
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(BookingError::TrainNotFound)
    }
}

impl TrainCatalog for MemoryStore {
    async fn create_train(&self, new: NewTrain) -> Result<Train> {
        new.validate()?;
        let train = Train {
            id: TrainId::new(),
            name: new.name,
            origin: new.origin,
            destination: new.destination,
            total_seats: new.total_seats,
        };
        let slot = Arc::new(TrainSlot {
            train: train.clone(),
            bookings: Mutex::new(Vec::new()),
        });
        self.trains.write().await.insert(train.id, slot);
        Ok(train)
    }

    async fn train(&self, id: TrainId) -> Result<Train> {
        Ok(self.slot(id).await?.train.clone())
    }
}

impl BookingLedger for MemoryStore {
    async fn count_for(&self, train_id: TrainId) -> Result<u32> {
        let slot = self.slot(train_id).await?;
        let count = slot.bookings.lock().await.len();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn booking(&self, id: BookingId, requester: UserId) -> Result<Booking> {
        match self.bookings_by_id.read().await.get(&id) {
            Some(b) if b.user_id == requester => Ok(b.clone()),
            // Unknown id and foreign ownership are indistinguishable.
            _ => Err(BookingError::BookingNotFound),
        }
    }
}

impl SeatAllocator for MemoryStore {
    async fn reserve(&self, train_id: TrainId, requester: UserId) -> Result<Booking> {
        let slot = self.slot(train_id).await?;

        // Per-train exclusive section: held across count, compare, append.
        let mut ledger = slot.bookings.lock().await;
        if ledger.len() >= slot.train.total_seats as usize {
            return Err(BookingError::SoldOut);
        }

        let booking = Booking {
            id: BookingId::new(),
            train_id,
            user_id: requester,
            created_at: Utc::now(),
        };
        ledger.push(booking.clone());
        self.bookings_by_id
            .write()
            .await
            .insert(booking.id, booking.clone());
        Ok(booking)
    }
}

impl AvailabilityReader for MemoryStore {
    async fn list_availability(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<TrainAvailability>> {
        let slots: Vec<Arc<TrainSlot>> = self
            .trains
            .read()
            .await
            .values()
            .filter(|s| s.train.origin == origin && s.train.destination == destination)
            .cloned()
            .collect();

        let mut out = Vec::with_capacity(slots.len());
        for slot in slots {
            let booked = u32::try_from(slot.bookings.lock().await.len()).unwrap_or(u32::MAX);
            out.push(TrainAvailability {
                id: slot.train.id,
                name: slot.train.name.clone(),
                total_seats: slot.train.total_seats,
                available_seats: slot.train.total_seats.saturating_sub(booked),
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn new_train(seats: u32) -> NewTrain {
        NewTrain {
            name: "Express".into(),
            origin: "AAA".into(),
            destination: "BBB".into(),
            total_seats: seats,
        }
    }

    #[tokio::test]
    async fn create_rejects_zero_capacity() {
        let store = MemoryStore::new();
        let err = store.create_train(new_train(0)).await.unwrap_err();
        assert_eq!(err, BookingError::InvalidCapacity);
    }

    #[tokio::test]
    async fn reserve_then_sold_out_with_capacity_one() {
        let store = MemoryStore::new();
        let train = store.create_train(new_train(1)).await.unwrap();
        let user = UserId::new();

        let booking = store.reserve(train.id, user).await.unwrap();
        assert_eq!(booking.train_id, train.id);
        assert_eq!(booking.user_id, user);

        let err = store.reserve(train.id, UserId::new()).await.unwrap_err();
        assert_eq!(err, BookingError::SoldOut);
        assert_eq!(store.count_for(train.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn reserve_unknown_train_writes_nothing() {
        let store = MemoryStore::new();
        let err = store.reserve(TrainId::new(), UserId::new()).await.unwrap_err();
        assert_eq!(err, BookingError::TrainNotFound);
        assert!(store.bookings_by_id.read().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn capacity_invariant_under_concurrency() {
        let store = MemoryStore::new();
        let train = store.create_train(new_train(5)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = store.clone();
            let train_id = train.id;
            handles.push(tokio::spawn(async move {
                store.reserve(train_id, UserId::new()).await
            }));
        }

        let mut granted = 0;
        let mut sold_out = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => granted += 1,
                Err(BookingError::SoldOut) => sold_out += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(granted, 5);
        assert_eq!(sold_out, 15);
        assert_eq!(store.count_for(train.id).await.unwrap(), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_scenario_capacity_two_three_users() {
        let store = MemoryStore::new();
        let train = store.create_train(new_train(2)).await.unwrap();

        let users = [UserId::new(), UserId::new(), UserId::new()];
        let mut handles = Vec::new();
        for user in users {
            let store = store.clone();
            let train_id = train.id;
            handles.push(tokio::spawn(
                async move { store.reserve(train_id, user).await },
            ));
        }

        let results: Vec<_> = futures_join(handles).await;
        let granted = results.iter().filter(|r| r.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|r| matches!(r, Err(BookingError::SoldOut)))
            .count();

        assert_eq!(granted, 2);
        assert_eq!(rejected, 1);
        assert_eq!(store.count_for(train.id).await.unwrap(), 2);
    }

    async fn futures_join(
        handles: Vec<tokio::task::JoinHandle<Result<Booking>>>,
    ) -> Vec<Result<Booking>> {
        let mut out = Vec::with_capacity(handles.len());
        for h in handles {
            out.push(h.await.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn booking_lookup_enforces_ownership() {
        let store = MemoryStore::new();
        let train = store.create_train(new_train(3)).await.unwrap();
        let owner = UserId::new();
        let booking = store.reserve(train.id, owner).await.unwrap();

        assert_eq!(store.booking(booking.id, owner).await.unwrap(), booking);
        let err = store.booking(booking.id, UserId::new()).await.unwrap_err();
        assert_eq!(err, BookingError::BookingNotFound);
    }

    #[tokio::test]
    async fn availability_reflects_bookings() {
        let store = MemoryStore::new();
        let train = store.create_train(new_train(4)).await.unwrap();
        store.reserve(train.id, UserId::new()).await.unwrap();

        let listed = store.list_availability("AAA", "BBB").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].available_seats, 3);

        assert!(store.list_availability("AAA", "ZZZ").await.unwrap().is_empty());
    }
}
