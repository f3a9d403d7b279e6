//! The Postgres-backed reservation store.

use chrono::{DateTime, Utc};
use railbook_core::{
    AvailabilityReader, Booking, BookingError, BookingId, BookingLedger, NewTrain, Result,
    SeatAllocator, Train, TrainAvailability, TrainCatalog, TrainId, UserId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::PostgresConfig;

/// PostgreSQL implementation of the Railbook storage traits.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the connection fails.
    pub async fn connect(config: &PostgresConfig) -> Result<Self> {
        let pool = config.connect().await.map_err(storage)?;
        Ok(Self::from_pool(pool))
    }

    /// Run database migrations.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if a migration fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| BookingError::Storage(format!("migration failed: {e}")))
    }

    /// Access the underlying pool (used by the auth store impls and tests).
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map any sqlx failure to the opaque storage error.
pub(crate) fn storage(err: sqlx::Error) -> BookingError {
    BookingError::Storage(err.to_string())
}

impl TrainCatalog for PostgresStore {
    async fn create_train(&self, new: NewTrain) -> Result<Train> {
        new.validate()?;
        let total_seats = i32::try_from(new.total_seats).map_err(|_| BookingError::InvalidCapacity)?;

        let train = Train {
            id: TrainId::new(),
            name: new.name,
            origin: new.origin,
            destination: new.destination,
            total_seats: new.total_seats,
        };
        sqlx::query(
            r"
            INSERT INTO trains (id, name, origin, destination, total_seats)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(train.id.0)
        .bind(&train.name)
        .bind(&train.origin)
        .bind(&train.destination)
        .bind(total_seats)
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        tracing::info!(train_id = %train.id, total_seats, "train created");
        Ok(train)
    }

    async fn train(&self, id: TrainId) -> Result<Train> {
        let row: Option<(Uuid, String, String, String, i32)> = sqlx::query_as(
            r"
            SELECT id, name, origin, destination, total_seats
            FROM trains
            WHERE id = $1
            ",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        let (id, name, origin, destination, total_seats) =
            row.ok_or(BookingError::TrainNotFound)?;
        Ok(Train {
            id: TrainId(id),
            name,
            origin,
            destination,
            total_seats: total_seats.unsigned_abs(),
        })
    }
}

impl BookingLedger for PostgresStore {
    async fn count_for(&self, train_id: TrainId) -> Result<u32> {
        // LEFT JOIN so an existing train with zero bookings is
        // distinguishable from a missing train.
        let row: Option<(i64,)> = sqlx::query_as(
            r"
            SELECT COUNT(b.id)
            FROM trains t
            LEFT JOIN bookings b ON b.train_id = t.id
            WHERE t.id = $1
            GROUP BY t.id
            ",
        )
        .bind(train_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        let (count,) = row.ok_or(BookingError::TrainNotFound)?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn booking(&self, id: BookingId, requester: UserId) -> Result<Booking> {
        // Ownership is part of the predicate: a foreign booking id yields
        // the same NotFound as an unknown one.
        let row: Option<(Uuid, Uuid, Uuid, DateTime<Utc>)> = sqlx::query_as(
            r"
            SELECT id, train_id, user_id, created_at
            FROM bookings
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id.0)
        .bind(requester.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        let (id, train_id, user_id, created_at) = row.ok_or(BookingError::BookingNotFound)?;
        Ok(Booking {
            id: BookingId(id),
            train_id: TrainId(train_id),
            user_id: UserId(user_id),
            created_at,
        })
    }
}

impl SeatAllocator for PostgresStore {
    async fn reserve(&self, train_id: TrainId, requester: UserId) -> Result<Booking> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        // Exclusive lock on the train row. Every concurrent reserve for
        // this train queues here; reserves for other trains lock other
        // rows and proceed in parallel. The wait is bounded by the
        // configured lock_timeout, surfaced as Storage on expiry.
        let seats: Option<(i32,)> =
            sqlx::query_as("SELECT total_seats FROM trains WHERE id = $1 FOR UPDATE")
                .bind(train_id.0)
                .fetch_optional(&mut *tx)
                .await
                .map_err(storage)?;

        let Some((total_seats,)) = seats else {
            let _ = tx.rollback().await;
            return Err(BookingError::TrainNotFound);
        };

        // Re-read the committed count under the lock: it observes every
        // allocation committed by previous holders, including one released
        // microseconds ago. Counting a stale snapshot here is the classic
        // check-then-act race this transaction exists to prevent.
        let (booked,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE train_id = $1")
            .bind(train_id.0)
            .fetch_one(&mut *tx)
            .await
            .map_err(storage)?;

        if booked >= i64::from(total_seats) {
            let _ = tx.rollback().await;
            tracing::debug!(%train_id, booked, total_seats, "reservation rejected, sold out");
            return Err(BookingError::SoldOut);
        }

        let id = BookingId::new();
        let (created_at,): (DateTime<Utc>,) = sqlx::query_as(
            r"
            INSERT INTO bookings (id, train_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING created_at
            ",
        )
        .bind(id.0)
        .bind(train_id.0)
        .bind(requester.0)
        .fetch_one(&mut *tx)
        .await
        .map_err(storage)?;

        tx.commit().await.map_err(storage)?;

        tracing::info!(%train_id, user_id = %requester, booking_id = %id, "seat reserved");
        Ok(Booking {
            id,
            train_id,
            user_id: requester,
            created_at,
        })
    }
}

impl AvailabilityReader for PostgresStore {
    async fn list_availability(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<TrainAvailability>> {
        let rows: Vec<(Uuid, String, i32, i64)> = sqlx::query_as(
            r"
            SELECT
                t.id,
                t.name,
                t.total_seats,
                t.total_seats::BIGINT - COUNT(b.id) AS available_seats
            FROM trains t
            LEFT JOIN bookings b ON t.id = b.train_id
            WHERE t.origin = $1 AND t.destination = $2
            GROUP BY t.id, t.name, t.total_seats
            ORDER BY t.name
            ",
        )
        .bind(origin)
        .bind(destination)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(|(id, name, total_seats, available)| TrainAvailability {
                id: TrainId(id),
                name,
                total_seats: total_seats.unsigned_abs(),
                available_seats: u32::try_from(available.max(0)).unwrap_or(u32::MAX),
            })
            .collect())
    }
}
