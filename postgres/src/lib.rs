//! PostgreSQL storage for Railbook.
//!
//! Implements every storage trait from `railbook-core` and `railbook-auth`
//! on a single [`sqlx::PgPool`]. The concurrency-critical piece is
//! [`PostgresStore`]'s `reserve` implementation: a transaction that takes a
//! `SELECT ... FOR UPDATE` lock on the train row, re-reads the committed
//! booking count under that lock, and only then inserts, so concurrent
//! reservations for the same train serialize while different trains never
//! contend.
//!
//! Lock waits are bounded by the configured `statement_timeout` /
//! `lock_timeout` (see [`PostgresConfig`]); on expiry Postgres aborts the
//! statement and the error surfaces as `BookingError::Storage`, with the
//! transaction rolled back.

pub mod config;
mod sessions;
mod store;

pub use config::PostgresConfig;
pub use store::PostgresStore;
