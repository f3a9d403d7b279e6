//! Error taxonomy for reservation operations.

use thiserror::Error;

/// Result type alias for reservation operations.
pub type Result<T> = std::result::Result<T, BookingError>;

/// Error taxonomy for the reservation core.
///
/// Every variant except [`Storage`](Self::Storage) is rejected without a
/// side effect: any transactional scope opened by the operation has been
/// rolled back before the error is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Train capacity must be a positive integer.
    ///
    /// Rejected before any storage access.
    #[error("Train capacity must be positive")]
    InvalidCapacity,

    /// The requested train does not exist.
    #[error("Train not found")]
    TrainNotFound,

    /// The requested booking does not exist, or belongs to another user.
    ///
    /// The two cases are deliberately indistinguishable so one user cannot
    /// probe for another user's booking ids.
    #[error("Booking not found")]
    BookingNotFound,

    /// The train has no remaining seats.
    ///
    /// Returned both when the train was genuinely full and when a
    /// concurrent reservation consumed the last seat first.
    #[error("No seats available")]
    SoldOut,

    /// The storage layer failed (lock timeout, deadlock, connection loss,
    /// commit failure). The scope was rolled back.
    ///
    /// Callers may retry the whole operation, but must not assume the
    /// prior attempt had no effect: a failure after commit but before
    /// acknowledgment can already have allocated a seat (at-least-once).
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BookingError {
    /// Returns `true` if this error is the caller's fault (bad input or a
    /// reference to something that does not exist).
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCapacity | Self::TrainNotFound | Self::BookingNotFound | Self::SoldOut
        )
    }

    /// Returns `true` if retrying the whole operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
