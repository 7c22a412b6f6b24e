use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum BookingError {
    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    /// The requested window overlaps an existing reservation. A normal
    /// outcome of the availability check, not a validation failure.
    #[error("Studio {0} is already reserved for the requested dates")]
    ReservationConflict(String),

    /// Customer asked to cancel after the grace period elapsed
    #[error("Cancellation window expired: booked at {booked_at}, {elapsed_minutes} minutes ago (limit {limit_minutes})")]
    CancellationWindowExpired {
        booked_at: DateTime<Utc>,
        elapsed_minutes: i64,
        limit_minutes: i64,
    },

    /// Principal acted on a resource it does not own or lacks the role for
    #[error("User {0} is not authorized to perform this action")]
    Unauthorized(String),

    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Studio {0} not found")]
    StudioNotFound(String),

    #[error("Reservation {0} not found")]
    ReservationNotFound(String),

    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),

    #[error("Phone {0} already registered")]
    PhoneAlreadyRegistered(String),

    /// Only users with the studio-owner role may list studios
    #[error("User {0} is not a studio owner")]
    NotStudioOwner(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Range-exclusion constraint tripped at the storage layer. The service
    /// translates this into `ReservationConflict` before it crosses the API.
    #[error("Storage conflict: {0}")]
    StorageConflict(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}
