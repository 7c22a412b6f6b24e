use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::errors::BookingError;
use crate::core::models::user::Role;

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: Role,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email or phone number.
    pub identifier: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateStudioRequest {
    pub name: String,
    pub address: String,
    pub price: i64,
    pub rate: u8,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct ListStudiosQuery {
    /// When true, only studios owned by the caller.
    #[serde(default)]
    pub owner_profile: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    pub studio_id: String,
    #[schema(value_type = String, example = "2024-06-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, example = "2024-06-05")]
    pub end_date: NaiveDate,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for BookingError to implement IntoResponse
pub struct ApiError(pub BookingError);

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            BookingError::InvalidInput(_, _) => StatusCode::BAD_REQUEST,
            BookingError::ReservationConflict(_) => StatusCode::CONFLICT,
            // Distinct from both validation and conflict so clients can
            // render "cancellation window expired".
            BookingError::CancellationWindowExpired { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::Unauthorized(_) | BookingError::NotStudioOwner(_) => StatusCode::FORBIDDEN,
            BookingError::UserNotFound(_)
            | BookingError::StudioNotFound(_)
            | BookingError::ReservationNotFound(_) => StatusCode::NOT_FOUND,
            BookingError::EmailAlreadyRegistered(_) | BookingError::PhoneAlreadyRegistered(_) => StatusCode::CONFLICT,
            BookingError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            // The service translates these before they reach the API, but
            // keep a mapping rather than panic if one slips through.
            BookingError::StorageConflict(_) => StatusCode::CONFLICT,
            BookingError::StorageError(_)
            | BookingError::LoggingError(_)
            | BookingError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let error_message = self.0.to_string();
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
