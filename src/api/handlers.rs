use crate::{
    api::models::*,
    auth::jwt::Claims,
    core::{
        clock::SystemClock,
        errors::BookingError,
        models::{audit::AppLog, reservation::Reservation, studio::Studio, user::User},
        services::{BookingService, StudioDetails, StudioUpdate, UserUpdate},
    },
    infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage},
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::IntoResponse,
};
use chrono::NaiveDate;
use http::header;

use std::sync::Arc;

// Middleware to validate JWT
async fn auth_middleware(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(BookingError::InvalidCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(BookingError::InvalidCredentials)?;

    let claims = service.validate_token(token)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

// Define API routes
pub fn api_routes(service: Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>) -> Router {
    let protected_routes = Router::new()
        .route("/users", axum::routing::patch(update_user))
        .route("/users/{user_id}", axum::routing::get(get_user))
        .route("/users/{user_id}", axum::routing::delete(delete_user))
        .route("/studios", axum::routing::get(list_studios))
        .route("/studios", axum::routing::post(create_studio))
        .route("/studios/{studio_id}", axum::routing::get(get_studio))
        .route("/studios/{studio_id}", axum::routing::patch(update_studio))
        .route("/studios/{studio_id}", axum::routing::delete(delete_studio))
        .route(
            "/studios/{studio_id}/available_days",
            axum::routing::get(get_available_days),
        )
        .route("/reservations", axum::routing::post(create_reservation))
        .route("/reservations", axum::routing::get(list_reservations))
        .route(
            "/reservations/{reservation_id}",
            axum::routing::delete(cancel_reservation),
        )
        .route("/logs", axum::routing::get(get_app_logs))
        .route_layer(middleware::from_fn_with_state(service.clone(), auth_middleware));

    Router::new()
        .route("/login", axum::routing::post(login))
        .route("/users", axum::routing::post(register_user)) // Unprotected
        .merge(protected_routes)
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn login(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = service.authenticate(&req.identifier, &req.password).await?;
    Ok(Json(LoginResponse { token }))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 409, description = "Email or phone already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn register_user(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = service
        .register_user(req.name, req.email, req.phone, req.password, req.role)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "ID of the user to retrieve")
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = User),
        (status = 403, description = "Not the caller's own record", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn get_user(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = service.get_user(&claims.principal(), &user_id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    patch,
    path = "/api/users",
    request_body = UserUpdate,
    responses(
        (status = 200, description = "Account updated", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 409, description = "Email or phone already registered", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn update_user(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    Extension(claims): Extension<Claims>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<User>, ApiError> {
    let user = service.update_user(&claims.principal(), update).await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "ID of the user to delete")
    ),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 403, description = "Not the caller's own account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn delete_user(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_user(&claims.principal(), &user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/studios",
    request_body = CreateStudioRequest,
    responses(
        (status = 201, description = "Studio created successfully", body = StudioDetails),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Caller is not a studio owner", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn create_studio(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateStudioRequest>,
) -> Result<(StatusCode, Json<StudioDetails>), ApiError> {
    let details = service
        .create_studio(
            &claims.principal(),
            req.name,
            req.address,
            req.price,
            req.rate,
            req.images,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(details)))
}

#[utoipa::path(
    get,
    path = "/api/studios",
    params(ListStudiosQuery),
    responses(
        (status = 200, description = "Studios listed", body = [Studio])
    ),
    security(("Bearer" = []))
)]
async fn list_studios(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ListStudiosQuery>,
) -> Result<Json<Vec<Studio>>, ApiError> {
    let studios = service.list_studios(&claims.principal(), query.owner_profile).await?;
    Ok(Json(studios))
}

#[utoipa::path(
    get,
    path = "/api/studios/{studio_id}",
    params(
        ("studio_id" = String, Path, description = "ID of the studio")
    ),
    responses(
        (status = 200, description = "Studio retrieved", body = StudioDetails),
        (status = 404, description = "Studio not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn get_studio(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    Path(studio_id): Path<String>,
) -> Result<Json<StudioDetails>, ApiError> {
    let details = service.get_studio(&studio_id).await?;
    Ok(Json(details))
}

#[utoipa::path(
    patch,
    path = "/api/studios/{studio_id}",
    params(
        ("studio_id" = String, Path, description = "ID of the studio")
    ),
    request_body = StudioUpdate,
    responses(
        (status = 200, description = "Studio updated", body = Studio),
        (status = 403, description = "Caller does not own the studio", body = ErrorResponse),
        (status = 404, description = "Studio not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn update_studio(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    Extension(claims): Extension<Claims>,
    Path(studio_id): Path<String>,
    Json(update): Json<StudioUpdate>,
) -> Result<Json<Studio>, ApiError> {
    let studio = service.update_studio(&claims.principal(), &studio_id, update).await?;
    Ok(Json(studio))
}

#[utoipa::path(
    delete,
    path = "/api/studios/{studio_id}",
    params(
        ("studio_id" = String, Path, description = "ID of the studio")
    ),
    responses(
        (status = 204, description = "Studio deleted"),
        (status = 403, description = "Caller does not own the studio", body = ErrorResponse),
        (status = 404, description = "Studio not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn delete_studio(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    Extension(claims): Extension<Claims>,
    Path(studio_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_studio(&claims.principal(), &studio_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/studios/{studio_id}/available_days",
    params(
        ("studio_id" = String, Path, description = "ID of the studio")
    ),
    responses(
        (status = 200, description = "Unreserved days of the studio's founding year", body = [String]),
        (status = 404, description = "Studio not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn get_available_days(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    Extension(claims): Extension<Claims>,
    Path(studio_id): Path<String>,
) -> Result<Json<Vec<NaiveDate>>, ApiError> {
    let days = service.available_days(&claims.principal(), &studio_id).await?;
    Ok(Json(days))
}

#[utoipa::path(
    post,
    path = "/api/reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = Reservation),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 404, description = "Studio not found", body = ErrorResponse),
        (status = 409, description = "Window overlaps an existing reservation", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn create_reservation(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), ApiError> {
    let reservation = service
        .create_reservation(&claims.principal(), &req.studio_id, req.start_date, req.end_date)
        .await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

#[utoipa::path(
    get,
    path = "/api/reservations",
    responses(
        (status = 200, description = "Reservations visible to the caller", body = [Reservation])
    ),
    security(("Bearer" = []))
)]
async fn list_reservations(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    let reservations = service.list_reservations(&claims.principal()).await?;
    Ok(Json(reservations))
}

#[utoipa::path(
    delete,
    path = "/api/reservations/{reservation_id}",
    params(
        ("reservation_id" = String, Path, description = "ID of the reservation")
    ),
    responses(
        (status = 200, description = "Reservation cancelled"),
        (status = 403, description = "Caller does not own the reservation", body = ErrorResponse),
        (status = 404, description = "Reservation not found", body = ErrorResponse),
        (status = 422, description = "Cancellation window expired", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn cancel_reservation(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    Extension(claims): Extension<Claims>,
    Path(reservation_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.cancel_reservation(&claims.principal(), &reservation_id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Audit log", body = [AppLog]),
        (status = 403, description = "Admin only", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn get_app_logs(
    State(service): State<Arc<BookingService<InMemoryLogging, InMemoryStorage, SystemClock>>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs(&claims.principal()).await?;
    Ok(Json(logs))
}
