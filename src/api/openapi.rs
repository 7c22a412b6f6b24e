use utoipa::OpenApi;

use crate::{
    api::models::{
        CreateReservationRequest, CreateStudioRequest, ErrorResponse, LoginRequest, LoginResponse,
        RegisterUserRequest,
    },
    core::{
        models::{
            audit::AppLog,
            reservation::Reservation,
            studio::{Studio, StudioImage},
            user::{Principal, Role, User},
        },
        services::{StudioDetails, StudioUpdate, UserUpdate},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::login,
        super::handlers::register_user,
        super::handlers::get_user,
        super::handlers::update_user,
        super::handlers::delete_user,
        super::handlers::create_studio,
        super::handlers::list_studios,
        super::handlers::get_studio,
        super::handlers::update_studio,
        super::handlers::delete_studio,
        super::handlers::get_available_days,
        super::handlers::create_reservation,
        super::handlers::list_reservations,
        super::handlers::cancel_reservation,
        super::handlers::get_app_logs
    ),
    components(schemas(
        RegisterUserRequest,
        LoginRequest,
        LoginResponse,
        CreateStudioRequest,
        CreateReservationRequest,
        StudioUpdate,
        UserUpdate,
        StudioDetails,
        ErrorResponse,
        User,
        Role,
        Principal,
        Studio,
        StudioImage,
        Reservation,
        AppLog
    )),
    tags(
        (name = "studiobook", description = "Studio booking platform API")
    )
)]
pub struct ApiDoc;
