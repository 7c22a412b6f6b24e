// Audit action names recorded through the logging service.
pub const USER_REGISTERED: &str = "USER_REGISTERED";
pub const USER_UPDATED: &str = "USER_UPDATED";
pub const USER_DELETED: &str = "USER_DELETED";
pub const STUDIO_CREATED: &str = "STUDIO_CREATED";
pub const STUDIO_UPDATED: &str = "STUDIO_UPDATED";
pub const STUDIO_DELETED: &str = "STUDIO_DELETED";
pub const RESERVATION_CREATED: &str = "RESERVATION_CREATED";
pub const RESERVATION_CANCELLED: &str = "RESERVATION_CANCELLED";
pub const RESERVATION_DELETED_BY_ADMIN: &str = "RESERVATION_DELETED_BY_ADMIN";
pub const RESERVATIONS_QUERIED: &str = "RESERVATIONS_QUERIED";
pub const AVAILABILITY_QUERIED: &str = "AVAILABILITY_QUERIED";
