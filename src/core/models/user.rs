use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    StudioOwner,
    Customer,
}

impl Role {
    /// Admins may act on any reservation and see the full catalog.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Only studio owners may list studios for rent.
    pub fn can_create_studio(&self) -> bool {
        matches!(self, Role::StudioOwner)
    }

    pub fn can_view_all_reservations(&self) -> bool {
        self.is_admin()
    }

    /// Admin deletion is a privileged operation that skips the
    /// customer cancellation window entirely.
    pub fn can_bypass_cancellation_window(&self) -> bool {
        self.is_admin()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Admin => "ADMIN",
            Role::StudioOwner => "STUDIO_OWNER",
            Role::Customer => "CUSTOMER",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password: String, // bcrypt hash, never sent back out
    pub role: Role,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}

/// The authenticated actor behind a request. Built from JWT claims at the
/// HTTP boundary; the service trusts it.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    pub id: String,
    pub role: Role,
}
