use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Studio {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    /// Nightly price.
    pub price: i64,
    /// Rating, 1 through 5.
    pub rate: u8,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}

/// Image reference owned by a studio. Deleted together with the studio.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StudioImage {
    pub id: String,
    pub studio_id: String,
    pub image_url: String,
}
