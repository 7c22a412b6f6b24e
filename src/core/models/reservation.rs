use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A customer's booking of a studio over a date window. Both bounds are
/// calendar dates of the same granularity; `created_at` is set once at
/// insert time and never mutated.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    pub id: String,
    pub customer_id: String,
    pub studio_id: String,
    #[schema(value_type = String, example = "2024-06-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, example = "2024-06-05")]
    pub end_date: NaiveDate,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}
