pub mod in_memory;

use crate::core::errors::BookingError;
use crate::core::models::audit::AppLog;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait LoggingService: Send + Sync {
    /// Records an audit entry. The timestamp is supplied by the caller so
    /// that audit time and domain time come from the same clock.
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        user_id: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), BookingError>;
    async fn get_logs(&self) -> Result<Vec<AppLog>, BookingError>;
}
