use chrono::{DateTime, Utc};

/// Time source for the service. `created_at` stamps and cancellation-window
/// checks read the same clock, so the grace period is consistent and tests
/// can move time by hand.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
