mod studio_tests;
mod user_tests;

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::core::clock::Clock;
use crate::core::models::user::{Principal, Role, User};
use crate::core::services::BookingService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub type TestService = BookingService<InMemoryLogging, InMemoryStorage, ManualClock>;

/// Clock that only moves when a test pushes it.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        ManualClock {
            now: Arc::new(RwLock::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap()
    }
}

pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn create_test_service() -> (TestService, ManualClock, InMemoryStorage) {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let clock = ManualClock::new(test_epoch());
    let service = BookingService::new(storage.clone(), logging, clock.clone(), "test-secret".to_string());
    (service, clock, storage)
}

pub async fn register(service: &TestService, role: Role, tag: &str, phone: &str) -> User {
    service
        .register_user(
            format!("User {}", tag),
            format!("{}@example.com", tag),
            phone.to_string(),
            "hunter22".to_string(),
            role,
        )
        .await
        .unwrap()
}

pub fn principal_of(user: &User) -> Principal {
    Principal {
        id: user.id.clone(),
        role: user.role,
    }
}
