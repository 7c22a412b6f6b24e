use crate::core::errors::BookingError;
use crate::core::models::{
    reservation::Reservation,
    studio::{Studio, StudioImage},
    user::User,
};
use crate::core::policy::{self, DateRange};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct InMemoryStorage {
    users: Arc<RwLock<HashMap<String, User>>>,
    users_by_email: Arc<RwLock<HashMap<String, String>>>,
    users_by_phone: Arc<RwLock<HashMap<String, String>>>,
    studios: Arc<RwLock<HashMap<String, Studio>>>,
    studio_images: Arc<RwLock<HashMap<String, Vec<StudioImage>>>>,
    reservations: Arc<RwLock<HashMap<String, Reservation>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            users: Arc::new(RwLock::new(HashMap::new())),
            users_by_email: Arc::new(RwLock::new(HashMap::new())),
            users_by_phone: Arc::new(RwLock::new(HashMap::new())),
            studios: Arc::new(RwLock::new(HashMap::new())),
            studio_images: Arc::new(RwLock::new(HashMap::new())),
            reservations: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user(&self, user: User) -> Result<User, BookingError> {
        let mut users_by_email = self.users_by_email.write().await;
        let mut users_by_phone = self.users_by_phone.write().await;
        if users_by_email.contains_key(&user.email) {
            return Err(BookingError::EmailAlreadyRegistered(user.email));
        }
        if users_by_phone.contains_key(&user.phone) {
            return Err(BookingError::PhoneAlreadyRegistered(user.phone));
        }
        users_by_email.insert(user.email.clone(), user.id.clone());
        users_by_phone.insert(user.phone.clone(), user.id.clone());
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, BookingError> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, BookingError> {
        let users_by_email = self.users_by_email.read().await;
        let users = self.users.read().await;
        Ok(users_by_email.get(email).and_then(|id| users.get(id).cloned()))
    }

    async fn get_user_by_phone(&self, phone: &str) -> Result<Option<User>, BookingError> {
        let users_by_phone = self.users_by_phone.read().await;
        let users = self.users.read().await;
        Ok(users_by_phone.get(phone).and_then(|id| users.get(id).cloned()))
    }

    async fn update_user(&self, user: User) -> Result<User, BookingError> {
        let mut users_by_email = self.users_by_email.write().await;
        let mut users_by_phone = self.users_by_phone.write().await;
        let mut users = self.users.write().await;
        let existing = users
            .get(&user.id)
            .cloned()
            .ok_or_else(|| BookingError::UserNotFound(user.id.clone()))?;
        if users_by_email.get(&user.email).is_some_and(|id| id != &user.id) {
            return Err(BookingError::EmailAlreadyRegistered(user.email));
        }
        if users_by_phone.get(&user.phone).is_some_and(|id| id != &user.id) {
            return Err(BookingError::PhoneAlreadyRegistered(user.phone));
        }
        users_by_email.remove(&existing.email);
        users_by_phone.remove(&existing.phone);
        users_by_email.insert(user.email.clone(), user.id.clone());
        users_by_phone.insert(user.phone.clone(), user.id.clone());
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), BookingError> {
        let mut users_by_email = self.users_by_email.write().await;
        let mut users_by_phone = self.users_by_phone.write().await;
        let mut users = self.users.write().await;
        let user = users
            .remove(user_id)
            .ok_or_else(|| BookingError::UserNotFound(user_id.to_string()))?;
        users_by_email.remove(&user.email);
        users_by_phone.remove(&user.phone);

        let mut studios = self.studios.write().await;
        let owned: Vec<String> = studios
            .values()
            .filter(|s| s.owner_id == user_id)
            .map(|s| s.id.clone())
            .collect();
        let mut studio_images = self.studio_images.write().await;
        for studio_id in &owned {
            studios.remove(studio_id);
            studio_images.remove(studio_id);
        }

        let mut reservations = self.reservations.write().await;
        reservations.retain(|_, r| r.customer_id != user_id && !owned.contains(&r.studio_id));
        Ok(())
    }

    async fn save_studio(&self, studio: Studio) -> Result<(), BookingError> {
        let mut studios = self.studios.write().await;
        studios.insert(studio.id.clone(), studio);
        Ok(())
    }

    async fn get_studio(&self, studio_id: &str) -> Result<Option<Studio>, BookingError> {
        let studios = self.studios.read().await;
        Ok(studios.get(studio_id).cloned())
    }

    async fn get_studios(&self) -> Result<Vec<Studio>, BookingError> {
        let studios = self.studios.read().await;
        Ok(studios.values().cloned().collect())
    }

    async fn get_studios_by_owner(&self, owner_id: &str) -> Result<Vec<Studio>, BookingError> {
        let studios = self.studios.read().await;
        Ok(studios
            .values()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn delete_studio(&self, studio_id: &str) -> Result<(), BookingError> {
        let mut studios = self.studios.write().await;
        if studios.remove(studio_id).is_some() {
            // Images have no lifecycle of their own.
            let mut studio_images = self.studio_images.write().await;
            studio_images.remove(studio_id);
        }
        Ok(())
    }

    async fn save_studio_image(&self, image: StudioImage) -> Result<(), BookingError> {
        let mut studio_images = self.studio_images.write().await;
        studio_images
            .entry(image.studio_id.clone())
            .or_insert_with(Vec::new)
            .push(image);
        Ok(())
    }

    async fn get_studio_images(&self, studio_id: &str) -> Result<Vec<StudioImage>, BookingError> {
        let studio_images = self.studio_images.read().await;
        Ok(studio_images.get(studio_id).cloned().unwrap_or_default())
    }

    async fn create_reservation(&self, reservation: Reservation) -> Result<(), BookingError> {
        // Overlap check and insert under one write lock: the in-memory
        // equivalent of a range-exclusion constraint on
        // (studio_id, [start_date, end_date]). Two concurrent inserts for
        // overlapping windows cannot both commit.
        let mut reservations = self.reservations.write().await;
        let window = DateRange::from(&reservation);
        let existing: Vec<Reservation> = reservations
            .values()
            .filter(|r| r.studio_id == reservation.studio_id)
            .cloned()
            .collect();
        if let Some(conflicting) = policy::find_conflict(&existing, &window) {
            return Err(BookingError::StorageConflict(format!(
                "reservation {} already covers [{}, {}]",
                conflicting.id, conflicting.start_date, conflicting.end_date
            )));
        }
        reservations.insert(reservation.id.clone(), reservation);
        Ok(())
    }

    async fn get_reservation(&self, reservation_id: &str) -> Result<Option<Reservation>, BookingError> {
        let reservations = self.reservations.read().await;
        Ok(reservations.get(reservation_id).cloned())
    }

    async fn delete_reservation(&self, reservation_id: &str) -> Result<(), BookingError> {
        let mut reservations = self.reservations.write().await;
        reservations.remove(reservation_id);
        Ok(())
    }

    async fn get_reservations_by_studio(&self, studio_id: &str) -> Result<Vec<Reservation>, BookingError> {
        let reservations = self.reservations.read().await;
        Ok(reservations
            .values()
            .filter(|r| r.studio_id == studio_id)
            .cloned()
            .collect())
    }

    async fn get_reservations_by_customer(&self, customer_id: &str) -> Result<Vec<Reservation>, BookingError> {
        let reservations = self.reservations.read().await;
        Ok(reservations
            .values()
            .filter(|r| r.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn get_all_reservations(&self) -> Result<Vec<Reservation>, BookingError> {
        let reservations = self.reservations.read().await;
        Ok(reservations.values().cloned().collect())
    }
}
