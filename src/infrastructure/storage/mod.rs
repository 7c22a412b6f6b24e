use crate::core::errors::BookingError;
use crate::core::models::{
    reservation::Reservation,
    studio::{Studio, StudioImage},
    user::User,
};
use async_trait::async_trait;

/// Transactional CRUD over the platform's records. `create_reservation`
/// must be atomic with respect to the no-overlap invariant: an insert whose
/// window overlaps an existing reservation on the same studio fails with
/// `StorageConflict`, like a database range-exclusion constraint would.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn create_user(&self, user: User) -> Result<User, BookingError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, BookingError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, BookingError>;
    async fn get_user_by_phone(&self, phone: &str) -> Result<Option<User>, BookingError>;
    /// Re-checks email/phone uniqueness against every other user before
    /// committing the new record.
    async fn update_user(&self, user: User) -> Result<User, BookingError>;
    /// Deletes the user and cascades to their reservations, owned studios
    /// and those studios' images.
    async fn delete_user(&self, user_id: &str) -> Result<(), BookingError>;

    async fn save_studio(&self, studio: Studio) -> Result<(), BookingError>;
    async fn get_studio(&self, studio_id: &str) -> Result<Option<Studio>, BookingError>;
    async fn get_studios(&self) -> Result<Vec<Studio>, BookingError>;
    async fn get_studios_by_owner(&self, owner_id: &str) -> Result<Vec<Studio>, BookingError>;
    /// Deletes the studio and cascades to its images.
    async fn delete_studio(&self, studio_id: &str) -> Result<(), BookingError>;
    async fn save_studio_image(&self, image: StudioImage) -> Result<(), BookingError>;
    async fn get_studio_images(&self, studio_id: &str) -> Result<Vec<StudioImage>, BookingError>;

    async fn create_reservation(&self, reservation: Reservation) -> Result<(), BookingError>;
    async fn get_reservation(&self, reservation_id: &str) -> Result<Option<Reservation>, BookingError>;
    async fn delete_reservation(&self, reservation_id: &str) -> Result<(), BookingError>;
    async fn get_reservations_by_studio(&self, studio_id: &str) -> Result<Vec<Reservation>, BookingError>;
    async fn get_reservations_by_customer(&self, customer_id: &str) -> Result<Vec<Reservation>, BookingError>;
    async fn get_all_reservations(&self) -> Result<Vec<Reservation>, BookingError>;
}

pub mod in_memory;
