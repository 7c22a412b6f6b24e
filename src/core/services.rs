use crate::auth::jwt::{Claims, JwtService};
use crate::constants::constants::{
    AVAILABILITY_QUERIED, RESERVATIONS_QUERIED, RESERVATION_CANCELLED, RESERVATION_CREATED,
    RESERVATION_DELETED_BY_ADMIN, STUDIO_CREATED, STUDIO_DELETED, STUDIO_UPDATED, USER_DELETED,
    USER_REGISTERED, USER_UPDATED,
};
use crate::core::clock::Clock;
use crate::core::errors::{BookingError, FieldError};
use crate::core::models::{
    audit::AppLog,
    reservation::Reservation,
    studio::{Studio, StudioImage},
    user::{Principal, Role, User},
};
use crate::core::policy::{self, DateRange, CANCELLATION_WINDOW_MINUTES};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct StudioDetails {
    pub studio: Studio,
    pub images: Vec<StudioImage>,
}

/// Partial update of the caller's own account.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

/// Partial update of a studio's listing fields.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StudioUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub price: Option<i64>,
    pub rate: Option<u8>,
}

pub struct BookingService<L: LoggingService, S: Storage, C: Clock> {
    storage: S,
    logging: L,
    clock: C,
    jwt_service: JwtService,
}

impl<L: LoggingService, S: Storage, C: Clock> BookingService<L, S, C> {
    pub fn new(storage: S, logging: L, clock: C, jwt_secret: String) -> Self {
        BookingService {
            storage,
            logging,
            clock,
            jwt_service: JwtService::new(jwt_secret),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, BookingError> {
        self.jwt_service.validate_token(token)
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), BookingError> {
        if value.trim().is_empty() {
            return Err(BookingError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.len() > max_length {
            return Err(BookingError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        Ok(())
    }

    fn validate_listing_fields(&self, price: i64, rate: u8) -> Result<(), BookingError> {
        if price <= 0 {
            return Err(BookingError::InvalidInput(
                "price".to_string(),
                FieldError {
                    field: "price".to_string(),
                    title: "Invalid Price".to_string(),
                    description: "Price must be greater than 0".to_string(),
                },
            ));
        }
        if !(1..=5).contains(&rate) {
            return Err(BookingError::InvalidInput(
                "rate".to_string(),
                FieldError {
                    field: "rate".to_string(),
                    title: "Invalid Rate".to_string(),
                    description: "Rate must be between 1 and 5".to_string(),
                },
            ));
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<(), BookingError> {
        if !email.contains('@') || !email.contains('.') || email.len() < 5 {
            return Err(BookingError::InvalidInput(
                "email".to_string(),
                FieldError {
                    field: "email".to_string(),
                    title: "Invalid email".to_string(),
                    description: format!("{} is not a valid email address", email),
                },
            ));
        }
        self.validate_string_input("email", email, 254)
    }

    fn hash_password(&self, password: &str) -> Result<String, BookingError> {
        self.validate_string_input("password", password, 100)?;
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| BookingError::InternalServerError(format!("Password hashing error: {}", e)))
    }

    // ---- identity -------------------------------------------------------

    pub async fn register_user(
        &self,
        name: String,
        email: String,
        phone: String,
        password: String,
        role: Role,
    ) -> Result<User, BookingError> {
        self.validate_email(&email)?;
        self.validate_string_input("name", &name, 500)?;
        self.validate_string_input("phone", &phone, 17)?;
        let hashed = self.hash_password(&password)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            phone,
            password: hashed,
            role,
            created_at: self.clock.now(),
        };

        let created = self.storage.create_user(user).await?;
        self.logging
            .log_action(
                USER_REGISTERED,
                json!({ "user_id": created.id, "email": created.email, "role": created.role.to_string() }),
                Some(created.id.as_str()),
                self.clock.now(),
            )
            .await?;
        Ok(created)
    }

    /// Login with either email or phone as identifier. Existence is masked:
    /// an unknown identifier and a wrong password fail the same way.
    pub async fn authenticate(&self, identifier: &str, password: &str) -> Result<String, BookingError> {
        let user = match self.storage.get_user_by_email(identifier).await? {
            Some(user) => Some(user),
            None => self.storage.get_user_by_phone(identifier).await?,
        };
        let user = user.ok_or(BookingError::InvalidCredentials)?;

        if bcrypt::verify(password, &user.password)
            .map_err(|e| BookingError::InternalServerError(format!("Password verification error: {}", e)))?
        {
            self.jwt_service.generate_token(&user.id, user.role)
        } else {
            Err(BookingError::InvalidCredentials)
        }
    }

    pub async fn get_user(&self, principal: &Principal, user_id: &str) -> Result<User, BookingError> {
        if principal.id != user_id && !principal.role.is_admin() {
            return Err(BookingError::Unauthorized(principal.id.clone()));
        }
        self.storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| BookingError::UserNotFound(user_id.to_string()))
    }

    /// Callers can only update their own account. Absent fields are left
    /// untouched; a new password is re-hashed before it is stored.
    pub async fn update_user(&self, principal: &Principal, update: UserUpdate) -> Result<User, BookingError> {
        let mut user = self
            .storage
            .get_user(&principal.id)
            .await?
            .ok_or_else(|| BookingError::UserNotFound(principal.id.clone()))?;

        if let Some(name) = update.name {
            self.validate_string_input("name", &name, 500)?;
            user.name = name;
        }
        if let Some(email) = update.email {
            self.validate_email(&email)?;
            user.email = email;
        }
        if let Some(phone) = update.phone {
            self.validate_string_input("phone", &phone, 17)?;
            user.phone = phone;
        }
        if let Some(password) = update.password {
            user.password = self.hash_password(&password)?;
        }

        // The store re-checks email/phone uniqueness against other accounts.
        let updated = self.storage.update_user(user).await?;
        self.logging
            .log_action(
                USER_UPDATED,
                json!({ "user_id": updated.id, "email": updated.email }),
                Some(principal.id.as_str()),
                self.clock.now(),
            )
            .await?;
        Ok(updated)
    }

    pub async fn delete_user(&self, principal: &Principal, user_id: &str) -> Result<(), BookingError> {
        if principal.id != user_id && !principal.role.is_admin() {
            return Err(BookingError::Unauthorized(principal.id.clone()));
        }
        // Cascades to the user's reservations and owned studios.
        self.storage.delete_user(user_id).await?;
        self.logging
            .log_action(
                USER_DELETED,
                json!({ "user_id": user_id }),
                Some(principal.id.as_str()),
                self.clock.now(),
            )
            .await?;
        Ok(())
    }

    // ---- studio catalog -------------------------------------------------

    pub async fn create_studio(
        &self,
        principal: &Principal,
        name: String,
        address: String,
        price: i64,
        rate: u8,
        image_urls: Vec<String>,
    ) -> Result<StudioDetails, BookingError> {
        if !principal.role.can_create_studio() {
            return Err(BookingError::NotStudioOwner(principal.id.clone()));
        }
        self.validate_string_input("name", &name, 100)?;
        self.validate_string_input("address", &address, 100)?;
        self.validate_listing_fields(price, rate)?;

        let studio = Studio {
            id: Uuid::new_v4().to_string(),
            owner_id: principal.id.clone(),
            name,
            address,
            price,
            rate,
            created_at: self.clock.now(),
        };
        self.storage.save_studio(studio.clone()).await?;

        let images: Vec<StudioImage> = image_urls
            .into_iter()
            .map(|image_url| StudioImage {
                id: Uuid::new_v4().to_string(),
                studio_id: studio.id.clone(),
                image_url,
            })
            .collect();
        futures::future::try_join_all(images.iter().map(|image| self.storage.save_studio_image(image.clone())))
            .await?;

        self.logging
            .log_action(
                STUDIO_CREATED,
                json!({ "studio_id": studio.id, "name": studio.name, "owner_id": studio.owner_id }),
                Some(principal.id.as_str()),
                self.clock.now(),
            )
            .await?;

        Ok(StudioDetails { studio, images })
    }

    pub async fn update_studio(
        &self,
        principal: &Principal,
        studio_id: &str,
        update: StudioUpdate,
    ) -> Result<Studio, BookingError> {
        let mut studio = self.require_studio(studio_id).await?;
        if studio.owner_id != principal.id && !principal.role.is_admin() {
            return Err(BookingError::Unauthorized(principal.id.clone()));
        }

        if let Some(name) = update.name {
            self.validate_string_input("name", &name, 100)?;
            studio.name = name;
        }
        if let Some(address) = update.address {
            self.validate_string_input("address", &address, 100)?;
            studio.address = address;
        }
        if let Some(price) = update.price {
            studio.price = price;
        }
        if let Some(rate) = update.rate {
            studio.rate = rate;
        }
        self.validate_listing_fields(studio.price, studio.rate)?;

        self.storage.save_studio(studio.clone()).await?;
        self.logging
            .log_action(
                STUDIO_UPDATED,
                json!({ "studio_id": studio.id }),
                Some(principal.id.as_str()),
                self.clock.now(),
            )
            .await?;
        Ok(studio)
    }

    pub async fn delete_studio(&self, principal: &Principal, studio_id: &str) -> Result<(), BookingError> {
        let studio = self.require_studio(studio_id).await?;
        if studio.owner_id != principal.id && !principal.role.is_admin() {
            return Err(BookingError::Unauthorized(principal.id.clone()));
        }
        // Cascades to the studio's images.
        self.storage.delete_studio(studio_id).await?;
        self.logging
            .log_action(
                STUDIO_DELETED,
                json!({ "studio_id": studio_id, "name": studio.name }),
                Some(principal.id.as_str()),
                self.clock.now(),
            )
            .await?;
        Ok(())
    }

    pub async fn get_studio(&self, studio_id: &str) -> Result<StudioDetails, BookingError> {
        let studio = self.require_studio(studio_id).await?;
        let images = self.storage.get_studio_images(studio_id).await?;
        Ok(StudioDetails { studio, images })
    }

    pub async fn list_studios(&self, principal: &Principal, owner_profile: bool) -> Result<Vec<Studio>, BookingError> {
        if owner_profile {
            self.storage.get_studios_by_owner(&principal.id).await
        } else {
            self.storage.get_studios().await
        }
    }

    /// Days of the studio's founding year with no reservation against them.
    /// Derived view over a snapshot; recomputed on demand, never persisted.
    pub async fn available_days(&self, principal: &Principal, studio_id: &str) -> Result<Vec<NaiveDate>, BookingError> {
        let studio = self.require_studio(studio_id).await?;
        let reservations = self.storage.get_reservations_by_studio(studio_id).await?;
        let days = policy::available_days(studio.created_at.year(), &reservations);
        self.logging
            .log_action(
                AVAILABILITY_QUERIED,
                json!({ "studio_id": studio_id, "year": studio.created_at.year() }),
                Some(principal.id.as_str()),
                self.clock.now(),
            )
            .await?;
        Ok(days)
    }

    // ---- reservations ---------------------------------------------------

    pub async fn create_reservation(
        &self,
        principal: &Principal,
        studio_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Reservation, BookingError> {
        let _window = DateRange::new(start_date, end_date)?;
        self.require_studio(studio_id).await?;

        let reservation = Reservation {
            id: Uuid::new_v4().to_string(),
            customer_id: principal.id.clone(),
            studio_id: studio_id.to_string(),
            start_date,
            end_date,
            created_at: self.clock.now(),
        };

        // The store checks for overlap and inserts atomically. A constraint
        // violation is surfaced to the caller as a retryable conflict.
        match self.storage.create_reservation(reservation.clone()).await {
            Ok(()) => {}
            Err(BookingError::StorageConflict(_)) => {
                return Err(BookingError::ReservationConflict(studio_id.to_string()));
            }
            Err(e) => return Err(e),
        }

        self.logging
            .log_action(
                RESERVATION_CREATED,
                json!({
                    "reservation_id": reservation.id,
                    "studio_id": studio_id,
                    "start_date": reservation.start_date,
                    "end_date": reservation.end_date
                }),
                Some(principal.id.as_str()),
                self.clock.now(),
            )
            .await?;

        Ok(reservation)
    }

    pub async fn cancel_reservation(&self, principal: &Principal, reservation_id: &str) -> Result<(), BookingError> {
        let reservation = self
            .storage
            .get_reservation(reservation_id)
            .await?
            .ok_or_else(|| BookingError::ReservationNotFound(reservation_id.to_string()))?;

        if principal.role.can_bypass_cancellation_window() {
            self.storage.delete_reservation(reservation_id).await?;
            self.logging
                .log_action(
                    RESERVATION_DELETED_BY_ADMIN,
                    json!({ "reservation_id": reservation_id, "customer_id": reservation.customer_id }),
                    Some(principal.id.as_str()),
                    self.clock.now(),
                )
                .await?;
            return Ok(());
        }

        if reservation.customer_id != principal.id {
            return Err(BookingError::Unauthorized(principal.id.clone()));
        }

        let now = self.clock.now();
        if !policy::within_cancellation_window(reservation.created_at, now) {
            return Err(BookingError::CancellationWindowExpired {
                booked_at: reservation.created_at,
                elapsed_minutes: now.signed_duration_since(reservation.created_at).num_minutes(),
                limit_minutes: CANCELLATION_WINDOW_MINUTES,
            });
        }

        self.storage.delete_reservation(reservation_id).await?;
        self.logging
            .log_action(
                RESERVATION_CANCELLED,
                json!({ "reservation_id": reservation_id, "studio_id": reservation.studio_id }),
                Some(principal.id.as_str()),
                self.clock.now(),
            )
            .await?;
        Ok(())
    }

    /// Admins see every reservation; everyone else only the ones they made.
    pub async fn list_reservations(&self, principal: &Principal) -> Result<Vec<Reservation>, BookingError> {
        let reservations = if principal.role.can_view_all_reservations() {
            self.storage.get_all_reservations().await?
        } else {
            self.storage.get_reservations_by_customer(&principal.id).await?
        };
        self.logging
            .log_action(
                RESERVATIONS_QUERIED,
                json!({ "count": reservations.len() }),
                Some(principal.id.as_str()),
                self.clock.now(),
            )
            .await?;
        Ok(reservations)
    }

    // ---- audit ----------------------------------------------------------

    pub async fn get_app_logs(&self, principal: &Principal) -> Result<Vec<AppLog>, BookingError> {
        if !principal.role.is_admin() {
            return Err(BookingError::Unauthorized(principal.id.clone()));
        }
        self.logging.get_logs().await
    }

    async fn require_studio(&self, studio_id: &str) -> Result<Studio, BookingError> {
        self.storage
            .get_studio(studio_id)
            .await?
            .ok_or_else(|| BookingError::StudioNotFound(studio_id.to_string()))
    }
}
