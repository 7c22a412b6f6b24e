use chrono::NaiveDate;

use crate::core::errors::BookingError;
use crate::core::models::user::Role;
use crate::core::services::UserUpdate;
use crate::infrastructure::storage::Storage;
use crate::tests::{create_test_service, principal_of, register};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_register_user() {
    let (service, _clock, _storage) = create_test_service();
    let user = register(&service, Role::Customer, "alice", "+201000000001").await;
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, Role::Customer);
    // Password is stored hashed, never verbatim.
    assert_ne!(user.password, "hunter22");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (service, _clock, _storage) = create_test_service();
    register(&service, Role::Customer, "alice", "+201000000001").await;
    let result = service
        .register_user(
            "Other Alice".to_string(),
            "alice@example.com".to_string(),
            "+201000000002".to_string(),
            "hunter22".to_string(),
            Role::Customer,
        )
        .await;
    assert!(matches!(result, Err(BookingError::EmailAlreadyRegistered(_))));
}

#[tokio::test]
async fn test_register_duplicate_phone() {
    let (service, _clock, _storage) = create_test_service();
    register(&service, Role::Customer, "alice", "+201000000001").await;
    let result = service
        .register_user(
            "Bob".to_string(),
            "bob@example.com".to_string(),
            "+201000000001".to_string(),
            "hunter22".to_string(),
            Role::Customer,
        )
        .await;
    assert!(matches!(result, Err(BookingError::PhoneAlreadyRegistered(_))));
}

#[tokio::test]
async fn test_register_invalid_email() {
    let (service, _clock, _storage) = create_test_service();
    let result = service
        .register_user(
            "Bad Email".to_string(),
            "invalid".to_string(),
            "+201000000003".to_string(),
            "hunter22".to_string(),
            Role::Customer,
        )
        .await;
    assert!(matches!(result, Err(BookingError::InvalidInput(_, _))));
}

#[tokio::test]
async fn test_login_by_email_and_phone() {
    let (service, _clock, _storage) = create_test_service();
    let user = register(&service, Role::StudioOwner, "owner", "+201000000004").await;

    let token = service.authenticate("owner@example.com", "hunter22").await.unwrap();
    let claims = service.validate_token(&token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.role, Role::StudioOwner);

    // Phone works as the identifier too.
    let token = service.authenticate("+201000000004", "hunter22").await.unwrap();
    let claims = service.validate_token(&token).unwrap();
    assert_eq!(claims.sub, user.id);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (service, _clock, _storage) = create_test_service();
    register(&service, Role::Customer, "alice", "+201000000001").await;
    let result = service.authenticate("alice@example.com", "wrong").await;
    assert!(matches!(result, Err(BookingError::InvalidCredentials)));

    // Unknown identifier fails identically, masking existence.
    let result = service.authenticate("nobody@example.com", "hunter22").await;
    assert!(matches!(result, Err(BookingError::InvalidCredentials)));
}

#[tokio::test]
async fn test_register_overlong_email() {
    let (service, _clock, _storage) = create_test_service();
    let result = service
        .register_user(
            "Long Email".to_string(),
            format!("{}@example.com", "a".repeat(250)),
            "+201000000003".to_string(),
            "hunter22".to_string(),
            Role::Customer,
        )
        .await;
    match result {
        Err(BookingError::InvalidInput(field, _)) => assert_eq!(field, "email"),
        other => panic!("expected InvalidInput on email, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_own_account() {
    let (service, _clock, _storage) = create_test_service();
    let alice = register(&service, Role::Customer, "alice", "+201000000001").await;

    let updated = service
        .update_user(
            &principal_of(&alice),
            UserUpdate {
                name: Some("Alice Renamed".to_string()),
                email: Some("alice.new@example.com".to_string()),
                phone: Some("+201000000009".to_string()),
                password: Some("new-secret".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Alice Renamed");
    assert_eq!(updated.email, "alice.new@example.com");

    // The old identifiers are gone, the new ones log in with the new password.
    let result = service.authenticate("alice@example.com", "new-secret").await;
    assert!(matches!(result, Err(BookingError::InvalidCredentials)));
    service.authenticate("alice.new@example.com", "new-secret").await.unwrap();
    service.authenticate("+201000000009", "new-secret").await.unwrap();
}

#[tokio::test]
async fn test_update_rechecks_uniqueness() {
    let (service, _clock, _storage) = create_test_service();
    let alice = register(&service, Role::Customer, "alice", "+201000000001").await;
    register(&service, Role::Customer, "bob", "+201000000002").await;

    let result = service
        .update_user(
            &principal_of(&alice),
            UserUpdate {
                email: Some("bob@example.com".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(BookingError::EmailAlreadyRegistered(_))));

    let result = service
        .update_user(
            &principal_of(&alice),
            UserUpdate {
                phone: Some("+201000000002".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(BookingError::PhoneAlreadyRegistered(_))));

    // Resubmitting the caller's own email is not a collision.
    let updated = service
        .update_user(
            &principal_of(&alice),
            UserUpdate {
                email: Some("alice@example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.email, "alice@example.com");
}

#[tokio::test]
async fn test_update_rejects_overlong_email() {
    let (service, _clock, _storage) = create_test_service();
    let alice = register(&service, Role::Customer, "alice", "+201000000001").await;

    let result = service
        .update_user(
            &principal_of(&alice),
            UserUpdate {
                email: Some(format!("{}@example.com", "a".repeat(250))),
                ..Default::default()
            },
        )
        .await;
    match result {
        Err(BookingError::InvalidInput(field, _)) => assert_eq!(field, "email"),
        other => panic!("expected InvalidInput on email, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_user_self_or_admin_only() {
    let (service, _clock, _storage) = create_test_service();
    let alice = register(&service, Role::Customer, "alice", "+201000000001").await;
    let bob = register(&service, Role::Customer, "bob", "+201000000002").await;
    let admin = register(&service, Role::Admin, "admin", "+201000000003").await;

    let result = service.delete_user(&principal_of(&bob), &alice.id).await;
    assert!(matches!(result, Err(BookingError::Unauthorized(_))));

    service.delete_user(&principal_of(&alice), &alice.id).await.unwrap();
    let result = service.get_user(&principal_of(&admin), &alice.id).await;
    assert!(matches!(result, Err(BookingError::UserNotFound(_))));

    // Admins may delete any account.
    service.delete_user(&principal_of(&admin), &bob.id).await.unwrap();
    let result = service.get_user(&principal_of(&admin), &bob.id).await;
    assert!(matches!(result, Err(BookingError::UserNotFound(_))));

    // A freed identifier can register again.
    register(&service, Role::Customer, "alice", "+201000000001").await;
}

#[tokio::test]
async fn test_delete_user_cascades() {
    let (service, _clock, storage) = create_test_service();
    let owner = register(&service, Role::StudioOwner, "owner", "+201000009000").await;
    let alice = register(&service, Role::Customer, "alice", "+201000000001").await;
    let admin = register(&service, Role::Admin, "admin", "+201000000003").await;

    let details = service
        .create_studio(
            &principal_of(&owner),
            "Sunset Studio".to_string(),
            "12 Nile St".to_string(),
            900,
            4,
            vec!["http://img/1.jpg".to_string()],
        )
        .await
        .unwrap();
    let studio_id = details.studio.id;
    service
        .create_reservation(&principal_of(&alice), &studio_id, date("2024-06-01"), date("2024-06-05"))
        .await
        .unwrap();

    // Deleting the customer removes their reservation.
    service.delete_user(&principal_of(&alice), &alice.id).await.unwrap();
    assert!(storage.get_all_reservations().await.unwrap().is_empty());

    // Deleting the owner removes the studio and its images.
    service.delete_user(&principal_of(&admin), &owner.id).await.unwrap();
    assert!(storage.get_studio(&studio_id).await.unwrap().is_none());
    assert!(storage.get_studio_images(&studio_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_user_self_or_admin_only() {
    let (service, _clock, _storage) = create_test_service();
    let alice = register(&service, Role::Customer, "alice", "+201000000001").await;
    let bob = register(&service, Role::Customer, "bob", "+201000000002").await;
    let admin = register(&service, Role::Admin, "admin", "+201000000003").await;

    let fetched = service.get_user(&principal_of(&alice), &alice.id).await.unwrap();
    assert_eq!(fetched.id, alice.id);

    let result = service.get_user(&principal_of(&bob), &alice.id).await;
    assert!(matches!(result, Err(BookingError::Unauthorized(_))));

    let fetched = service.get_user(&principal_of(&admin), &alice.id).await.unwrap();
    assert_eq!(fetched.id, alice.id);
}
