use crate::core::errors::BookingError;
use crate::core::models::user::Role;
use crate::core::services::StudioUpdate;
use crate::infrastructure::storage::Storage;
use crate::tests::{create_test_service, principal_of, register};

#[tokio::test]
async fn test_create_studio_requires_owner_role() {
    let (service, _clock, _storage) = create_test_service();
    let customer = register(&service, Role::Customer, "carol", "+201000000001").await;

    let result = service
        .create_studio(
            &principal_of(&customer),
            "Sunset Studio".to_string(),
            "12 Nile St".to_string(),
            900,
            4,
            vec![],
        )
        .await;
    assert!(matches!(result, Err(BookingError::NotStudioOwner(_))));
}

#[tokio::test]
async fn test_create_studio_with_images() {
    let (service, _clock, _storage) = create_test_service();
    let owner = register(&service, Role::StudioOwner, "owner", "+201000000002").await;

    let details = service
        .create_studio(
            &principal_of(&owner),
            "Sunset Studio".to_string(),
            "12 Nile St".to_string(),
            900,
            4,
            vec!["a.jpg".to_string(), "b.jpg".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(details.studio.owner_id, owner.id);
    assert_eq!(details.images.len(), 2);

    let fetched = service.get_studio(&details.studio.id).await.unwrap();
    assert_eq!(fetched.images.len(), 2);
    assert!(fetched.images.iter().all(|i| i.studio_id == details.studio.id));
}

#[tokio::test]
async fn test_create_studio_invalid_rate() {
    let (service, _clock, _storage) = create_test_service();
    let owner = register(&service, Role::StudioOwner, "owner", "+201000000002").await;

    for rate in [0u8, 6] {
        let result = service
            .create_studio(
                &principal_of(&owner),
                "Sunset Studio".to_string(),
                "12 Nile St".to_string(),
                900,
                rate,
                vec![],
            )
            .await;
        assert!(matches!(result, Err(BookingError::InvalidInput(ref field, _)) if field == "rate"));
    }
}

#[tokio::test]
async fn test_update_studio_owner_only() {
    let (service, _clock, _storage) = create_test_service();
    let owner = register(&service, Role::StudioOwner, "owner", "+201000000002").await;
    let rival = register(&service, Role::StudioOwner, "rival", "+201000000003").await;
    let admin = register(&service, Role::Admin, "admin", "+201000000004").await;

    let details = service
        .create_studio(
            &principal_of(&owner),
            "Sunset Studio".to_string(),
            "12 Nile St".to_string(),
            900,
            4,
            vec![],
        )
        .await
        .unwrap();

    let result = service
        .update_studio(
            &principal_of(&rival),
            &details.studio.id,
            StudioUpdate {
                price: Some(100),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(BookingError::Unauthorized(_))));

    let updated = service
        .update_studio(
            &principal_of(&owner),
            &details.studio.id,
            StudioUpdate {
                price: Some(1200),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 1200);

    let updated = service
        .update_studio(
            &principal_of(&admin),
            &details.studio.id,
            StudioUpdate {
                rate: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.rate, 5);
}

#[tokio::test]
async fn test_delete_studio_cascades_images() {
    let (service, _clock, storage) = create_test_service();
    let owner = register(&service, Role::StudioOwner, "owner", "+201000000002").await;

    let details = service
        .create_studio(
            &principal_of(&owner),
            "Sunset Studio".to_string(),
            "12 Nile St".to_string(),
            900,
            4,
            vec!["a.jpg".to_string()],
        )
        .await
        .unwrap();

    service
        .delete_studio(&principal_of(&owner), &details.studio.id)
        .await
        .unwrap();

    let result = service.get_studio(&details.studio.id).await;
    assert!(matches!(result, Err(BookingError::StudioNotFound(_))));
    // Images went with the studio.
    let images = storage.get_studio_images(&details.studio.id).await.unwrap();
    assert!(images.is_empty());
}

#[tokio::test]
async fn test_list_studios_owner_profile() {
    let (service, _clock, _storage) = create_test_service();
    let owner = register(&service, Role::StudioOwner, "owner", "+201000000002").await;
    let rival = register(&service, Role::StudioOwner, "rival", "+201000000003").await;

    for (who, name) in [(&owner, "Sunset"), (&owner, "Moonrise"), (&rival, "Harbor")] {
        service
            .create_studio(
                &principal_of(who),
                name.to_string(),
                "12 Nile St".to_string(),
                900,
                4,
                vec![],
            )
            .await
            .unwrap();
    }

    let all = service.list_studios(&principal_of(&owner), false).await.unwrap();
    assert_eq!(all.len(), 3);

    let own = service.list_studios(&principal_of(&owner), true).await.unwrap();
    assert_eq!(own.len(), 2);
    assert!(own.iter().all(|s| s.owner_id == owner.id));
}
