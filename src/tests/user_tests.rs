use crate::core::errors::PortalError;
use crate::core::services::UserListQuery;
use crate::tests::create_test_service;
use uuid::Uuid;

#[tokio::test]
async fn test_register_hashes_password() {
    let service = create_test_service();
    let user = service
        .register("Asha", "asha@example.com", "secret123")
        .await
        .unwrap();
    assert_eq!(user.name, "Asha");
    assert_eq!(user.email, "asha@example.com");
    assert_ne!(user.password_hash, "secret123");
    assert!(bcrypt::verify("secret123", &user.password_hash).unwrap());
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let service = create_test_service();
    service
        .register("Asha", "asha@example.com", "secret123")
        .await
        .unwrap();
    let result = service
        .register("Impostor", "asha@example.com", "other456")
        .await;
    assert!(matches!(result, Err(PortalError::EmailTaken)));
}

#[tokio::test]
async fn test_register_rejects_missing_fields() {
    let service = create_test_service();
    let result = service.register("Asha", "", "secret123").await;
    assert!(matches!(result, Err(PortalError::Validation(_))));
    let result = service.register("", "asha@example.com", "secret123").await;
    assert!(matches!(result, Err(PortalError::Validation(_))));
}

#[tokio::test]
async fn test_login_returns_stored_profile() {
    let service = create_test_service();
    service
        .register("Asha", "asha@example.com", "secret123")
        .await
        .unwrap();
    let user = service.login("asha@example.com", "secret123").await.unwrap();
    assert_eq!(user.name, "Asha");
    assert_eq!(user.email, "asha@example.com");
}

#[tokio::test]
async fn test_login_failure_is_indistinguishable() {
    let service = create_test_service();
    service
        .register("Asha", "asha@example.com", "secret123")
        .await
        .unwrap();

    let wrong_password = service.login("asha@example.com", "nope").await.unwrap_err();
    let unknown_email = service.login("ghost@example.com", "nope").await.unwrap_err();

    assert!(matches!(wrong_password, PortalError::InvalidCredentials));
    assert!(matches!(unknown_email, PortalError::InvalidCredentials));
    // Same message either way, so emails cannot be enumerated.
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_list_users_searches_name_and_email() {
    let service = create_test_service();
    service
        .register("Asha Rao", "asha@example.com", "pw111111")
        .await
        .unwrap();
    service
        .register("Bala", "bala@example.com", "pw222222")
        .await
        .unwrap();
    service
        .register("Chitra", "chitra@mail.test", "pw333333")
        .await
        .unwrap();

    let page = service
        .list_users(UserListQuery {
            search: Some("ASHA".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.users.len(), 1);
    assert_eq!(page.users[0].email, "asha@example.com");

    // Matches the email domain too.
    let page = service
        .list_users(UserListQuery {
            search: Some("example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.users.len(), 2);
}

#[tokio::test]
async fn test_list_users_paginates() {
    let service = create_test_service();
    for i in 0..5 {
        service
            .register(&format!("User {i}"), &format!("u{i}@example.com"), "pw123456")
            .await
            .unwrap();
    }

    let page = service
        .list_users(UserListQuery {
            page: Some(2),
            limit: Some(2),
            search: None,
        })
        .await
        .unwrap();
    assert_eq!(page.users.len(), 2);
    assert_eq!(page.total_pages, 3);

    let all = service
        .list_users(UserListQuery {
            limit: Some(0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all.users.len(), 5);
    assert_eq!(all.total_pages, 1);
}

#[tokio::test]
async fn test_update_user() {
    let service = create_test_service();
    let user = service
        .register("Asha", "asha@example.com", "secret123")
        .await
        .unwrap();

    let updated = service
        .update_user(user.id, "Asha Rao", "asha.rao@example.com")
        .await
        .unwrap();
    assert_eq!(updated.id, user.id);
    assert_eq!(updated.name, "Asha Rao");
    assert_eq!(updated.email, "asha.rao@example.com");

    let result = service.update_user(Uuid::new_v4(), "Ghost", "g@example.com").await;
    assert!(matches!(result, Err(PortalError::UserNotFound)));
}

#[tokio::test]
async fn test_update_user_keeps_emails_unique() {
    let service = create_test_service();
    let asha = service
        .register("Asha", "asha@example.com", "pw111111")
        .await
        .unwrap();
    service
        .register("Bala", "bala@example.com", "pw222222")
        .await
        .unwrap();

    let result = service
        .update_user(asha.id, "Asha", "bala@example.com")
        .await;
    assert!(matches!(result, Err(PortalError::EmailTaken)));
}

#[tokio::test]
async fn test_delete_user() {
    let service = create_test_service();
    let user = service
        .register("Asha", "asha@example.com", "secret123")
        .await
        .unwrap();

    service.delete_user(user.id).await.unwrap();
    let result = service.delete_user(user.id).await;
    assert!(matches!(result, Err(PortalError::UserNotFound)));

    let result = service.get_user_by_email("asha@example.com").await;
    assert!(matches!(result, Err(PortalError::UserNotFound)));
}

#[tokio::test]
async fn test_change_password_with_wrong_old_password_keeps_hash() {
    let service = create_test_service();
    service
        .register("Asha", "asha@example.com", "secret123")
        .await
        .unwrap();

    let result = service
        .change_user_password("asha@example.com", "wrong-old", "newpass99")
        .await;
    assert!(matches!(result, Err(PortalError::IncorrectOldPassword)));

    // Old credential still valid, new one is not.
    service.login("asha@example.com", "secret123").await.unwrap();
    let result = service.login("asha@example.com", "newpass99").await;
    assert!(matches!(result, Err(PortalError::InvalidCredentials)));
}

#[tokio::test]
async fn test_change_password_success() {
    let service = create_test_service();
    service
        .register("Asha", "asha@example.com", "secret123")
        .await
        .unwrap();

    service
        .change_user_password("asha@example.com", "secret123", "newpass99")
        .await
        .unwrap();

    service.login("asha@example.com", "newpass99").await.unwrap();
    let result = service.login("asha@example.com", "secret123").await;
    assert!(matches!(result, Err(PortalError::InvalidCredentials)));
}

#[tokio::test]
async fn test_change_password_unknown_email() {
    let service = create_test_service();
    let result = service
        .change_user_password("ghost@example.com", "a", "b")
        .await;
    assert!(matches!(result, Err(PortalError::UserNotFound)));
}
