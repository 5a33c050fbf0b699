use sitelens::{
    repositories::user_repository::SqliteUserRepository,
    services::auth_service::{AuthService, AuthServiceError, LoginRequest},
    services::user_service::{RegisterRequest, UserService, UserServiceError},
    test_utils::test_helpers,
};
use std::sync::Arc;

#[tokio::test]
async fn test_register_success() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = UserService::new(repository);

    let request = RegisterRequest {
        username: "alice".to_string(),
        password: "password123".to_string(),
    };

    let user = service.register(request).await.unwrap();
    assert_eq!(user.username, "alice");
    assert!(!user.is_admin);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = UserService::new(repository);

    let first = RegisterRequest {
        username: "duplicate".to_string(),
        password: "password123".to_string(),
    };
    assert!(service.register(first).await.is_ok());

    // Second registration with the same username must fail even with a
    // different password
    let second = RegisterRequest {
        username: "duplicate".to_string(),
        password: "password456".to_string(),
    };
    let result = service.register(second).await;
    assert!(matches!(result, Err(UserServiceError::UsernameTaken)));
}

#[tokio::test]
async fn test_password_stored_as_argon2_hash() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = UserService::new(repository);

    let request = RegisterRequest {
        username: "hashcheck".to_string(),
        password: "cleartext-password".to_string(),
    };

    let user = service.register(request).await.unwrap();
    assert!(user.password_hash.starts_with("$argon2"));
    assert_ne!(user.password_hash, "cleartext-password");
    assert!(service.verify_password("cleartext-password", &user.password_hash));
}

#[tokio::test]
async fn test_wrong_password_fails_regardless_of_prior_logins() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let user_service = UserService::new(repository.clone());
    let auth_service = AuthService::new(repository);

    let request = RegisterRequest {
        username: "bob".to_string(),
        password: "correct-horse".to_string(),
    };
    user_service.register(request).await.unwrap();

    // Several successful logins first
    for _ in 0..3 {
        let ok = auth_service
            .authenticate(LoginRequest {
                username: "bob".to_string(),
                password: "correct-horse".to_string(),
            })
            .await;
        assert!(ok.is_ok());
    }

    // A wrong password still fails
    let result = auth_service
        .authenticate(LoginRequest {
            username: "bob".to_string(),
            password: "battery-staple".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));

    // And the correct one still works afterwards
    let ok = auth_service
        .authenticate(LoginRequest {
            username: "bob".to_string(),
            password: "correct-horse".to_string(),
        })
        .await;
    assert!(ok.is_ok());
}

#[tokio::test]
async fn test_list_users_with_limit_and_offset() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let service = UserService::new(repository);

    for i in 0..5 {
        let request = RegisterRequest {
            username: format!("user{}", i),
            password: "password123".to_string(),
        };
        service.register(request).await.unwrap();
    }

    let users = service.list_users(None, None).await.unwrap();
    assert_eq!(users.len(), 5);

    let limited = service.list_users(Some(3), None).await.unwrap();
    assert_eq!(limited.len(), 3);

    let offset = service.list_users(Some(10), Some(2)).await.unwrap();
    assert_eq!(offset.len(), 3);
}
