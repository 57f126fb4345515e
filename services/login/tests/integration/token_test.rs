use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use uuid::Uuid;

use faregate_auth_types::token::validate_authorization_token;
use faregate_domain::role::Role;
use faregate_login::error::LoginServiceError;
use faregate_login::usecase::activate::{ValidateTravelerInput, ValidateTravelerUseCase};
use faregate_login::usecase::register::{RegisterTravelerInput, RegisterTravelerUseCase};
use faregate_login::usecase::token::{LoginInput, LoginUseCase};

use crate::helpers::{MockNotificationSink, MockStore};

const TTL_MS: u64 = 3_600_000;

fn secret_b64() -> String {
    STANDARD.encode(b"login-service-integration-secret")
}

fn login_usecase(store: &MockStore) -> LoginUseCase<MockStore> {
    LoginUseCase {
        accounts: store.clone(),
        jwt_secret_b64: secret_b64(),
        jwt_ttl_ms: TTL_MS,
    }
}

fn login_input(username: &str, password: &str) -> LoginInput {
    LoginInput {
        username: username.to_owned(),
        password: password.to_owned(),
    }
}

async fn register(store: &MockStore, username: &str, email: &str) -> (Uuid, String) {
    let usecase = RegisterTravelerUseCase {
        accounts: store.clone(),
        notifications: MockNotificationSink::new(),
    };
    let result = usecase
        .execute(RegisterTravelerInput {
            username: username.to_owned(),
            password: "Passw0rd@".to_owned(),
            email: email.to_owned(),
        })
        .await
        .unwrap();
    let code = store
        .activations_handle()
        .lock()
        .unwrap()
        .iter()
        .find(|v| v.provisional_id == result.provisional_id)
        .unwrap()
        .code
        .clone();
    (result.provisional_id, code)
}

async fn activate(store: &MockStore, provisional_id: Uuid, code: &str) {
    ValidateTravelerUseCase {
        accounts: store.clone(),
        activations: store.clone(),
    }
    .execute(ValidateTravelerInput {
        provisional_id,
        code: code.to_owned(),
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn should_reject_login_for_pending_account() {
    let store = MockStore::new();
    register(&store, "alice", "a@bc.com").await;

    // Correct password, but the account has not been activated.
    let result = login_usecase(&store)
        .execute(login_input("alice", "Passw0rd@"))
        .await;
    assert!(matches!(result, Err(LoginServiceError::LoginRejected)));
}

#[tokio::test]
async fn should_login_after_activation_and_issue_valid_token() {
    let store = MockStore::new();
    let (provisional_id, code) = register(&store, "alice", "a@bc.com").await;
    activate(&store, provisional_id, &code).await;

    let token = login_usecase(&store)
        .execute(login_input("alice", "Passw0rd@"))
        .await
        .unwrap();
    assert!(!token.authorization.is_empty());

    let details = validate_authorization_token(&token.authorization, &secret_b64()).unwrap();
    assert_eq!(details.username, "alice");
    assert_eq!(details.roles, vec![Role::Customer]);

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs();
    assert!(details.expires_at > now);
    assert!(details.expires_at <= now + TTL_MS / 1000 + 1);
}

#[tokio::test]
async fn should_reject_token_verified_with_other_secret() {
    let store = MockStore::new();
    let (provisional_id, code) = register(&store, "alice", "a@bc.com").await;
    activate(&store, provisional_id, &code).await;

    let token = login_usecase(&store)
        .execute(login_input("alice", "Passw0rd@"))
        .await
        .unwrap();

    let other = STANDARD.encode(b"some-other-service-secret");
    assert!(validate_authorization_token(&token.authorization, &other).is_err());
}

#[tokio::test]
async fn should_reject_unknown_username() {
    let store = MockStore::new();

    let result = login_usecase(&store)
        .execute(login_input("nobody", "Passw0rd@"))
        .await;
    assert!(matches!(result, Err(LoginServiceError::LoginRejected)));
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let store = MockStore::new();
    let (provisional_id, code) = register(&store, "alice", "a@bc.com").await;
    activate(&store, provisional_id, &code).await;

    let result = login_usecase(&store)
        .execute(login_input("alice", "Passw0rd#"))
        .await;
    assert!(matches!(result, Err(LoginServiceError::LoginRejected)));
}

#[tokio::test]
async fn should_reject_disabled_account() {
    let store = MockStore::new();
    let (provisional_id, code) = register(&store, "alice", "a@bc.com").await;
    activate(&store, provisional_id, &code).await;

    // Disable the account behind the service's back.
    store.accounts_handle().lock().unwrap()[0].active = false;

    let result = login_usecase(&store)
        .execute(login_input("alice", "Passw0rd@"))
        .await;
    assert!(matches!(result, Err(LoginServiceError::LoginRejected)));
}
