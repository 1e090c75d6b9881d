use authdeck_core::api::{ApiClient, ApiError, RegisterRequest};
use authdeck_core::auth::{
    AuthError, AuthSession, AuthStep, PasswordRecovery, ResetLink, SessionSettings,
    ValidationError,
};
use authdeck_core::routes::Route;
use integration_tests::harness::{CannedResponse, MockApi};
use pretty_assertions::assert_eq;
use serde_json::json;

fn client(mock: &MockApi) -> ApiClient {
    let cfg = mock.config();
    ApiClient::new(&cfg.base_url().unwrap(), cfg.timeout()).unwrap()
}

#[tokio::test]
async fn login_with_second_factor_lands_on_home() {
    // Arrange
    let mock = MockApi::start(vec![
        (
            "POST",
            "/login",
            CannedResponse::json(200, json!({"userId": "u-7", "requiresMFA": true})),
        ),
        (
            "POST",
            "/verify-otp",
            CannedResponse::json(200, json!({"success": true})),
        ),
    ]);
    let mut session = AuthSession::new(client(&mock), SessionSettings::from(&mock.config()));

    // Act
    session.login("ana@example.test", "secret").await.unwrap();
    session.verify_otp(None, "123456").await.unwrap();

    // Assert
    assert_eq!(
        session.step(),
        &AuthStep::Authenticated {
            user_id: Some("u-7".to_string())
        }
    );
    assert_eq!(session.home_route().unwrap().path(), "/home?idUs=u-7");
    assert_eq!(
        mock.requests()[1].body,
        Some(json!({"email": "ana@example.test", "token": "123456"}))
    );
}

#[tokio::test]
async fn rejected_code_shows_server_message_and_allows_retry() {
    // Arrange
    let mock = MockApi::start(vec![
        (
            "POST",
            "/login",
            CannedResponse::json(200, json!({"userId": 7, "requiresMFA": true})),
        ),
        (
            "POST",
            "/verify-otp",
            CannedResponse::json(200, json!({"success": false, "message": "Código inválido"})),
        ),
    ]);
    let mut session = AuthSession::new(client(&mock), SessionSettings::default());
    session.login("ana@example.test", "secret").await.unwrap();

    // Act
    let err = session.verify_otp(None, "000000").await.unwrap_err();

    // Assert
    assert_eq!(err.user_message(), "Código inválido");
    assert_eq!(session.step().route(), Route::VerifyOtp);
}

#[tokio::test]
async fn login_reported_as_unsuccessful_stays_on_login() {
    // Arrange
    let mock = MockApi::start(vec![(
        "POST",
        "/login",
        CannedResponse::json(200, json!({"success": false, "message": "Invalid credentials"})),
    )]);
    let mut session = AuthSession::new(client(&mock), SessionSettings::default());

    // Act
    let err = session
        .login("ana@example.test", "secret")
        .await
        .unwrap_err();

    // Assert
    assert_eq!(err.user_message(), "Invalid credentials");
    assert_eq!(session.step(), &AuthStep::Login);
    assert_eq!(session.home_route(), None);
}

#[tokio::test]
async fn register_reported_as_unsuccessful_shows_server_message() {
    // Arrange
    let mock = MockApi::start(vec![(
        "POST",
        "/api/register",
        CannedResponse::json(200, json!({"success": false, "message": "Email already registered"})),
    )]);
    let mut session = AuthSession::new(client(&mock), SessionSettings::default());
    session.show_register().unwrap();
    let form = RegisterRequest {
        email: "ana@example.test".to_string(),
        username: "ana".to_string(),
        first_name: "Ana".to_string(),
        paternal_surname: "Lopez".to_string(),
        maternal_surname: "Ruiz".to_string(),
        group: "7A".to_string(),
        password: "secret1".to_string(),
    };

    // Act
    let err = session.register(&form).await.unwrap_err();

    // Assert
    assert!(matches!(err, AuthError::Api(ApiError::Rejected { .. })));
    assert_eq!(err.user_message(), "Email already registered");
    assert_eq!(session.step(), &AuthStep::Register);
}

#[tokio::test]
async fn mismatched_reset_confirmation_never_reaches_the_server() {
    // Arrange
    let mock = MockApi::start(vec![(
        "POST",
        "/reset-password",
        CannedResponse::json(200, json!({"success": true})),
    )]);
    let api = client(&mock);
    let recovery = PasswordRecovery::from_config(&api, &mock.config());
    let link = ResetLink::parse(&format!("{}/reset-password?userId=5", mock.base_url())).unwrap();

    // Act
    let err = recovery
        .reset_with_user_id(&link, "123456", "longpassword", "different-password")
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(
        err,
        AuthError::Validation(ValidationError::Mismatch)
    ));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn forgot_password_then_reset_with_token() {
    // Arrange
    let mock = MockApi::start(vec![
        (
            "POST",
            "/request-password-reset",
            CannedResponse::json(
                200,
                json!({"success": true, "resetToken": "rt-1", "mfaSecret": "ABC"}),
            ),
        ),
        (
            "POST",
            "/reset-password",
            CannedResponse::json(200, json!({"message": "ok"})),
        ),
    ]);
    let api = client(&mock);
    let recovery = PasswordRecovery::from_config(&api, &mock.config());

    // Act
    let ticket = recovery.request_reset("ana@example.test").await.unwrap();
    recovery
        .reset_with_token(&ticket, "123456", "newpass")
        .await
        .unwrap();

    // Assert
    let paths: Vec<_> = mock.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/request-password-reset", "/reset-password"]);
    assert_eq!(
        mock.requests()[1].body,
        Some(json!({"resetToken": "rt-1", "mfaCode": "123456", "newPassword": "newpass"}))
    );
}
