use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use secrecy::Secret;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use clinic_adapters::{
    Argon2Hasher, InMemoryAddressStore, InMemoryAuditStore, InMemoryClinicStore,
    InMemoryTokenStore, InMemoryUserStore, JwtTokenIssuer, MockEmailClient,
};
use clinic_axum::AppState;
use clinic_service::ClinicService;

struct TestApp {
    router: Router,
    email_client: MockEmailClient,
    audit: InMemoryAuditStore,
}

fn test_app() -> TestApp {
    let email_client = MockEmailClient::new();
    let audit = InMemoryAuditStore::new();

    let state = AppState {
        users: Arc::new(InMemoryUserStore::new()),
        tokens: Arc::new(InMemoryTokenStore::new()),
        audit: Arc::new(audit.clone()),
        clinics: Arc::new(InMemoryClinicStore::new()),
        addresses: Arc::new(InMemoryAddressStore::new()),
        email_client: Arc::new(email_client.clone()),
        hasher: Arc::new(Argon2Hasher::default()),
        token_issuer: Arc::new(JwtTokenIssuer::new(
            Secret::new("test-secret".to_owned()),
            3600,
        )),
        public_base_url: "http://localhost:8080".to_owned(),
        verification_token_ttl: chrono::Duration::hours(24),
    };

    TestApp {
        router: ClinicService::new(state).into_router(&["http://localhost:3000".to_owned()]),
        email_client,
        audit,
    }
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn register_body(email: &str, password: &str, role: &str) -> Value {
    json!({
        "role": role,
        "email": email,
        "password": password,
        "name": "Ivan",
        "gender": "male",
        "age": 30,
        "push_consent": true,
    })
}

/// Pulls the token out of the most recently sent verification email.
async fn last_emailed_token(app: &TestApp) -> String {
    let sent = app.email_client.sent().await;
    let content = &sent.last().expect("no email sent").content;
    content
        .split("token=")
        .nth(1)
        .expect("no token in email")
        .trim()
        .to_owned()
}

async fn register(app: &TestApp, email: &str, password: &str, role: &str) -> Uuid {
    let (status, body) = send(
        &app.router,
        request("POST", "/api/register", None, Some(register_body(email, password, role))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["user_id"].as_str().unwrap().parse().unwrap()
}

async fn login(app: &TestApp, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        &app.router,
        request(
            "POST",
            "/api/login",
            None,
            Some(json!({ "email": email, "password": password })),
        ),
    )
    .await
}

/// Register, follow the emailed activation link and log in.
async fn signup_verified(app: &TestApp, email: &str, password: &str, role: &str) -> (Uuid, String) {
    let user_id = register(app, email, password, role).await;

    let token = last_emailed_token(app).await;
    let (status, _) = send(
        &app.router,
        request("GET", &format!("/api/verify?token={token}"), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = login(app, email, password).await;
    assert_eq!(status, StatusCode::OK);
    (user_id, body["token"].as_str().unwrap().to_owned())
}

#[tokio::test]
async fn register_verify_login_flow() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        request(
            "POST",
            "/api/register",
            None,
            Some(register_body("ivan@example.com", "password1", "user")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], "1");
    assert_eq!(body["message"], "successfully created");

    let sent = app.email_client.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ivan@example.com");
    assert_eq!(sent[0].subject, "Confirm your account");

    // Unverified accounts cannot log in.
    let (status, _) = login(&app, "ivan@example.com", "password1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let token = last_emailed_token(&app).await;
    let (status, body) = send(
        &app.router,
        request("GET", &format!("/api/verify?token={token}"), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, body) = login(&app, "ivan@example.com", "password1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn verification_token_is_single_use() {
    let app = test_app();
    register(&app, "ivan@example.com", "password1", "user").await;
    let token = last_emailed_token(&app).await;

    let uri = format!("/api/verify?token={token}");
    let (status, _) = send(&app.router, request("GET", &uri, None, None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app.router, request("GET", &uri, None, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn login_failures_are_uniform() {
    let app = test_app();
    signup_verified(&app, "ivan@example.com", "password1", "user").await;

    let (unknown_status, unknown_body) = login(&app, "nobody@example.com", "password1").await;
    let (wrong_status, wrong_body) = login(&app, "ivan@example.com", "wrongpass1").await;

    assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    // Bodies must not reveal whether the account exists.
    assert_eq!(unknown_body, wrong_body);
    assert_eq!(unknown_body["error"], "Invalid credentials");
}

#[tokio::test]
async fn login_attempts_are_audited() {
    let app = test_app();
    let (user_id, _) = signup_verified(&app, "ivan@example.com", "password1", "user").await;

    login(&app, "ivan@example.com", "wrongpass1").await;

    let attempts = app.audit.attempts().await;
    // Failed attempt carries the matched account id, the signup login is a success.
    let last = attempts.last().unwrap();
    assert_eq!(last.user_id, Some(user_id));
    assert!(!last.success);
    assert!(attempts.iter().any(|a| a.success && a.user_id == Some(user_id)));
}

#[tokio::test]
async fn private_routes_require_bearer_token() {
    let app = test_app();

    let (status, body) = send(&app.router, request("GET", "/api/users", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing token");

    // Wrong scheme and empty token are rejected without panicking.
    for auth_value in ["Token abc", "Bearer ", "Bearer"] {
        let req = Request::builder()
            .method("GET")
            .uri("/api/users")
            .header(header::AUTHORIZATION, auth_value)
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app.router, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "header {auth_value:?}");
    }

    let (status, body) = send(
        &app.router,
        request("GET", "/api/users", Some("not-a-jwt"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn profile_read_and_update() {
    let app = test_app();
    let (user_id, token) = signup_verified(&app, "ivan@example.com", "password1", "user").await;

    let (status, body) = send(
        &app.router,
        request("GET", &format!("/api/users/{user_id}"), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ivan@example.com");
    assert_eq!(body["is_verified"], true);
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    let (status, body) = send(
        &app.router,
        request(
            "PUT",
            &format!("/api/users/{user_id}"),
            Some(&token),
            Some(json!({
                "role": "user",
                "email": "ivan@example.com",
                "name": "Boris",
                "gender": "male",
                "age": 31,
                "push_consent": false,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Boris");
    assert_eq!(body["age"], 31);
}

#[tokio::test]
async fn delete_account_permissions() {
    let app = test_app();
    let (alice_id, _) = signup_verified(&app, "alice@example.com", "password1", "user").await;
    let (bob_id, bob_token) = signup_verified(&app, "bob@example.com", "password1", "user").await;
    let (_, admin_token) = signup_verified(&app, "admin@example.com", "password1", "admin").await;

    // A regular user cannot delete someone else.
    let (status, _) = send(
        &app.router,
        request("DELETE", &format!("/api/users/{alice_id}"), Some(&bob_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Self-deletion is allowed.
    let (status, body) = send(
        &app.router,
        request("DELETE", &format!("/api/users/{bob_id}"), Some(&bob_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");

    // Admins can delete anyone; a second delete is a 404.
    let (status, _) = send(
        &app.router,
        request("DELETE", &format!("/api/users/{alice_id}"), Some(&admin_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app.router,
        request("DELETE", &format!("/api/users/{alice_id}"), Some(&admin_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_password_flow() {
    let app = test_app();
    let (_, token) = signup_verified(&app, "ivan@example.com", "password1", "user").await;

    let (status, _) = send(
        &app.router,
        request(
            "POST",
            "/api/users/update-password",
            Some(&token),
            Some(json!({ "old_password": "wrongpass1", "new_password": "password2" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app.router,
        request(
            "POST",
            "/api/users/update-password",
            Some(&token),
            Some(json!({ "old_password": "password1", "new_password": "password2" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], "successfully");

    let (status, _) = login(&app, "ivan@example.com", "password1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = login(&app, "ivan@example.com", "password2").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn weak_new_password_is_rejected() {
    let app = test_app();
    let (_, token) = signup_verified(&app, "ivan@example.com", "password1", "user").await;

    let (status, body) = send(
        &app.router,
        request(
            "POST",
            "/api/users/update-password",
            Some(&token),
            Some(json!({ "old_password": "password1", "new_password": "short" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "weak password");
}

#[tokio::test]
async fn update_email_flow() {
    let app = test_app();
    let (user_id, token) = signup_verified(&app, "ivan@example.com", "password1", "user").await;

    let (status, _) = send(
        &app.router,
        request(
            "POST",
            "/api/users/update-email",
            Some(&token),
            Some(json!({ "new_email": "new@example.com" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let sent = app.email_client.sent().await;
    assert_eq!(sent.last().unwrap().to, "new@example.com");

    let change_token = last_emailed_token(&app).await;
    let uri = format!("/api/users/verify-email?token={change_token}");
    let (status, body) = send(&app.router, request("GET", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], "successfully");

    let (status, body) = send(
        &app.router,
        request("GET", &format!("/api/users/{user_id}"), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "new@example.com");

    // The change token is consume-once as well.
    let (status, _) = send(&app.router, request("GET", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_validation_and_duplicates() {
    let app = test_app();

    let (status, _) = send(
        &app.router,
        request(
            "POST",
            "/api/register",
            None,
            Some(register_body("not-an-email", "password1", "user")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app.router,
        request(
            "POST",
            "/api/register",
            None,
            Some(register_body("ivan@example.com", "short", "user")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    register(&app, "ivan@example.com", "password1", "user").await;
    let (status, body) = send(
        &app.router,
        request(
            "POST",
            "/api/register",
            None,
            Some(register_body("ivan@example.com", "password1", "user")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn clinic_crud_and_address_links() {
    let app = test_app();
    let (_, token) = signup_verified(&app, "admin@example.com", "password1", "admin").await;

    // Mutations are guarded.
    let (status, _) = send(
        &app.router,
        request("POST", "/api/clinics", None, Some(json!({ "name": "Smile", "phone": "+1" }))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Phone is mandatory.
    let (status, _) = send(
        &app.router,
        request("POST", "/api/clinics", Some(&token), Some(json!({ "name": "Smile" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app.router,
        request(
            "POST",
            "/api/clinics",
            Some(&token),
            Some(json!({ "name": "Smile", "phone": "+123", "description": "Dental" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], true);
    let clinic_id = body["id"].as_str().unwrap().to_owned();

    // Reads are public.
    let (status, body) = send(&app.router, request("GET", "/api/clinics", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app.router,
        request("GET", &format!("/api/clinics/{clinic_id}"), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Smile");

    // Update keeps created_at and is_active.
    let created_at = body["created_at"].clone();
    let (status, body) = send(
        &app.router,
        request(
            "PUT",
            &format!("/api/clinics/{clinic_id}"),
            Some(&token),
            Some(json!({ "name": "Smile Plus", "phone": "+123" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Smile Plus");
    assert_eq!(body["created_at"], created_at);

    // Link an address.
    let (status, body) = send(
        &app.router,
        request(
            "POST",
            "/api/addresses",
            Some(&token),
            Some(json!({ "country": "NL", "city": "Utrecht", "street": "Main", "building": "1" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let address_id = body["id"].as_str().unwrap().to_owned();

    let (status, _) = send(
        &app.router,
        request(
            "POST",
            &format!("/api/clinics/{clinic_id}/addresses"),
            Some(&token),
            Some(json!({ "address_id": address_id, "is_main": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Linking an unknown address fails.
    let (status, _) = send(
        &app.router,
        request(
            "POST",
            &format!("/api/clinics/{clinic_id}/addresses"),
            Some(&token),
            Some(json!({ "address_id": Uuid::new_v4() })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app.router,
        request(
            "GET",
            &format!("/api/clinics/{clinic_id}/addresses"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let links = body.as_array().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["address_id"], address_id.as_str());
    assert_eq!(links[0]["is_main"], true);

    let (status, _) = send(
        &app.router,
        request("DELETE", &format!("/api/clinics/{clinic_id}"), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app.router,
        request("GET", &format!("/api/clinics/{clinic_id}"), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn address_crud() {
    let app = test_app();
    let (_, token) = signup_verified(&app, "admin@example.com", "password1", "admin").await;

    let (status, body) = send(
        &app.router,
        request(
            "POST",
            "/api/addresses",
            Some(&token),
            Some(json!({
                "country": "NL",
                "city": "Utrecht",
                "street": "Main",
                "building": "1",
                "latitude": 52.09,
                "longitude": 5.12,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let address_id = body["id"].as_str().unwrap().to_owned();

    let (status, body) = send(
        &app.router,
        request("GET", &format!("/api/addresses/{address_id}"), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Utrecht");

    let (status, body) = send(
        &app.router,
        request("GET", "/api/addresses", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app.router,
        request("DELETE", &format!("/api/addresses/{address_id}"), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app.router,
        request("GET", &format!("/api/addresses/{address_id}"), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Address not found");
}
