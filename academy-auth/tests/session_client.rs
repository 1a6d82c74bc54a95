use academy_api::endpoints::auth::{GetProfile, UpdateProfile};
use academy_api::endpoints::users::Register;
use academy_api::endpoints::video::ListCourses;
use academy_api::{ApiError, RequestDescriptor};
use academy_auth::{AuthError, SessionClient, SessionStore, Settings};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client_for(server: &MockServer, session: Arc<SessionStore>) -> SessionClient {
    let settings = Settings {
        api_url: server.uri(),
        ..Settings::default()
    };
    SessionClient::from_settings(&settings, session).unwrap()
}

fn session_with(access: &str, refresh: &str) -> Arc<SessionStore> {
    let session = Arc::new(SessionStore::in_memory());
    session.set(access, refresh).unwrap();
    session
}

fn no_authorization(request: &Request) -> bool {
    !request.headers.contains_key("authorization")
}

fn profile_body(username: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "full_name": "Ada Lovelace",
        "college": null,
        "bio": "",
        "profile_image_url": null
    })
}

async fn mount_refresh(server: &MockServer, response: ResponseTemplate, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn public_read_with_stale_token_retries_anonymously_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/video/courses/"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/video/courses/"))
        .and(no_authorization)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Intro to IoT", "rating": "4.5"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, ResponseTemplate::new(200), 0).await;

    let session = session_with("stale", "refresh-1");
    let client = client_for(&server, session.clone());

    let courses = client.send_json(&ListCourses::new()).await.unwrap();
    let courses = courses.into_items();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].title, "Intro to IoT");
    // The anonymous retry does not touch the session.
    assert_eq!(session.get().access_token(), Some("stale"));
}

#[tokio::test]
async fn anonymous_retry_that_fails_again_is_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/video/videos/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    mount_refresh(&server, ResponseTemplate::new(200), 0).await;

    let client = client_for(&server, session_with("stale", "refresh-1"));
    let result = client
        .send(RequestDescriptor::get("/api/video/videos/"))
        .await;

    assert!(matches!(
        result,
        Err(AuthError::Api(ApiError::Unauthorized { .. }))
    ));
}

#[tokio::test]
async fn expired_access_token_is_refreshed_and_request_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .and(header("Authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .and(body_json(json!({"refresh": "refresh-1"})))
        .and(no_authorization)
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access": "fresh", "refresh": "refresh-2"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body("ada")))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_with("expired", "refresh-1");
    let client = client_for(&server, session.clone());

    let profile = client.send_json(&GetProfile).await.unwrap();
    assert_eq!(profile.username, "ada");
    assert_eq!(session.get().access_token(), Some("fresh"));
    assert_eq!(session.get().refresh_token(), Some("refresh-2"));
}

#[tokio::test]
async fn unrotated_refresh_token_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .and(header("Authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body("ada")))
        .mount(&server)
        .await;

    let session = session_with("expired", "refresh-1");
    let client = client_for(&server, session.clone());

    client.send_json(&GetProfile).await.unwrap();
    assert_eq!(session.get().access_token(), Some("fresh"));
    assert_eq!(session.get().refresh_token(), Some("refresh-1"));
}

#[tokio::test]
async fn failed_refresh_clears_session_and_reports_refresh_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Given token not valid"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(401).set_body_json(json!({"detail": "Token is invalid or expired"})),
        1,
    )
    .await;

    let session = session_with("expired", "revoked");
    let mut changes = session.subscribe();
    let client = client_for(&server, session.clone());

    let err = client.send_json(&GetProfile).await.unwrap_err();
    assert!(err.is_session_invalid());
    // The refresh failure, not the original 401.
    assert_eq!(
        err.api_error().and_then(ApiError::detail).as_deref(),
        Some("Token is invalid or expired")
    );
    assert!(!session.is_authenticated());
    assert!(session.get().refresh_token().is_none());
    assert!(changes.has_changed().unwrap());
    assert!(!*changes.borrow_and_update());
}

#[tokio::test]
async fn second_401_after_refresh_is_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"access": "fresh", "refresh": "r2"})),
        1,
    )
    .await;

    let session = session_with("expired", "r1");
    let client = client_for(&server, session.clone());

    let result = client.send_json(&GetProfile).await;
    assert!(matches!(
        result,
        Err(AuthError::Api(ApiError::Unauthorized { .. }))
    ));
    // The refresh itself succeeded, so the session survives.
    assert_eq!(session.get().access_token(), Some("fresh"));
}

#[tokio::test]
async fn login_401_never_triggers_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "No active account found with the given credentials"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, ResponseTemplate::new(200), 0).await;

    let session = session_with("old", "old-refresh");
    let client = client_for(&server, session.clone());

    let err = client.login("ada", "wrong").await.unwrap_err();
    assert_eq!(
        err.api_error().and_then(ApiError::detail).as_deref(),
        Some("No active account found with the given credentials")
    );
    // A failed login leaves the existing session alone.
    assert_eq!(session.get().access_token(), Some("old"));
}

#[tokio::test]
async fn protected_401_without_session_is_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .and(no_authorization)
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, ResponseTemplate::new(200), 0).await;

    let client = client_for(&server, Arc::new(SessionStore::in_memory()));
    let result = client.send_json(&GetProfile).await;
    assert!(matches!(
        result,
        Err(AuthError::Api(ApiError::Unauthorized { .. }))
    ));
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, ResponseTemplate::new(200), 0).await;

    let client = client_for(&server, session_with("a", "r"));
    let err = client.send_json(&GetProfile).await.unwrap_err();
    match err {
        AuthError::Api(ApiError::Server { status, body }) => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn login_stores_token_pair_without_sending_stale_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(no_authorization)
        .and(body_json(json!({"username": "ada", "password": "secret"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "A1", "refresh": "R1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = session_with("stale", "stale-refresh");
    let client = client_for(&server, session.clone());

    client.login("ada", "secret").await.unwrap();
    assert_eq!(session.get().access_token(), Some("A1"));
    assert_eq!(session.get().refresh_token(), Some("R1"));
}

#[tokio::test]
async fn register_surfaces_field_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/register/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "username": ["A user with that username already exists."]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(SessionStore::in_memory()));
    let err = client
        .register(&Register::new("ada", "ada@example.com", "secret"))
        .await
        .unwrap_err();

    let fields = err.api_error().map(ApiError::field_errors).unwrap_or_default();
    assert_eq!(
        fields.get("username").map(Vec::as_slice),
        Some(&["A user with that username already exists.".to_string()][..])
    );
}

#[tokio::test]
async fn unsafe_requests_carry_csrf_cookie_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/csrf/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "csrftoken=csrf-abc; Path=/")
                .set_body_json(json!({"detail": "CSRF cookie set"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/auth/profile/"))
        .and(header("X-CSRFToken", "csrf-abc"))
        .and(header("Authorization", "Bearer a1"))
        .and(body_json(json!({"bio": "Hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body("ada")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, session_with("a1", "r1"));
    client.fetch_csrf().await.unwrap();

    let update = UpdateProfile::new().bio("Hello".to_string());
    let profile = client.send_json(&update).await.unwrap();
    assert_eq!(profile.username, "ada");
}

#[tokio::test]
async fn concurrent_401s_share_one_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .and(header("Authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({"access": "fresh", "refresh": "r2"}))
            .set_delay(Duration::from_millis(200)),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body("ada")))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, session_with("expired", "r1"));
    let (first, second) = tokio::join!(client.send_json(&GetProfile), client.send_json(&GetProfile));

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(client.session().get().refresh_token(), Some("r2"));
}

#[tokio::test]
async fn concurrent_401s_share_a_failed_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    mount_refresh(
        &server,
        ResponseTemplate::new(401)
            .set_body_json(json!({"detail": "Token is blacklisted"}))
            .set_delay(Duration::from_millis(200)),
        1,
    )
    .await;

    let session = session_with("expired", "revoked");
    let client = client_for(&server, session.clone());
    let (first, second) = tokio::join!(client.send_json(&GetProfile), client.send_json(&GetProfile));

    for result in [first, second] {
        let err = result.unwrap_err();
        assert!(err.is_session_invalid(), "expected session invalid, got {}", err);
        assert_eq!(
            err.api_error().and_then(ApiError::detail).as_deref(),
            Some("Token is blacklisted")
        );
    }
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn logout_clears_immediately() {
    let server = MockServer::start().await;
    let session = session_with("a", "r");
    let client = client_for(&server, session.clone());

    client.logout().unwrap();
    assert!(!session.is_authenticated());
    // Logging out twice is harmless.
    client.logout().unwrap();
}
