//! Shared fixtures for handler tests.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test as actix_test;

use crate::domain::UserId;
use crate::domain::ports::FIXTURE_USER_ID;
use crate::inbound::http::auth::CredentialsRequest;

/// Cookie-session middleware for in-process tests.
///
/// Signs with a throwaway key and drops the `Secure` flag so the cookie
/// survives the test harness's plain-HTTP requests.
pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The user id handed out by `FixtureLoginService`, parsed.
pub fn fixture_user_id() -> UserId {
    UserId::new(FIXTURE_USER_ID).expect("fixture user id parses")
}

/// Log in as the fixture `admin` user and return the session cookie.
///
/// The app under test must mount `auth::login` under `/api` and be wired to
/// `FixtureLoginService`.
pub async fn fixture_login_cookie(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> Cookie<'static> {
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&CredentialsRequest {
            username: "admin".into(),
            password: "password".into(),
        })
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "fixture login failed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("login sets the session cookie")
        .into_owned()
}
