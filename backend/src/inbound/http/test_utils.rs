//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use chrono::{DateTime, TimeZone, Utc};
use mockable::{Clock, MockClock};

use super::state::{HttpState, Repositories};
use super::{LoginRequest, api_services};
use crate::domain::seed_dev_accounts;
use crate::outbound::memory::MemoryStore;

/// Shared development password accepted by the test login service.
pub const TEST_PASSWORD: &str = "hostel-dev";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// 2024-01-10T08:00:00Z, the fixed "now" of HTTP tests.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn fixed_clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(test_now());
    Arc::new(clock)
}

/// Handler state over a fresh in-memory store holding the dev accounts.
pub async fn seeded_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
    seed_dev_accounts(store.as_ref(), test_now())
        .await
        .expect("seed dev accounts");
    HttpState::from_repositories(
        Repositories {
            users: store.clone(),
            outpasses: store.clone(),
            complaints: store.clone(),
            leave_forms: store.clone(),
            attendance: store.clone(),
            hostel_info: store,
        },
        fixed_clock(),
        TEST_PASSWORD,
    )
}

/// The `/api/v1` surface behind a test session middleware.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .configure(api_services),
    )
}

/// A login request for one of the dev accounts.
pub fn login_request(username: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(LoginRequest {
            username: username.to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
}

/// The session cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Log in as a dev account and return its session cookie.
pub async fn login<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, login_request(username).to_request()).await;
    assert!(res.status().is_success(), "login as {username} failed");
    session_cookie(&res)
}
