//! End-to-end HTTP tests for the `/api/v1` surface.
//!
//! The app is assembled the way the server assembles it: trace middleware
//! outside, cookie sessions on the API scope, handlers from `api_services`.

mod hostel_support;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use hostel::Trace;
use hostel::domain::TRACE_ID_HEADER;
use hostel::inbound::http::api_services;
use rstest::rstest;
use serde_json::{Value, json};

fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

async fn login<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"username": username, "password": hostel_support::PASSWORD}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login as {username}");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

macro_rules! hostel_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(hostel_support::seeded_state().await))
                .wrap(Trace)
                .service(
                    web::scope("/api/v1")
                        .wrap(session_middleware())
                        .configure(api_services),
                ),
        )
        .await
    };
}

#[rstest]
#[actix_web::test]
async fn anonymous_requests_carry_a_trace_id() {
    let app = hostel_app!();
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/outpass-requests")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["traceId"], header.as_str());
}

#[rstest]
#[actix_web::test]
async fn outpass_decision_cannot_be_overturned() {
    let app = hostel_app!();
    let asha = login(&app, "asha").await;
    let warden = login(&app, "warden").await;

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/outpass-requests")
            .cookie(asha.clone())
            .set_json(json!({
                "reason": "Medical",
                "leaveTime": "2024-01-10T09:00:00+05:30",
                "returnTime": "2024-01-10T18:00:00+05:30"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(created["status"], "Pending");
    assert_eq!(created["leaveTime"], "2024-01-10T03:30:00Z");
    let uri = format!(
        "/api/v1/outpass-requests/{}/status",
        created["id"].as_str().expect("id")
    );

    let set = |cookie: &Cookie<'static>, status: &str| {
        test::TestRequest::put()
            .uri(&uri)
            .cookie(cookie.clone())
            .set_json(json!({"status": status}))
            .to_request()
    };

    let res = test::call_service(&app, set(&warden, "Approved")).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(&app, set(&asha, "Rejected")).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = test::call_service(&app, set(&warden, "Rejected")).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "invalid_transition");

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/outpass-requests")
            .cookie(asha)
            .to_request(),
    )
    .await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["status"], "Approved");
}

#[rstest]
#[actix_web::test]
async fn complaint_can_be_reopened_after_resolution() {
    let app = hostel_app!();
    let ravi = login(&app, "ravi").await;
    let warden = login(&app, "warden").await;

    let filed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/complaints")
            .cookie(ravi.clone())
            .set_json(json!({"text": "  Water cooler leaking  "}))
            .to_request(),
    )
    .await;
    assert_eq!(filed["status"], "Open");
    assert_eq!(filed["text"], "Water cooler leaking");
    let uri = format!(
        "/api/v1/complaints/{}/status",
        filed["id"].as_str().expect("id")
    );

    for status in ["In Progress", "Resolved", "Open"] {
        let updated: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::put()
                .uri(&uri)
                .cookie(warden.clone())
                .set_json(json!({"status": status}))
                .to_request(),
        )
        .await;
        assert_eq!(updated["status"], status);
    }

    let asha = login(&app, "asha").await;
    let mine: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/complaints")
            .cookie(asha)
            .to_request(),
    )
    .await;
    assert_eq!(mine, json!([]));
}

#[rstest]
#[actix_web::test]
async fn attendance_roster_reflects_profile_and_marks() {
    let app = hostel_app!();
    let asha = login(&app, "asha").await;
    let warden = login(&app, "warden").await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/me")
            .cookie(asha.clone())
            .set_json(json!({"name": "Asha Rao", "roomNumber": "C-301"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let mark = || {
        test::TestRequest::post()
            .uri("/api/v1/attendance")
            .cookie(asha.clone())
            .set_json(json!({"latitude": 12.9716, "longitude": 77.5946}))
            .to_request()
    };
    assert_eq!(
        test::call_service(&app, mark()).await.status(),
        StatusCode::CREATED
    );
    assert_eq!(
        test::call_service(&app, mark()).await.status(),
        StatusCode::CONFLICT
    );

    let roster: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/attendance/roster")
            .cookie(warden)
            .to_request(),
    )
    .await;
    assert_eq!(roster["totalStudents"], 2);
    assert_eq!(roster["records"][0]["student"]["name"], "Asha Rao");
    assert_eq!(roster["records"][0]["student"]["roomNumber"], "C-301");
}

#[rstest]
#[actix_web::test]
async fn hostel_board_keeps_the_last_publication_of_the_day() {
    let app = hostel_app!();
    let warden = login(&app, "warden").await;
    let asha = login(&app, "asha").await;

    for notice in ["Water supply off 2-4pm", "Water supply restored"] {
        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/v1/hostel-info")
                .cookie(warden.clone())
                .set_json(json!({
                    "messMenu": "Idli, sambar",
                    "notice": notice,
                    "wardenContacts": [
                        {"name": "R. Iyer", "phone": "+91 98450 00000", "position": "Chief warden"}
                    ]
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let board: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/hostel-info?date=2024-01-10")
            .cookie(asha)
            .to_request(),
    )
    .await;
    assert_eq!(board["notice"], "Water supply restored");
    assert_eq!(board["wardenContacts"][0]["position"], "Chief warden");
}

#[rstest]
#[actix_web::test]
async fn leave_forms_are_visible_to_the_warden() {
    let app = hostel_app!();
    let ravi = login(&app, "ravi").await;
    let warden = login(&app, "warden").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/leave-forms")
            .cookie(ravi.clone())
            .set_json(json!({
                "fileReference": "uploads/ravi/leave.pdf",
                "contentType": "application/pdf",
                "sizeBytes": 48_213
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let oversized = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/leave-forms")
            .cookie(ravi)
            .set_json(json!({
                "fileReference": "uploads/ravi/scan.png",
                "contentType": "image/png",
                "sizeBytes": 6 * 1024 * 1024
            }))
            .to_request(),
    )
    .await;
    assert_eq!(oversized.status(), StatusCode::BAD_REQUEST);

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/leave-forms")
            .cookie(warden)
            .to_request(),
    )
    .await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["student"]["username"], "ravi");
}
