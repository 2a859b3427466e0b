//! Concurrent status writes resolve as last write wins.

mod hostel_support;

use futures_util::future::join;
use hostel::domain::{Caller, ComplaintStatus, LoginCredentials};
use hostel::inbound::http::state::HttpState;
use rstest::rstest;

async fn caller(state: &HttpState, username: &str) -> Caller {
    let credentials = LoginCredentials::try_from_parts(username, hostel_support::PASSWORD)
        .expect("credentials are well formed");
    state
        .login
        .authenticate(&credentials)
        .await
        .map(Caller::from)
        .expect("dev account logs in")
}

#[rstest]
#[tokio::test]
async fn two_admin_sessions_racing_on_one_complaint() {
    let state = hostel_support::seeded_state().await;
    let student = caller(&state, "asha").await;
    let first = caller(&state, "warden").await;
    let second = first.clone();

    let filed = state
        .complaints
        .submit(&student, "Mess food is cold at dinner")
        .await
        .expect("complaint filed");
    let id = filed.record.id();

    let (a, b) = join(
        state
            .complaints
            .set_status(&first, id, ComplaintStatus::InProgress),
        state
            .complaints
            .set_status(&second, id, ComplaintStatus::Resolved),
    )
    .await;
    let a = a.expect("first write succeeds");
    let b = b.expect("second write succeeds");

    let stored = state
        .complaints
        .list(&first, None)
        .await
        .expect("listing succeeds");
    let final_status = stored
        .iter()
        .find(|row| row.record.id() == id)
        .map(|row| row.record.status())
        .expect("complaint is listed");
    assert_eq!(a.record.status(), ComplaintStatus::InProgress);
    assert_eq!(final_status, b.record.status());
    assert_eq!(final_status, ComplaintStatus::Resolved);

    let settled = state
        .complaints
        .set_status(&first, id, ComplaintStatus::Open)
        .await
        .expect("a later write succeeds");
    assert_eq!(settled.record.status(), ComplaintStatus::Open);
}
