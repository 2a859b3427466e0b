//! Behaviour tests for the outpass, complaint and attendance lifecycles.
//!
//! Scenarios drive the driving ports held by [`HttpState`] over a seeded
//! in-memory store, logging in through the same login service the HTTP
//! adapter uses.

mod hostel_support;

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::Duration;
use hostel::domain::{
    Caller, ComplaintStatus, Coordinates, Error, ErrorCode, LoginCredentials, OutpassDraft,
    OutpassStatus,
};
use hostel::inbound::http::state::HttpState;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use tokio::runtime::Runtime;
use uuid::Uuid;

struct LifecycleWorld {
    runtime: Runtime,
    state: HttpState,
    callers: RefCell<HashMap<String, Caller>>,
    latest_outpass: RefCell<Option<(Uuid, OutpassStatus)>>,
    latest_complaint: RefCell<Option<(Uuid, ComplaintStatus)>>,
    last_error: RefCell<Option<Error>>,
}

impl LifecycleWorld {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime builds");
        let state = runtime.block_on(hostel_support::seeded_state());
        Self {
            runtime,
            state,
            callers: RefCell::new(HashMap::new()),
            latest_outpass: RefCell::new(None),
            latest_complaint: RefCell::new(None),
            last_error: RefCell::new(None),
        }
    }

    fn caller(&self, username: &str) -> Caller {
        self.callers
            .borrow()
            .get(username)
            .cloned()
            .unwrap_or_else(|| panic!("{username} has not logged in"))
    }

    fn record<T>(&self, outcome: Result<T, Error>) -> Option<T> {
        match outcome {
            Ok(value) => {
                *self.last_error.borrow_mut() = None;
                Some(value)
            }
            Err(error) => {
                *self.last_error.borrow_mut() = Some(error);
                None
            }
        }
    }

    fn last_error_code(&self) -> ErrorCode {
        self.last_error
            .borrow()
            .as_ref()
            .map(Error::code)
            .expect("the last action should have failed")
    }

    fn outpass_id(&self) -> Uuid {
        self.latest_outpass.borrow().expect("an outpass was submitted").0
    }

    fn complaint_id(&self) -> Uuid {
        self.latest_complaint
            .borrow()
            .expect("a complaint was filed")
            .0
    }
}

#[fixture]
fn world() -> LifecycleWorld {
    LifecycleWorld::new()
}

#[given("the account {username} is logged in")]
fn the_account_is_logged_in(world: &LifecycleWorld, username: String) {
    let credentials = LoginCredentials::try_from_parts(&username, hostel_support::PASSWORD)
        .expect("credentials are well formed");
    let user = world
        .runtime
        .block_on(world.state.login.authenticate(&credentials))
        .expect("dev account logs in");
    world
        .callers
        .borrow_mut()
        .insert(username, Caller::from(user));
}

#[when("{username} applies for an outpass")]
fn applies_for_an_outpass(world: &LifecycleWorld, username: String) {
    let caller = world.caller(&username);
    let leave_time = hostel_support::now() + Duration::hours(2);
    let draft = OutpassDraft {
        reason: "Medical appointment".to_owned(),
        leave_time,
        return_time: leave_time + Duration::hours(4),
    };
    let submitted = world
        .runtime
        .block_on(world.state.outpasses.submit(&caller, draft));
    if let Some(request) = world.record(submitted) {
        *world.latest_outpass.borrow_mut() = Some((request.record.id(), request.record.status()));
    }
}

#[when("{username} sets the latest outpass to {status}")]
fn sets_the_latest_outpass(world: &LifecycleWorld, username: String, status: String) {
    let caller = world.caller(&username);
    let target: OutpassStatus = status.parse().expect("known outpass status");
    let id = world.outpass_id();
    let updated = world
        .runtime
        .block_on(world.state.outpasses.set_status(&caller, id, target));
    if let Some(request) = world.record(updated) {
        *world.latest_outpass.borrow_mut() = Some((request.record.id(), request.record.status()));
    }
}

#[when("{username} files a complaint")]
fn files_a_complaint(world: &LifecycleWorld, username: String) {
    let caller = world.caller(&username);
    let filed = world.runtime.block_on(
        world
            .state
            .complaints
            .submit(&caller, "The corridor light on floor two is broken"),
    );
    if let Some(complaint) = world.record(filed) {
        *world.latest_complaint.borrow_mut() =
            Some((complaint.record.id(), complaint.record.status()));
    }
}

#[when("{username} sets the latest complaint to {status}")]
fn sets_the_latest_complaint(world: &LifecycleWorld, username: String, status: String) {
    let caller = world.caller(&username);
    let target: ComplaintStatus = status.parse().expect("known complaint status");
    let id = world.complaint_id();
    let updated = world
        .runtime
        .block_on(world.state.complaints.set_status(&caller, id, target));
    if let Some(complaint) = world.record(updated) {
        *world.latest_complaint.borrow_mut() =
            Some((complaint.record.id(), complaint.record.status()));
    }
}

#[when("{username} marks attendance")]
fn marks_attendance(world: &LifecycleWorld, username: String) {
    let caller = world.caller(&username);
    let coordinates = Coordinates::new(12.9716, 77.5946).expect("coordinates in range");
    let marked = world
        .runtime
        .block_on(world.state.attendance.mark(&caller, coordinates));
    world.record(marked);
}

#[then("the latest outpass is {status}")]
fn the_latest_outpass_is(world: &LifecycleWorld, status: String) {
    let expected: OutpassStatus = status.parse().expect("known outpass status");
    let current = world.latest_outpass.borrow().expect("an outpass was submitted").1;
    assert_eq!(current, expected);
}

#[then("the latest complaint is {status}")]
fn the_latest_complaint_is(world: &LifecycleWorld, status: String) {
    let expected: ComplaintStatus = status.parse().expect("known complaint status");
    let current = world.latest_complaint.borrow().expect("a complaint was filed").1;
    assert_eq!(current, expected);
}

#[then("the last action succeeded")]
fn the_last_action_succeeded(world: &LifecycleWorld) {
    assert!(world.last_error.borrow().is_none());
}

#[then("the last action is forbidden")]
fn the_last_action_is_forbidden(world: &LifecycleWorld) {
    assert_eq!(world.last_error_code(), ErrorCode::Forbidden);
}

#[then("the last action is a conflict")]
fn the_last_action_is_a_conflict(world: &LifecycleWorld) {
    assert_eq!(world.last_error_code(), ErrorCode::Conflict);
}

#[then("the transition from {status} is refused")]
fn the_transition_is_refused(world: &LifecycleWorld, status: String) {
    assert_eq!(world.last_error_code(), ErrorCode::Conflict);
    let error = world.last_error.borrow();
    let details = error
        .as_ref()
        .and_then(Error::details)
        .expect("conflict carries details");
    assert_eq!(
        details.get("code").and_then(Value::as_str),
        Some("invalid_transition")
    );
    assert_eq!(
        details.get("from").and_then(Value::as_str),
        Some(status.as_str())
    );
    // The failed transition leaves the stored status untouched.
    let current = world.latest_outpass.borrow().expect("an outpass was submitted").1;
    assert_eq!(current.to_string(), status);
}

#[then("{username} sees {count} outpass request")]
fn sees_outpass_requests(world: &LifecycleWorld, username: String, count: usize) {
    let caller = world.caller(&username);
    let listed = world
        .runtime
        .block_on(world.state.outpasses.list(&caller, None))
        .expect("listing succeeds");
    assert_eq!(listed.len(), count);
}

#[then("the roster lists {present} of {total} students")]
fn the_roster_lists(world: &LifecycleWorld, present: usize, total: u64) {
    let warden = world.caller("warden");
    let roster = world
        .runtime
        .block_on(world.state.attendance.roster(&warden, None))
        .expect("roster loads");
    assert_eq!(roster.records.len(), present);
    assert_eq!(roster.total_students, total);
}

#[scenario(
    path = "tests/features/request_lifecycle.feature",
    name = "The warden decides an outpass and the decision sticks"
)]
fn outpass_decision_sticks(world: LifecycleWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/request_lifecycle.feature",
    name = "The warden resolves and reopens a complaint"
)]
fn complaint_is_resolved_and_reopened(world: LifecycleWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/request_lifecycle.feature",
    name = "Attendance is marked once per day"
)]
fn attendance_is_marked_once_per_day(world: LifecycleWorld) {
    drop(world);
}
