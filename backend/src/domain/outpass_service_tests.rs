//! Tests for the outpass service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::MockClock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockOutpassRepository;
use crate::domain::{ErrorCode, StudentSummary, UserId};

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(at(8));
    Arc::new(clock)
}

fn summary() -> StudentSummary {
    StudentSummary {
        name: "Asha Rao".to_owned(),
        username: "asha".to_owned(),
        room_number: Some("B-204".to_owned()),
    }
}

fn stored(status: OutpassStatus) -> WithStudent<OutpassRequest> {
    WithStudent {
        record: OutpassRequest::restore(
            Uuid::new_v4(),
            UserId::random(),
            "Medical".to_owned(),
            at(9),
            at(18),
            status,
            at(8),
        ),
        student: summary(),
    }
}

#[fixture]
fn medical_draft() -> OutpassDraft {
    OutpassDraft {
        reason: "Medical".to_owned(),
        leave_time: at(9),
        return_time: at(18),
    }
}

#[rstest]
#[tokio::test]
async fn submit_inserts_pending_and_returns_reread(medical_draft: OutpassDraft) {
    let student = Caller::student(UserId::random());
    let mut repo = MockOutpassRepository::new();
    repo.expect_insert()
        .times(1)
        .withf(|request| request.status() == OutpassStatus::Pending)
        .returning(|_| Ok(()));
    repo.expect_find_by_id()
        .times(1)
        .returning(|_| Ok(Some(stored(OutpassStatus::Pending))));

    let service = OutpassServiceImpl::new(Arc::new(repo), clock());
    let created = service
        .submit(&student, medical_draft)
        .await
        .expect("submission succeeds");

    assert_eq!(created.record.status(), OutpassStatus::Pending);
}

#[rstest]
#[tokio::test]
async fn submit_by_admin_is_forbidden(medical_draft: OutpassDraft) {
    let mut repo = MockOutpassRepository::new();
    repo.expect_insert().times(0);

    let service = OutpassServiceImpl::new(Arc::new(repo), clock());
    let err = service
        .submit(&Caller::admin(UserId::random()), medical_draft)
        .await
        .expect_err("admins do not apply");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn submit_rejects_inverted_window(mut medical_draft: OutpassDraft) {
    medical_draft.return_time = at(7);
    let mut repo = MockOutpassRepository::new();
    repo.expect_insert().times(0);

    let service = OutpassServiceImpl::new(Arc::new(repo), clock());
    let err = service
        .submit(&Caller::student(UserId::random()), medical_draft)
        .await
        .expect_err("invalid window");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn list_scopes_students_to_their_own_rows() {
    let student_id = UserId::random();
    let expected = student_id.clone();
    let mut repo = MockOutpassRepository::new();
    repo.expect_list()
        .times(1)
        .withf(move |filter| filter.student_id.as_ref() == Some(&expected))
        .returning(|_| Ok(Vec::new()));

    let service = OutpassServiceImpl::new(Arc::new(repo), clock());
    service
        .list(&Caller::student(student_id), None)
        .await
        .expect("list succeeds");
}

#[rstest]
#[tokio::test]
async fn list_gives_admins_every_row_with_status_filter() {
    let mut repo = MockOutpassRepository::new();
    repo.expect_list()
        .times(1)
        .withf(|filter| {
            filter.student_id.is_none() && filter.status == Some(OutpassStatus::Pending)
        })
        .returning(|_| Ok(vec![stored(OutpassStatus::Pending)]));

    let service = OutpassServiceImpl::new(Arc::new(repo), clock());
    let rows = service
        .list(&Caller::admin(UserId::random()), Some(OutpassStatus::Pending))
        .await
        .expect("list succeeds");
    assert_eq!(rows.len(), 1);
}

#[rstest]
#[tokio::test]
async fn approve_pending_writes_and_rereads() {
    let pending = stored(OutpassStatus::Pending);
    let id = pending.record.id();
    let approved = WithStudent {
        record: pending.record.with_status(OutpassStatus::Approved),
        student: summary(),
    };

    let mut repo = MockOutpassRepository::new();
    let mut reads = vec![approved, pending].into_iter().rev();
    repo.expect_find_by_id()
        .times(2)
        .returning(move |_| Ok(reads.next()));
    repo.expect_update_status()
        .times(1)
        .withf(move |row, status| *row == id && *status == OutpassStatus::Approved)
        .returning(|_, _| Ok(true));

    let service = OutpassServiceImpl::new(Arc::new(repo), clock());
    let committed = service
        .set_status(&Caller::admin(UserId::random()), id, OutpassStatus::Approved)
        .await
        .expect("approval succeeds");
    assert_eq!(committed.record.status(), OutpassStatus::Approved);
}

#[rstest]
#[tokio::test]
async fn student_transition_is_denied_before_any_read() {
    let mut repo = MockOutpassRepository::new();
    repo.expect_find_by_id().times(0);
    repo.expect_update_status().times(0);

    let service = OutpassServiceImpl::new(Arc::new(repo), clock());
    let err = service
        .set_status(
            &Caller::student(UserId::random()),
            Uuid::new_v4(),
            OutpassStatus::Rejected,
        )
        .await
        .expect_err("students cannot decide");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[case(OutpassStatus::Approved, OutpassStatus::Approved)]
#[case(OutpassStatus::Approved, OutpassStatus::Rejected)]
#[case(OutpassStatus::Pending, OutpassStatus::Pending)]
#[tokio::test]
async fn illegal_edges_conflict_without_writing(
    #[case] from: OutpassStatus,
    #[case] to: OutpassStatus,
) {
    let current = stored(from);
    let id = current.record.id();
    let mut repo = MockOutpassRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(current)));
    repo.expect_update_status().times(0);

    let service = OutpassServiceImpl::new(Arc::new(repo), clock());
    let err = service
        .set_status(&Caller::admin(UserId::random()), id, to)
        .await
        .expect_err("edge not in table");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(
        err.details().and_then(|d| d.get("code")),
        Some(&serde_json::json!("invalid_transition"))
    );
}

#[rstest]
#[tokio::test]
async fn missing_row_is_not_found() {
    let mut repo = MockOutpassRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let service = OutpassServiceImpl::new(Arc::new(repo), clock());
    let err = service
        .set_status(
            &Caller::admin(UserId::random()),
            Uuid::new_v4(),
            OutpassStatus::Approved,
        )
        .await
        .expect_err("unknown id");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn row_vanishing_during_update_is_not_found() {
    let current = stored(OutpassStatus::Pending);
    let id = current.record.id();
    let mut repo = MockOutpassRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(current)));
    repo.expect_update_status()
        .times(1)
        .return_once(|_, _| Ok(false));

    let service = OutpassServiceImpl::new(Arc::new(repo), clock());
    let err = service
        .set_status(&Caller::admin(UserId::random()), id, OutpassStatus::Rejected)
        .await
        .expect_err("row vanished");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(OutpassRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(OutpassRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn store_failures_surface_as_persistence_errors(
    #[case] failure: OutpassRepositoryError,
    #[case] expected: ErrorCode,
) {
    let current = stored(OutpassStatus::Pending);
    let id = current.record.id();
    let mut repo = MockOutpassRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(current)));
    repo.expect_update_status()
        .times(1)
        .return_once(move |_, _| Err(failure));

    let service = OutpassServiceImpl::new(Arc::new(repo), clock());
    let err = service
        .set_status(&Caller::admin(UserId::random()), id, OutpassStatus::Approved)
        .await
        .expect_err("store rejected write");
    assert_eq!(err.code(), expected);
}
