//! Complaint endpoints.
//!
//! ```text
//! POST /api/v1/complaints {"text":"Water heater broken on floor 2"}
//! GET  /api/v1/complaints?status=In%20Progress
//! PUT  /api/v1/complaints/{id}/status {"status":"Resolved"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Complaint, ComplaintStatus, Error, StudentSummary, UserRole, WithStudent, allowed_targets,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::outpass::{StatusChange, StatusFilter};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid, parse_value, require};

const TEXT: FieldName = FieldName::new("text");
const STATUS: FieldName = FieldName::new("status");
const ID: FieldName = FieldName::new("id");

/// Body of `POST /api/v1/complaints`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintSubmission {
    pub text: Option<String>,
}

/// Complaint as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintResponse {
    pub id: Uuid,
    pub student_id: String,
    pub text: String,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
    pub student: StudentSummary,
    pub allowed_actions: Vec<ComplaintStatus>,
}

impl ComplaintResponse {
    fn new(joined: WithStudent<Complaint>, role: UserRole) -> Self {
        let WithStudent { record, student } = joined;
        Self {
            id: record.id(),
            student_id: record.student_id().to_string(),
            text: record.text().to_owned(),
            status: record.status(),
            created_at: record.created_at(),
            student,
            allowed_actions: allowed_targets(record.status(), role).to_vec(),
        }
    }
}

/// File a complaint.
#[utoipa::path(
    post,
    path = "/api/v1/complaints",
    request_body = ComplaintSubmission,
    responses(
        (status = 201, description = "Complaint created as Open", body = ComplaintResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Only students file complaints", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "submitComplaint"
)]
#[post("/complaints")]
pub async fn submit_complaint(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ComplaintSubmission>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_caller()?;
    let text = require(payload.into_inner().text, TEXT)?;
    let created = state.complaints.submit(&caller, &text).await?;
    Ok(HttpResponse::Created().json(ComplaintResponse::new(created, caller.role())))
}

/// List complaints, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/complaints",
    params(StatusFilter),
    responses(
        (status = 200, description = "Complaints", body = [ComplaintResponse]),
        (status = 400, description = "Unknown status", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "listComplaints"
)]
#[get("/complaints")]
pub async fn list_complaints(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<StatusFilter>,
) -> ApiResult<web::Json<Vec<ComplaintResponse>>> {
    let caller = session.require_caller()?;
    let status = query
        .status
        .as_deref()
        .map(|raw| parse_value::<ComplaintStatus>(raw, STATUS))
        .transpose()?;
    let rows = state.complaints.list(&caller, status).await?;
    Ok(web::Json(
        rows.into_iter()
            .map(|row| ComplaintResponse::new(row, caller.role()))
            .collect(),
    ))
}

/// Set a complaint's status. Administrators may choose any status.
#[utoipa::path(
    put,
    path = "/api/v1/complaints/{id}/status",
    params(("id" = String, Path, description = "Complaint id")),
    request_body = StatusChange,
    responses(
        (status = 200, description = "Committed complaint", body = ComplaintResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Only administrators change status", body = Error),
        (status = 404, description = "No such complaint", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "setComplaintStatus"
)]
#[put("/complaints/{id}/status")]
pub async fn set_complaint_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<StatusChange>,
) -> ApiResult<web::Json<ComplaintResponse>> {
    let caller = session.require_caller()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    let target =
        parse_value::<ComplaintStatus>(&require(payload.into_inner().status, STATUS)?, STATUS)?;
    let committed = state.complaints.set_status(&caller, id, target).await?;
    Ok(web::Json(ComplaintResponse::new(committed, caller.role())))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{login, seeded_state, test_app};

    #[rstest]
    #[actix_web::test]
    async fn complaint_can_be_reopened_after_resolution() {
        let app = test::init_service(test_app(seeded_state().await)).await;
        let student = login(&app, "ravi").await;
        let admin = login(&app, "warden").await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/complaints")
                .cookie(student.clone())
                .set_json(json!({"text": "  Water heater broken  ", "status": "Resolved"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(res).await;
        assert_eq!(created["status"], "Open");
        assert_eq!(created["text"], "Water heater broken");
        let uri = format!(
            "/api/v1/complaints/{}/status",
            created["id"].as_str().expect("id")
        );

        for target in ["Resolved", "Open"] {
            let body: Value = test::call_and_read_body_json(
                &app,
                test::TestRequest::put()
                    .uri(&uri)
                    .cookie(admin.clone())
                    .set_json(json!({ "status": target }))
                    .to_request(),
            )
            .await;
            assert_eq!(body["status"], target);
            assert_eq!(
                body["allowedActions"],
                json!(["Open", "In Progress", "Resolved"])
            );
        }

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&uri)
                .cookie(student)
                .set_json(json!({"status": "Resolved"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[actix_web::test]
    async fn admin_filter_uses_the_wire_label() {
        let app = test::init_service(test_app(seeded_state().await)).await;
        let student = login(&app, "asha").await;
        let admin = login(&app, "warden").await;

        let created: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/complaints")
                .cookie(student)
                .set_json(json!({"text": "Fan noisy"}))
                .to_request(),
        )
        .await;
        let uri = format!(
            "/api/v1/complaints/{}/status",
            created["id"].as_str().expect("id")
        );
        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&uri)
                .cookie(admin.clone())
                .set_json(json!({"status": "In Progress"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        for (query, expected) in [("In%20Progress", 1), ("Open", 0)] {
            let listed: Value = test::call_and_read_body_json(
                &app,
                test::TestRequest::get()
                    .uri(&format!("/api/v1/complaints?status={query}"))
                    .cookie(admin.clone())
                    .to_request(),
            )
            .await;
            assert_eq!(listed.as_array().map(Vec::len), Some(expected));
        }
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"text": "   "}))]
    #[actix_web::test]
    async fn blank_text_is_rejected(#[case] body: Value) {
        let app = test::init_service(test_app(seeded_state().await)).await;
        let student = login(&app, "asha").await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/complaints")
                .cookie(student)
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
