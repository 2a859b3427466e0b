//! Outpass request endpoints.
//!
//! ```text
//! POST /api/v1/outpass-requests {"reason":"Medical","leaveTime":"…","returnTime":"…"}
//! GET  /api/v1/outpass-requests?status=Pending
//! PUT  /api/v1/outpass-requests/{id}/status {"status":"Approved"}
//! ```
//!
//! Each returned request lists the statuses the caller may move it to, read
//! from the same lifecycle table the service enforces.

use actix_web::{HttpResponse, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    Error, OutpassDraft, OutpassRequest, OutpassStatus, StudentSummary, UserRole, WithStudent,
    allowed_targets,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_rfc3339_timestamp, parse_uuid, parse_value, require,
};

const REASON: FieldName = FieldName::new("reason");
const LEAVE_TIME: FieldName = FieldName::new("leaveTime");
const RETURN_TIME: FieldName = FieldName::new("returnTime");
const STATUS: FieldName = FieldName::new("status");
const ID: FieldName = FieldName::new("id");

/// Body of `POST /api/v1/outpass-requests`.
///
/// A client-supplied status is not part of the contract and is ignored.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutpassSubmission {
    pub reason: Option<String>,
    /// RFC 3339 timestamp.
    pub leave_time: Option<String>,
    /// RFC 3339 timestamp, strictly after `leaveTime`.
    pub return_time: Option<String>,
}

impl TryFrom<OutpassSubmission> for OutpassDraft {
    type Error = Error;

    fn try_from(value: OutpassSubmission) -> Result<Self, Self::Error> {
        let reason = require(value.reason, REASON)?;
        let leave_time =
            parse_rfc3339_timestamp(&require(value.leave_time, LEAVE_TIME)?, LEAVE_TIME)?;
        let return_time =
            parse_rfc3339_timestamp(&require(value.return_time, RETURN_TIME)?, RETURN_TIME)?;
        Ok(Self {
            reason,
            leave_time,
            return_time,
        })
    }
}

/// Body of a status change request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    /// Target status label, e.g. `Approved`.
    pub status: Option<String>,
}

/// Query string for listing.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StatusFilter {
    /// Optional status label narrowing the requests the caller can see.
    pub status: Option<String>,
}

/// Outpass request as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutpassResponse {
    pub id: Uuid,
    pub student_id: String,
    pub reason: String,
    pub leave_time: DateTime<Utc>,
    pub return_time: DateTime<Utc>,
    pub status: OutpassStatus,
    pub created_at: DateTime<Utc>,
    pub student: StudentSummary,
    /// Statuses the caller may set next.
    pub allowed_actions: Vec<OutpassStatus>,
}

impl OutpassResponse {
    fn new(joined: WithStudent<OutpassRequest>, role: UserRole) -> Self {
        let WithStudent { record, student } = joined;
        Self {
            id: record.id(),
            student_id: record.student_id().to_string(),
            reason: record.reason().to_owned(),
            leave_time: record.leave_time(),
            return_time: record.return_time(),
            status: record.status(),
            created_at: record.created_at(),
            student,
            allowed_actions: allowed_targets(record.status(), role).to_vec(),
        }
    }
}

/// Apply for an outpass.
#[utoipa::path(
    post,
    path = "/api/v1/outpass-requests",
    request_body = OutpassSubmission,
    responses(
        (status = 201, description = "Request created as Pending", body = OutpassResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Only students apply", body = Error)
    ),
    tags = ["outpass"],
    operation_id = "submitOutpass"
)]
#[post("/outpass-requests")]
pub async fn submit_outpass(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<OutpassSubmission>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_caller()?;
    let draft = OutpassDraft::try_from(payload.into_inner())?;
    let created = state.outpasses.submit(&caller, draft).await?;
    Ok(HttpResponse::Created().json(OutpassResponse::new(created, caller.role())))
}

/// List outpass requests, newest first.
///
/// Students always receive only their own requests.
#[utoipa::path(
    get,
    path = "/api/v1/outpass-requests",
    params(StatusFilter),
    responses(
        (status = 200, description = "Outpass requests", body = [OutpassResponse]),
        (status = 400, description = "Unknown status", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["outpass"],
    operation_id = "listOutpasses"
)]
#[get("/outpass-requests")]
pub async fn list_outpasses(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<StatusFilter>,
) -> ApiResult<web::Json<Vec<OutpassResponse>>> {
    let caller = session.require_caller()?;
    let status = query
        .status
        .as_deref()
        .map(|raw| parse_value::<OutpassStatus>(raw, STATUS))
        .transpose()?;
    let rows = state.outpasses.list(&caller, status).await?;
    Ok(web::Json(
        rows.into_iter()
            .map(|row| OutpassResponse::new(row, caller.role()))
            .collect(),
    ))
}

/// Approve or reject a pending request.
#[utoipa::path(
    put,
    path = "/api/v1/outpass-requests/{id}/status",
    params(("id" = String, Path, description = "Outpass request id")),
    request_body = StatusChange,
    responses(
        (status = 200, description = "Committed request", body = OutpassResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Only administrators change status", body = Error),
        (status = 404, description = "No such request", body = Error),
        (status = 409, description = "Transition not allowed", body = Error)
    ),
    tags = ["outpass"],
    operation_id = "setOutpassStatus"
)]
#[put("/outpass-requests/{id}/status")]
pub async fn set_outpass_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<StatusChange>,
) -> ApiResult<web::Json<OutpassResponse>> {
    let caller = session.require_caller()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    let label = require(payload.into_inner().status, STATUS)?;
    let target = parse_value::<OutpassStatus>(&label, STATUS)?;
    let committed = state.outpasses.set_status(&caller, id, target).await?;
    Ok(web::Json(OutpassResponse::new(committed, caller.role())))
}
