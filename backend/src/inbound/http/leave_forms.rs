//! Leave form endpoints.
//!
//! Files go straight from the client to object storage; these endpoints only
//! record the stored file's reference once the upload has finished.

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, LeaveForm, LeaveFormUpload, StudentSummary, WithStudent};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

/// Body of `POST /api/v1/leave-forms`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveFormSubmission {
    /// Storage reference returned by the upload, e.g. a URL or object key.
    pub file_reference: Option<String>,
    /// MIME type of the uploaded file: PDF, PNG or JPEG.
    pub content_type: Option<String>,
    /// Upload size in bytes, at most 5 MiB.
    pub size_bytes: Option<u64>,
}

impl TryFrom<LeaveFormSubmission> for LeaveFormUpload {
    type Error = Error;

    fn try_from(value: LeaveFormSubmission) -> Result<Self, Self::Error> {
        Ok(Self {
            file_reference: require(value.file_reference, FieldName::new("fileReference"))?,
            content_type: require(value.content_type, FieldName::new("contentType"))?,
            size_bytes: require(value.size_bytes, FieldName::new("sizeBytes"))?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveFormResponse {
    pub id: Uuid,
    pub student_id: String,
    pub file_reference: String,
    pub uploaded_at: DateTime<Utc>,
    pub student: StudentSummary,
}

impl From<WithStudent<LeaveForm>> for LeaveFormResponse {
    fn from(value: WithStudent<LeaveForm>) -> Self {
        let WithStudent { record, student } = value;
        Self {
            id: record.id(),
            student_id: record.student_id().to_string(),
            file_reference: record.file_reference().to_owned(),
            uploaded_at: record.uploaded_at(),
            student,
        }
    }
}

/// Record an uploaded leave form.
#[utoipa::path(
    post,
    path = "/api/v1/leave-forms",
    request_body = LeaveFormSubmission,
    responses(
        (status = 201, description = "Leave form recorded", body = LeaveFormResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Only students submit leave forms", body = Error)
    ),
    tags = ["leave-forms"],
    operation_id = "submitLeaveForm"
)]
#[post("/leave-forms")]
pub async fn submit_leave_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LeaveFormSubmission>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_caller()?;
    let upload = LeaveFormUpload::try_from(payload.into_inner())?;
    let created = state.leave_forms.submit(&caller, upload).await?;
    Ok(HttpResponse::Created().json(LeaveFormResponse::from(created)))
}

/// List leave forms, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/leave-forms",
    responses(
        (status = 200, description = "Leave forms", body = [LeaveFormResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["leave-forms"],
    operation_id = "listLeaveForms"
)]
#[get("/leave-forms")]
pub async fn list_leave_forms(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<LeaveFormResponse>>> {
    let caller = session.require_caller()?;
    let rows = state.leave_forms.list(&caller).await?;
    Ok(web::Json(rows.into_iter().map(LeaveFormResponse::from).collect()))
}
