//! Attendance endpoints.
//!
//! ```text
//! POST /api/v1/attendance {"latitude":12.9716,"longitude":77.5946}
//! GET  /api/v1/attendance
//! GET  /api/v1/attendance/roster?date=2024-01-10
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::{AttendanceRoster, StudentAttendance};
use crate::domain::{
    Attendance, AttendanceValidationError, Coordinates, Error, StudentSummary, WithStudent,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_date, require};

/// Body of `POST /api/v1/attendance`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendance {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl TryFrom<MarkAttendance> for Coordinates {
    type Error = Error;

    fn try_from(value: MarkAttendance) -> Result<Self, Self::Error> {
        let latitude = require(value.latitude, FieldName::new("latitude"))?;
        let longitude = require(value.longitude, FieldName::new("longitude"))?;
        Self::new(latitude, longitude).map_err(|err| {
            let field = match err {
                AttendanceValidationError::LatitudeOutOfRange { .. } => "latitude",
                AttendanceValidationError::LongitudeOutOfRange { .. } => "longitude",
            };
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": field, "code": "out_of_range" }))
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RosterQuery {
    /// `YYYY-MM-DD`; defaults to today (UTC).
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    pub student_id: String,
    /// `"{lat:.6}, {lng:.6}"` as captured when marking.
    pub location: String,
    pub marked_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<Attendance> for AttendanceResponse {
    fn from(value: Attendance) -> Self {
        Self {
            id: value.id(),
            date: value.date(),
            student_id: value.student_id().to_string(),
            location: value.location().to_owned(),
            marked_by: value.marked_by().to_string(),
            created_at: value.created_at(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceHistoryResponse {
    pub today: NaiveDate,
    pub marked_today: bool,
    pub records: Vec<AttendanceResponse>,
}

impl From<StudentAttendance> for AttendanceHistoryResponse {
    fn from(value: StudentAttendance) -> Self {
        Self {
            today: value.today,
            marked_today: value.marked_today,
            records: value
                .records
                .into_iter()
                .map(AttendanceResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    #[serde(flatten)]
    pub attendance: AttendanceResponse,
    pub student: StudentSummary,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterResponse {
    pub date: NaiveDate,
    pub total_students: u64,
    pub records: Vec<RosterEntry>,
}

impl From<AttendanceRoster> for RosterResponse {
    fn from(value: AttendanceRoster) -> Self {
        Self {
            date: value.date,
            total_students: value.total_students,
            records: value
                .records
                .into_iter()
                .map(|WithStudent { record, student }| RosterEntry {
                    attendance: record.into(),
                    student,
                })
                .collect(),
        }
    }
}

/// Mark the calling student present for today.
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance marked", body = AttendanceResponse),
        (status = 400, description = "Invalid coordinates", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Only students mark attendance", body = Error),
        (status = 409, description = "Already marked today", body = Error)
    ),
    tags = ["attendance"],
    operation_id = "markAttendance"
)]
#[post("/attendance")]
pub async fn mark_attendance(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<MarkAttendance>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_caller()?;
    let coordinates = Coordinates::try_from(payload.into_inner())?;
    let row = state.attendance.mark(&caller, coordinates).await?;
    Ok(HttpResponse::Created().json(AttendanceResponse::from(row)))
}

/// The calling student's recent attendance.
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    responses(
        (status = 200, description = "Last 30 days, newest first", body = AttendanceHistoryResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Students only", body = Error)
    ),
    tags = ["attendance"],
    operation_id = "attendanceHistory"
)]
#[get("/attendance")]
pub async fn attendance_history(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AttendanceHistoryResponse>> {
    let caller = session.require_caller()?;
    let history = state.attendance.history(&caller).await?;
    Ok(web::Json(history.into()))
}

/// Everyone marked present on a date.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/roster",
    params(RosterQuery),
    responses(
        (status = 200, description = "Roster for the date", body = RosterResponse),
        (status = 400, description = "Malformed date", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Administrators only", body = Error)
    ),
    tags = ["attendance"],
    operation_id = "attendanceRoster"
)]
#[get("/attendance/roster")]
pub async fn attendance_roster(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<RosterQuery>,
) -> ApiResult<web::Json<RosterResponse>> {
    let caller = session.require_caller()?;
    let date = parse_optional_date(query.date.as_deref(), FieldName::new("date"))?;
    let roster = state.attendance.roster(&caller, date).await?;
    Ok(web::Json(roster.into()))
}
