//! Hostel notice board endpoints.
//!
//! ```text
//! GET /api/v1/hostel-info?date=2024-01-10
//! PUT /api/v1/hostel-info?date=2024-01-10 {"messMenu":"…","notice":"…","wardenContacts":[…]}
//! ```

use actix_web::{get, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Error, HostelInfo, HostelInfoContent, WardenContact};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_date};

const DATE: FieldName = FieldName::new("date");

#[derive(Debug, Deserialize, IntoParams)]
pub struct DateQuery {
    /// `YYYY-MM-DD`; defaults to today (UTC).
    pub date: Option<String>,
}

/// Body of `PUT /api/v1/hostel-info`. Missing fields publish as empty.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct HostelInfoRequest {
    pub mess_menu: String,
    pub notice: String,
    pub warden_contacts: Vec<WardenContact>,
}

impl From<HostelInfoRequest> for HostelInfoContent {
    fn from(value: HostelInfoRequest) -> Self {
        Self {
            mess_menu: value.mess_menu,
            notice: value.notice,
            warden_contacts: value.warden_contacts,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostelInfoResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    pub mess_menu: String,
    pub notice: String,
    pub warden_contacts: Vec<WardenContact>,
    pub created_at: DateTime<Utc>,
}

impl From<HostelInfo> for HostelInfoResponse {
    fn from(value: HostelInfo) -> Self {
        Self {
            id: value.id(),
            date: value.date(),
            mess_menu: value.mess_menu().to_owned(),
            notice: value.notice().to_owned(),
            warden_contacts: value.warden_contacts().to_vec(),
            created_at: value.created_at(),
        }
    }
}

/// Notice board for a date; `null` when nothing has been published.
#[utoipa::path(
    get,
    path = "/api/v1/hostel-info",
    params(DateQuery),
    responses(
        (status = 200, description = "Notice board, or null when unpublished", body = HostelInfoResponse),
        (status = 400, description = "Malformed date", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["hostel-info"],
    operation_id = "getHostelInfo"
)]
#[get("/hostel-info")]
pub async fn get_hostel_info(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<DateQuery>,
) -> ApiResult<web::Json<Option<HostelInfoResponse>>> {
    let caller = session.require_caller()?;
    let date = parse_optional_date(query.date.as_deref(), DATE)?;
    let info = state.hostel_info.get(&caller, date).await?;
    Ok(web::Json(info.map(HostelInfoResponse::from)))
}

/// Publish or replace the notice board for a date.
#[utoipa::path(
    put,
    path = "/api/v1/hostel-info",
    params(DateQuery),
    request_body = HostelInfoRequest,
    responses(
        (status = 200, description = "Published notice board", body = HostelInfoResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Administrators only", body = Error)
    ),
    tags = ["hostel-info"],
    operation_id = "publishHostelInfo"
)]
#[put("/hostel-info")]
pub async fn publish_hostel_info(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<DateQuery>,
    payload: web::Json<HostelInfoRequest>,
) -> ApiResult<web::Json<HostelInfoResponse>> {
    let caller = session.require_caller()?;
    let date = parse_optional_date(query.date.as_deref(), DATE)?;
    let info = state
        .hostel_info
        .publish(&caller, date, payload.into_inner().into())
        .await?;
    Ok(web::Json(info.into()))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{login, seeded_state, test_app};

    fn board(notice: &str) -> Value {
        json!({
            "messMenu": "Idli, sambar",
            "notice": notice,
            "wardenContacts": [
                {"name": "Chief Warden", "phone": "9000000000", "position": "Warden"}
            ]
        })
    }

    #[rstest]
    #[actix_web::test]
    async fn publishing_replaces_the_board_for_a_date() {
        let app = test::init_service(test_app(seeded_state().await)).await;
        let admin = login(&app, "warden").await;
        let student = login(&app, "asha").await;

        let empty: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/hostel-info")
                .cookie(student.clone())
                .to_request(),
        )
        .await;
        assert_eq!(empty, Value::Null);

        let mut ids = Vec::new();
        for notice in ["Water cut at 2pm", "Water restored"] {
            let published: Value = test::call_and_read_body_json(
                &app,
                test::TestRequest::put()
                    .uri("/api/v1/hostel-info")
                    .cookie(admin.clone())
                    .set_json(board(notice))
                    .to_request(),
            )
            .await;
            assert_eq!(published["date"], "2024-01-10");
            ids.push(published["id"].clone());
        }
        assert_eq!(ids[0], ids[1]);

        let current: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/hostel-info?date=2024-01-10")
                .cookie(student)
                .to_request(),
        )
        .await;
        assert_eq!(current["notice"], "Water restored");
        assert_eq!(current["wardenContacts"][0]["position"], "Warden");
    }

    #[rstest]
    #[actix_web::test]
    async fn students_cannot_publish_and_contacts_need_every_field() {
        let app = test::init_service(test_app(seeded_state().await)).await;
        let admin = login(&app, "warden").await;
        let student = login(&app, "asha").await;

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/v1/hostel-info")
                .cookie(student)
                .set_json(board("hello"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/v1/hostel-info?date=2024-02-01")
                .cookie(admin)
                .set_json(json!({
                    "wardenContacts": [{"name": " ", "phone": "1", "position": "Warden"}]
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
