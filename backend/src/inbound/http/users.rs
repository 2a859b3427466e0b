//! Login, logout and the caller's own account.
//!
//! ```text
//! POST /api/v1/login {"username":"asha","password":"hostel-dev"}
//! POST /api/v1/logout
//! GET  /api/v1/me
//! PUT  /api/v1/me {"name":"Asha Rao","roomNumber":"B-204"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, ProfileUpdate, User, UserRole,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Identity returned after a successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: String,
    pub role: UserRole,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate and establish a session.
///
/// The role stored in the session comes from the account, never from the
/// request.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Account store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist(&user)?;
    Ok(web::Json(LoginResponse {
        id: user.id.to_string(),
        role: user.role,
    }))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Return the caller's account.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current account", body = User),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Account no longer exists", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let caller = session.require_caller()?;
    let user = state.profile.me(&caller).await?;
    Ok(web::Json(user))
}

/// Profile fields a student may edit.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub name: String,
    pub room_number: Option<String>,
    pub phone: Option<String>,
    pub parent_phone: Option<String>,
}

/// Update the calling student's contact details.
///
/// Username and role are not part of the body and cannot change.
#[utoipa::path(
    put,
    path = "/api/v1/me",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Updated account", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Only students edit profiles", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[put("/me")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<User>> {
    let caller = session.require_caller()?;
    let ProfileRequest {
        name,
        room_number,
        phone,
        parent_phone,
    } = payload.into_inner();
    let update = ProfileUpdate::new(name, room_number, phone, parent_phone).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "name", "code": "empty_name" }))
    })?;
    let user = state.profile.update(&caller, update).await?;
    Ok(web::Json(user))
}
