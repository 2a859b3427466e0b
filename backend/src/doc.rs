//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler and the health probes, plus
//! the session cookie security scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    ComplaintStatus, Error, ErrorCode, OutpassStatus, StudentSummary, User, UserRole,
    WardenContact,
};
use crate::inbound::http::{
    attendance, complaints, health, hostel_info, leave_forms, outpass, users,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Hostel backend API",
        description = "Outpass requests, complaints, leave forms, attendance and the daily notice board."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        users::login,
        users::logout,
        users::current_user,
        users::update_profile,
        outpass::submit_outpass,
        outpass::list_outpasses,
        outpass::set_outpass_status,
        complaints::submit_complaint,
        complaints::list_complaints,
        complaints::set_complaint_status,
        leave_forms::submit_leave_form,
        leave_forms::list_leave_forms,
        attendance::mark_attendance,
        attendance::attendance_history,
        attendance::attendance_roster,
        hostel_info::get_hostel_info,
        hostel_info::publish_hostel_info,
        health::ready,
        health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        UserRole,
        StudentSummary,
        OutpassStatus,
        ComplaintStatus,
        WardenContact,
        outpass::OutpassResponse,
        complaints::ComplaintResponse,
    )),
    tags(
        (name = "users", description = "Login and the caller's own account"),
        (name = "outpass", description = "Outpass request lifecycle"),
        (name = "complaints", description = "Complaint lifecycle"),
        (name = "leave-forms", description = "Uploaded leave form records"),
        (name = "attendance", description = "Daily self-marked attendance"),
        (name = "hostel-info", description = "Daily notice board"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
