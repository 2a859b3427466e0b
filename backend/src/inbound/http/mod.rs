//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate JSON into domain calls on the ports held by
//! [`state::HttpState`] and never touch storage directly. The caller's
//! identity comes from the session cookie via [`session::SessionContext`].

use actix_web::web;

pub mod attendance;
pub mod complaints;
pub mod error;
pub mod health;
pub mod hostel_info;
pub mod leave_forms;
pub mod outpass;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
pub use users::LoginRequest;

/// Register every `/api/v1` handler and the extractor error handlers.
///
/// Callers mount this under a scope that also carries the session
/// middleware:
///
/// ```ignore
/// web::scope("/api/v1").wrap(session).configure(api_services)
/// ```
pub fn api_services(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(users::update_profile)
        .service(outpass::submit_outpass)
        .service(outpass::list_outpasses)
        .service(outpass::set_outpass_status)
        .service(complaints::submit_complaint)
        .service(complaints::list_complaints)
        .service(complaints::set_complaint_status)
        .service(leave_forms::submit_leave_form)
        .service(leave_forms::list_leave_forms)
        .service(attendance::mark_attendance)
        .service(attendance::attendance_history)
        .service(attendance::attendance_roster)
        .service(hostel_info::get_hostel_info)
        .service(hostel_info::publish_hostel_info);
}
