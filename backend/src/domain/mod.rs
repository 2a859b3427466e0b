//! Domain primitives, services and ports.
//!
//! Purpose: model the hostel's request lifecycles and daily records
//! independently of HTTP and storage. Entities are immutable values; status
//! changes go through [`lifecycle`] and are persisted via the ports in
//! [`ports`].
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`Caller`]: the identity and role making a request.
//! - [`OutpassRequest`], [`Complaint`], [`LeaveForm`], [`Attendance`],
//!   [`HostelInfo`], [`User`]: entities.
//! - `*ServiceImpl`: driving port implementations.

pub mod attendance;
pub mod attendance_service;
pub mod auth;
pub mod caller;
pub mod complaint;
pub mod complaint_service;
pub mod dev_accounts;
pub mod error;
pub mod hostel_info;
pub mod hostel_info_service;
pub mod leave_form;
pub mod leave_form_service;
pub mod lifecycle;
pub mod outpass;
pub mod outpass_service;
pub mod ports;
pub mod profile_service;
pub mod trace_id;
pub mod user;

pub use self::attendance::{
    ATTENDANCE_HISTORY_DAYS, Attendance, AttendanceValidationError, Coordinates,
};
pub use self::attendance_service::AttendanceServiceImpl;
pub use self::auth::{AuthenticatedUser, LoginCredentials, LoginValidationError};
pub use self::caller::Caller;
pub use self::complaint::{Complaint, ComplaintValidationError};
pub use self::complaint_service::ComplaintServiceImpl;
pub use self::dev_accounts::{DevAccountSeedError, dev_accounts, seed_dev_accounts};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::hostel_info::{
    HostelInfo, HostelInfoContent, HostelInfoValidationError, WardenContact,
};
pub use self::hostel_info_service::HostelInfoServiceImpl;
pub use self::leave_form::{
    LEAVE_FORM_CONTENT_TYPES, LEAVE_FORM_MAX_BYTES, LeaveForm, LeaveFormUpload,
    LeaveFormValidationError,
};
pub use self::leave_form_service::LeaveFormServiceImpl;
pub use self::lifecycle::{
    ComplaintStatus, LifecycleStatus, OutpassStatus, ParseStatusError, TransitionError,
    allowed_targets, authorise, transition,
};
pub use self::outpass::{OutpassDraft, OutpassRequest, OutpassValidationError};
pub use self::outpass_service::OutpassServiceImpl;
pub use self::profile_service::ProfileServiceImpl;
pub use self::trace_id::TraceId;
pub use self::user::{
    ProfileUpdate, StudentSummary, User, UserDraft, UserId, UserRole, UserValidationError,
    WithStudent,
};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
