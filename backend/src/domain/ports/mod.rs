//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Service`, [`LoginService`]) are what inbound adapters
//! call. Driven ports (`*Repository`) are what the domain needs from storage;
//! each has its own error enum so adapters map failures into predictable
//! variants.

mod macros;
pub(crate) use macros::define_port_error;

mod attendance_repository;
mod attendance_service;
mod complaint_repository;
mod complaint_service;
mod hostel_info_repository;
mod hostel_info_service;
mod leave_form_repository;
mod leave_form_service;
mod login_service;
mod outpass_repository;
mod outpass_service;
mod profile_service;
mod user_repository;

#[cfg(test)]
pub use attendance_repository::MockAttendanceRepository;
pub use attendance_repository::{AttendanceRepository, AttendanceRepositoryError};
pub use attendance_service::{AttendanceRoster, AttendanceService, StudentAttendance};
#[cfg(test)]
pub use complaint_repository::MockComplaintRepository;
pub use complaint_repository::{ComplaintFilter, ComplaintRepository, ComplaintRepositoryError};
pub use complaint_service::ComplaintService;
#[cfg(test)]
pub use hostel_info_repository::MockHostelInfoRepository;
pub use hostel_info_repository::{HostelInfoRepository, HostelInfoRepositoryError};
pub use hostel_info_service::HostelInfoService;
#[cfg(test)]
pub use leave_form_repository::MockLeaveFormRepository;
pub use leave_form_repository::{LeaveFormFilter, LeaveFormRepository, LeaveFormRepositoryError};
pub use leave_form_service::LeaveFormService;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginService, SharedPasswordLoginService};
#[cfg(test)]
pub use outpass_repository::MockOutpassRepository;
pub use outpass_repository::{OutpassFilter, OutpassRepository, OutpassRepositoryError};
pub use outpass_service::OutpassService;
pub use profile_service::ProfileService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
