//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see driving ports, so they
//! can be exercised against mocks or the in-memory store without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AttendanceRepository, AttendanceService, ComplaintRepository, ComplaintService,
    HostelInfoRepository, HostelInfoService, LeaveFormRepository, LeaveFormService,
    LoginService, OutpassRepository, OutpassService, ProfileService, SharedPasswordLoginService,
    UserRepository,
};
use crate::domain::{
    AttendanceServiceImpl, ComplaintServiceImpl, HostelInfoServiceImpl, LeaveFormServiceImpl,
    OutpassServiceImpl, ProfileServiceImpl,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn ProfileService>,
    pub outpasses: Arc<dyn OutpassService>,
    pub complaints: Arc<dyn ComplaintService>,
    pub leave_forms: Arc<dyn LeaveFormService>,
    pub attendance: Arc<dyn AttendanceService>,
    pub hostel_info: Arc<dyn HostelInfoService>,
}

/// Driven ports backing every service.
///
/// The in-memory store implements all of them, so the same `Arc` can be
/// passed for each field.
pub struct Repositories<U, O, C, L, A, H> {
    pub users: Arc<U>,
    pub outpasses: Arc<O>,
    pub complaints: Arc<C>,
    pub leave_forms: Arc<L>,
    pub attendance: Arc<A>,
    pub hostel_info: Arc<H>,
}

impl HttpState {
    /// Wire the domain services over `repos`.
    ///
    /// Logins are checked by [`SharedPasswordLoginService`] against
    /// `login_password`.
    pub fn from_repositories<U, O, C, L, A, H>(
        repos: Repositories<U, O, C, L, A, H>,
        clock: Arc<dyn Clock>,
        login_password: impl Into<String>,
    ) -> Self
    where
        U: UserRepository + 'static,
        O: OutpassRepository + 'static,
        C: ComplaintRepository + 'static,
        L: LeaveFormRepository + 'static,
        A: AttendanceRepository + 'static,
        H: HostelInfoRepository + 'static,
    {
        let Repositories {
            users,
            outpasses,
            complaints,
            leave_forms,
            attendance,
            hostel_info,
        } = repos;
        Self {
            login: Arc::new(SharedPasswordLoginService::new(
                users.clone(),
                login_password,
            )),
            profile: Arc::new(ProfileServiceImpl::new(users.clone())),
            outpasses: Arc::new(OutpassServiceImpl::new(outpasses, clock.clone())),
            complaints: Arc::new(ComplaintServiceImpl::new(complaints, clock.clone())),
            leave_forms: Arc::new(LeaveFormServiceImpl::new(leave_forms, clock.clone())),
            attendance: Arc::new(AttendanceServiceImpl::new(attendance, users, clock.clone())),
            hostel_info: Arc::new(HostelInfoServiceImpl::new(hostel_info, clock)),
        }
    }
}
