//! In-memory implementation of every repository port.
//!
//! Used by development servers without a database and by HTTP tests. It
//! enforces the same constraints as the PostgreSQL schema: unique usernames,
//! one attendance row per (student, date), one hostel info row per date and
//! student references that must resolve to an existing account.
//!
//! All tables sit behind a single `std::sync::RwLock`; no lock is held
//! across an `.await`.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::ports::{
    AttendanceRepository, AttendanceRepositoryError, ComplaintFilter, ComplaintRepository,
    ComplaintRepositoryError, HostelInfoRepository, HostelInfoRepositoryError, LeaveFormFilter,
    LeaveFormRepository, LeaveFormRepositoryError, OutpassFilter, OutpassRepository,
    OutpassRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Attendance, Complaint, ComplaintStatus, HostelInfo, LeaveForm, OutpassRequest,
    OutpassStatus, ProfileUpdate, StudentSummary, User, UserId, UserRole, WithStudent,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    outpasses: Vec<OutpassRequest>,
    complaints: Vec<Complaint>,
    leave_forms: Vec<LeaveForm>,
    attendance: Vec<Attendance>,
    hostel_info: BTreeMap<NaiveDate, HostelInfo>,
}

impl Tables {
    fn student(&self, id: &UserId) -> Option<StudentSummary> {
        self.users.get(id.as_uuid()).map(User::summary)
    }

    /// Attach the owning student's summary, failing like a broken join.
    fn joined<T: Clone>(&self, record: &T, owner: &UserId) -> Result<WithStudent<T>, String> {
        self.student(owner)
            .map(|student| WithStudent {
                record: record.clone(),
                student,
            })
            .ok_or_else(|| format!("student {owner} referenced by a row does not exist"))
    }
}

/// Newest-first ordering; among equal timestamps the later insert comes first.
fn newest_first<T, K: Ord>(rows: &mut [T], key: impl Fn(&T) -> K) {
    rows.reverse();
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

/// Shared in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, String> {
        self.tables
            .read()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, String> {
        self.tables
            .write()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert_if_absent(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut tables = self.write().map_err(UserPersistenceError::query)?;
        if tables.users.contains_key(user.id().as_uuid()) {
            return Ok(false);
        }
        let clash = tables
            .users
            .values()
            .any(|other| other.username() == user.username() && other.id() != user.id());
        if clash {
            return Err(UserPersistenceError::duplicate(format!(
                "username `{}` is taken",
                user.username()
            )));
        }
        tables.users.insert(*user.id().as_uuid(), user.clone());
        Ok(true)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.read().map_err(UserPersistenceError::query)?;
        Ok(tables.users.get(id.as_uuid()).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.read().map_err(UserPersistenceError::query)?;
        Ok(tables
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<bool, UserPersistenceError> {
        let mut tables = self.write().map_err(UserPersistenceError::query)?;
        match tables.users.get_mut(id.as_uuid()) {
            Some(user) => {
                *user = user.with_profile(update);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_by_role(&self, role: UserRole) -> Result<u64, UserPersistenceError> {
        let tables = self.read().map_err(UserPersistenceError::query)?;
        Ok(tables.users.values().filter(|u| u.role() == role).count() as u64)
    }
}

#[async_trait]
impl OutpassRepository for MemoryStore {
    async fn insert(&self, request: &OutpassRequest) -> Result<(), OutpassRepositoryError> {
        let mut tables = self.write().map_err(OutpassRepositoryError::query)?;
        if tables.student(request.student_id()).is_none() {
            return Err(OutpassRepositoryError::query(format!(
                "student {} does not exist",
                request.student_id()
            )));
        }
        tables.outpasses.push(request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<WithStudent<OutpassRequest>>, OutpassRepositoryError> {
        let tables = self.read().map_err(OutpassRepositoryError::query)?;
        tables
            .outpasses
            .iter()
            .find(|row| row.id() == *id)
            .map(|row| tables.joined(row, row.student_id()))
            .transpose()
            .map_err(OutpassRepositoryError::query)
    }

    async fn list(
        &self,
        filter: &OutpassFilter,
    ) -> Result<Vec<WithStudent<OutpassRequest>>, OutpassRepositoryError> {
        let tables = self.read().map_err(OutpassRepositoryError::query)?;
        let mut rows = tables
            .outpasses
            .iter()
            .filter(|row| filter.student_id.as_ref().is_none_or(|id| row.student_id() == id))
            .filter(|row| filter.status.is_none_or(|status| row.status() == status))
            .map(|row| tables.joined(row, row.student_id()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(OutpassRepositoryError::query)?;
        newest_first(&mut rows, |row| row.record.created_at());
        Ok(rows)
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: OutpassStatus,
    ) -> Result<bool, OutpassRepositoryError> {
        let mut tables = self.write().map_err(OutpassRepositoryError::query)?;
        match tables.outpasses.iter_mut().find(|row| row.id() == *id) {
            Some(row) => {
                *row = row.with_status(status);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ComplaintRepository for MemoryStore {
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError> {
        let mut tables = self.write().map_err(ComplaintRepositoryError::query)?;
        if tables.student(complaint.student_id()).is_none() {
            return Err(ComplaintRepositoryError::query(format!(
                "student {} does not exist",
                complaint.student_id()
            )));
        }
        tables.complaints.push(complaint.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<WithStudent<Complaint>>, ComplaintRepositoryError> {
        let tables = self.read().map_err(ComplaintRepositoryError::query)?;
        tables
            .complaints
            .iter()
            .find(|row| row.id() == *id)
            .map(|row| tables.joined(row, row.student_id()))
            .transpose()
            .map_err(ComplaintRepositoryError::query)
    }

    async fn list(
        &self,
        filter: &ComplaintFilter,
    ) -> Result<Vec<WithStudent<Complaint>>, ComplaintRepositoryError> {
        let tables = self.read().map_err(ComplaintRepositoryError::query)?;
        let mut rows = tables
            .complaints
            .iter()
            .filter(|row| filter.student_id.as_ref().is_none_or(|id| row.student_id() == id))
            .filter(|row| filter.status.is_none_or(|status| row.status() == status))
            .map(|row| tables.joined(row, row.student_id()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(ComplaintRepositoryError::query)?;
        newest_first(&mut rows, |row| row.record.created_at());
        Ok(rows)
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: ComplaintStatus,
    ) -> Result<bool, ComplaintRepositoryError> {
        let mut tables = self.write().map_err(ComplaintRepositoryError::query)?;
        match tables.complaints.iter_mut().find(|row| row.id() == *id) {
            Some(row) => {
                *row = row.with_status(status);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl LeaveFormRepository for MemoryStore {
    async fn insert(&self, form: &LeaveForm) -> Result<(), LeaveFormRepositoryError> {
        let mut tables = self.write().map_err(LeaveFormRepositoryError::query)?;
        if tables.student(form.student_id()).is_none() {
            return Err(LeaveFormRepositoryError::query(format!(
                "student {} does not exist",
                form.student_id()
            )));
        }
        tables.leave_forms.push(form.clone());
        Ok(())
    }

    async fn list(
        &self,
        filter: &LeaveFormFilter,
    ) -> Result<Vec<WithStudent<LeaveForm>>, LeaveFormRepositoryError> {
        let tables = self.read().map_err(LeaveFormRepositoryError::query)?;
        let mut rows = tables
            .leave_forms
            .iter()
            .filter(|row| filter.student_id.as_ref().is_none_or(|id| row.student_id() == id))
            .map(|row| tables.joined(row, row.student_id()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(LeaveFormRepositoryError::query)?;
        newest_first(&mut rows, |row| row.record.uploaded_at());
        Ok(rows)
    }
}

#[async_trait]
impl AttendanceRepository for MemoryStore {
    async fn insert(&self, attendance: &Attendance) -> Result<(), AttendanceRepositoryError> {
        let mut tables = self.write().map_err(AttendanceRepositoryError::query)?;
        if tables.student(attendance.student_id()).is_none() {
            return Err(AttendanceRepositoryError::query(format!(
                "student {} does not exist",
                attendance.student_id()
            )));
        }
        let duplicate = tables.attendance.iter().any(|row| {
            row.student_id() == attendance.student_id() && row.date() == attendance.date()
        });
        if duplicate {
            return Err(AttendanceRepositoryError::duplicate(format!(
                "student {} on {}",
                attendance.student_id(),
                attendance.date()
            )));
        }
        tables.attendance.push(attendance.clone());
        Ok(())
    }

    async fn list_for_student(
        &self,
        student_id: &UserId,
        since: NaiveDate,
    ) -> Result<Vec<Attendance>, AttendanceRepositoryError> {
        let tables = self.read().map_err(AttendanceRepositoryError::query)?;
        let mut rows: Vec<Attendance> = tables
            .attendance
            .iter()
            .filter(|row| row.student_id() == student_id && row.date() >= since)
            .cloned()
            .collect();
        newest_first(&mut rows, Attendance::date);
        Ok(rows)
    }

    async fn list_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<WithStudent<Attendance>>, AttendanceRepositoryError> {
        let tables = self.read().map_err(AttendanceRepositoryError::query)?;
        let mut rows = tables
            .attendance
            .iter()
            .filter(|row| row.date() == date)
            .map(|row| tables.joined(row, row.student_id()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(AttendanceRepositoryError::query)?;
        rows.sort_by(|a, b| a.student.name.cmp(&b.student.name));
        Ok(rows)
    }
}

#[async_trait]
impl HostelInfoRepository for MemoryStore {
    async fn find_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Option<HostelInfo>, HostelInfoRepositoryError> {
        let tables = self.read().map_err(HostelInfoRepositoryError::query)?;
        Ok(tables.hostel_info.get(&date).cloned())
    }

    async fn upsert(&self, info: &HostelInfo) -> Result<(), HostelInfoRepositoryError> {
        let mut tables = self.write().map_err(HostelInfoRepositoryError::query)?;
        tables.hostel_info.insert(info.date(), info.clone());
        Ok(())
    }
}
