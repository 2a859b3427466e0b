//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Each `into_domain`
//! conversion re-validates values that the schema stores as free text
//! (roles and statuses) and reports anything unrecognised as a message for
//! the repository's query error.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Attendance, Complaint, ComplaintStatus, HostelInfo, LeaveForm, OutpassRequest,
    OutpassStatus, StudentSummary, User, UserDraft, UserId, UserRole, WardenContact,
    WithStudent,
};

use super::schema::{
    attendance, complaints, hostel_info, leave_forms, outpass_requests, users,
};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub room_number: Option<String>,
    pub phone: Option<String>,
    pub parent_phone: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let id = self.id;
        let role: UserRole = self.role.parse().map_err(|err| format!("{err}"))?;
        User::new(UserDraft {
            id: UserId::from_uuid(id),
            username: self.username,
            name: self.name,
            room_number: self.room_number,
            phone: self.phone,
            parent_phone: self.parent_phone,
            role,
            created_at: self.created_at,
        })
        .map_err(|err| format!("stored user {id} is invalid: {err}"))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub name: &'a str,
    pub room_number: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub parent_phone: Option<&'a str>,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Profile columns a student may change. `None` clears the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProfileChangeset<'a> {
    pub name: &'a str,
    pub room_number: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub parent_phone: Option<&'a str>,
}

/// The joined student columns shown next to requests.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentSummaryRow {
    pub name: String,
    pub username: String,
    pub room_number: Option<String>,
}

impl From<StudentSummaryRow> for StudentSummary {
    fn from(row: StudentSummaryRow) -> Self {
        Self {
            name: row.name,
            username: row.username,
            room_number: row.room_number,
        }
    }
}

/// Pair a converted record with its joined student.
pub(crate) fn with_student<R, T>(
    (row, student): (R, StudentSummaryRow),
    convert: impl FnOnce(R) -> Result<T, String>,
) -> Result<WithStudent<T>, String> {
    Ok(WithStudent {
        record: convert(row)?,
        student: student.into(),
    })
}

// ---------------------------------------------------------------------------
// Outpass requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = outpass_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OutpassRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub reason: String,
    pub leave_time: DateTime<Utc>,
    pub return_time: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl OutpassRow {
    pub(crate) fn from_domain(request: &OutpassRequest) -> Self {
        Self {
            id: request.id(),
            student_id: *request.student_id().as_uuid(),
            reason: request.reason().to_owned(),
            leave_time: request.leave_time(),
            return_time: request.return_time(),
            status: request.status().as_str().to_owned(),
            created_at: request.created_at(),
        }
    }

    pub(crate) fn into_domain(self) -> Result<OutpassRequest, String> {
        let status: OutpassStatus = self.status.parse().map_err(|err| format!("{err}"))?;
        Ok(OutpassRequest::restore(
            self.id,
            UserId::from_uuid(self.student_id),
            self.reason,
            self.leave_time,
            self.return_time,
            status,
            self.created_at,
        ))
    }
}

// ---------------------------------------------------------------------------
// Complaints
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = complaints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ComplaintRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub body: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl ComplaintRow {
    pub(crate) fn from_domain(complaint: &Complaint) -> Self {
        Self {
            id: complaint.id(),
            student_id: *complaint.student_id().as_uuid(),
            body: complaint.text().to_owned(),
            status: complaint.status().as_str().to_owned(),
            created_at: complaint.created_at(),
        }
    }

    pub(crate) fn into_domain(self) -> Result<Complaint, String> {
        let status: ComplaintStatus = self.status.parse().map_err(|err| format!("{err}"))?;
        Ok(Complaint::restore(
            self.id,
            UserId::from_uuid(self.student_id),
            self.body,
            status,
            self.created_at,
        ))
    }
}

// ---------------------------------------------------------------------------
// Leave forms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = leave_forms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LeaveFormRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub file_reference: String,
    pub uploaded_at: DateTime<Utc>,
}

impl LeaveFormRow {
    pub(crate) fn from_domain(form: &LeaveForm) -> Self {
        Self {
            id: form.id(),
            student_id: *form.student_id().as_uuid(),
            file_reference: form.file_reference().to_owned(),
            uploaded_at: form.uploaded_at(),
        }
    }

    pub(crate) fn into_domain(self) -> Result<LeaveForm, String> {
        Ok(LeaveForm::restore(
            self.id,
            UserId::from_uuid(self.student_id),
            self.file_reference,
            self.uploaded_at,
        ))
    }
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = attendance)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AttendanceRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub student_id: Uuid,
    pub location: String,
    pub marked_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl AttendanceRow {
    pub(crate) fn from_domain(row: &Attendance) -> Self {
        Self {
            id: row.id(),
            date: row.date(),
            student_id: *row.student_id().as_uuid(),
            location: row.location().to_owned(),
            marked_by: *row.marked_by().as_uuid(),
            created_at: row.created_at(),
        }
    }

    pub(crate) fn into_domain(self) -> Result<Attendance, String> {
        Ok(Attendance::restore(
            self.id,
            self.date,
            UserId::from_uuid(self.student_id),
            self.location,
            UserId::from_uuid(self.marked_by),
            self.created_at,
        ))
    }
}

// ---------------------------------------------------------------------------
// Hostel info
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = hostel_info)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HostelInfoRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub mess_menu: String,
    pub notice: String,
    pub warden_contacts: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Content columns replaced when a date is republished.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = hostel_info)]
pub(crate) struct HostelInfoContentChangeset<'a> {
    pub mess_menu: &'a str,
    pub notice: &'a str,
    pub warden_contacts: &'a serde_json::Value,
}

impl HostelInfoRow {
    pub(crate) fn from_domain(info: &HostelInfo) -> Result<Self, String> {
        let warden_contacts = serde_json::to_value(info.warden_contacts())
            .map_err(|err| format!("encode warden contacts: {err}"))?;
        Ok(Self {
            id: info.id(),
            date: info.date(),
            mess_menu: info.mess_menu().to_owned(),
            notice: info.notice().to_owned(),
            warden_contacts,
            created_at: info.created_at(),
        })
    }

    pub(crate) fn content(&self) -> HostelInfoContentChangeset<'_> {
        HostelInfoContentChangeset {
            mess_menu: &self.mess_menu,
            notice: &self.notice,
            warden_contacts: &self.warden_contacts,
        }
    }

    pub(crate) fn into_domain(self) -> Result<HostelInfo, String> {
        let date = self.date;
        let contacts: Vec<WardenContact> = serde_json::from_value(self.warden_contacts)
            .map_err(|err| format!("decode warden contacts for {date}: {err}"))?;
        Ok(HostelInfo::restore(
            self.id,
            self.date,
            self.mess_menu,
            self.notice,
            contacts,
            self.created_at,
        ))
    }
}
