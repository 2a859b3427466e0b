//! Outpass requests: a student's application to leave the hostel for a
//! bounded period.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OutpassStatus, UserId};

/// Validation failures for outpass submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutpassValidationError {
    EmptyReason,
    ReturnNotAfterLeave {
        leave_time: DateTime<Utc>,
        return_time: DateTime<Utc>,
    },
}

impl fmt::Display for OutpassValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyReason => write!(f, "reason must not be empty"),
            Self::ReturnNotAfterLeave {
                leave_time,
                return_time,
            } => write!(
                f,
                "return time {} must be after leave time {}",
                return_time.to_rfc3339(),
                leave_time.to_rfc3339()
            ),
        }
    }
}

impl std::error::Error for OutpassValidationError {}

/// Fields a student supplies when applying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutpassDraft {
    pub reason: String,
    pub leave_time: DateTime<Utc>,
    pub return_time: DateTime<Utc>,
}

/// A persisted outpass request.
///
/// ## Invariants
/// - `reason` is trimmed and non-empty.
/// - `return_time` is strictly after `leave_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutpassRequest {
    id: Uuid,
    student_id: UserId,
    reason: String,
    leave_time: DateTime<Utc>,
    return_time: DateTime<Utc>,
    status: OutpassStatus,
    created_at: DateTime<Utc>,
}

impl OutpassRequest {
    /// Create a new request in [`OutpassStatus::Pending`].
    pub fn submit(
        student_id: UserId,
        draft: OutpassDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, OutpassValidationError> {
        let OutpassDraft {
            reason,
            leave_time,
            return_time,
        } = draft;
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(OutpassValidationError::EmptyReason);
        }
        if return_time <= leave_time {
            return Err(OutpassValidationError::ReturnNotAfterLeave {
                leave_time,
                return_time,
            });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            student_id,
            reason: reason.to_owned(),
            leave_time,
            return_time,
            status: OutpassStatus::Pending,
            created_at,
        })
    }

    /// Rebuild a request loaded from storage.
    pub fn restore(
        id: Uuid,
        student_id: UserId,
        reason: String,
        leave_time: DateTime<Utc>,
        return_time: DateTime<Utc>,
        status: OutpassStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            student_id,
            reason,
            leave_time,
            return_time,
            status,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn student_id(&self) -> &UserId {
        &self.student_id
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn leave_time(&self) -> DateTime<Utc> {
        self.leave_time
    }

    pub fn return_time(&self) -> DateTime<Utc> {
        self.return_time
    }

    pub fn status(&self) -> OutpassStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copy with a new status; used by storage adapters applying an update.
    pub fn with_status(&self, status: OutpassStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn draft() -> OutpassDraft {
        OutpassDraft {
            reason: "  Medical  ".to_owned(),
            leave_time: at(9),
            return_time: at(18),
        }
    }

    #[rstest]
    fn submit_starts_pending_with_trimmed_reason(draft: OutpassDraft) {
        let student = UserId::random();
        let request = OutpassRequest::submit(student.clone(), draft, at(8)).expect("valid draft");
        assert_eq!(request.status(), OutpassStatus::Pending);
        assert_eq!(request.reason(), "Medical");
        assert_eq!(request.student_id(), &student);
    }

    #[rstest]
    fn submit_rejects_blank_reason(mut draft: OutpassDraft) {
        draft.reason = "\t ".to_owned();
        assert_eq!(
            OutpassRequest::submit(UserId::random(), draft, at(8)),
            Err(OutpassValidationError::EmptyReason)
        );
    }

    #[rstest]
    #[case(9)]
    #[case(8)]
    fn submit_rejects_return_not_after_leave(mut draft: OutpassDraft, #[case] return_hour: u32) {
        draft.return_time = at(return_hour);
        assert!(matches!(
            OutpassRequest::submit(UserId::random(), draft, at(8)),
            Err(OutpassValidationError::ReturnNotAfterLeave { .. })
        ));
    }
}
