//! Complaints raised by students about hostel facilities.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ComplaintStatus, UserId};

/// Validation failures for complaint submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplaintValidationError {
    EmptyText,
}

impl fmt::Display for ComplaintValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText => write!(f, "complaint text must not be empty"),
        }
    }
}

impl std::error::Error for ComplaintValidationError {}

/// A persisted complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    id: Uuid,
    student_id: UserId,
    text: String,
    status: ComplaintStatus,
    created_at: DateTime<Utc>,
}

impl Complaint {
    /// Create a new complaint in [`ComplaintStatus::Open`].
    pub fn submit(
        student_id: UserId,
        text: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ComplaintValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ComplaintValidationError::EmptyText);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            student_id,
            text: text.to_owned(),
            status: ComplaintStatus::Open,
            created_at,
        })
    }

    /// Rebuild a complaint loaded from storage.
    pub fn restore(
        id: Uuid,
        student_id: UserId,
        text: String,
        status: ComplaintStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            student_id,
            text,
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

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn status(&self) -> ComplaintStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn with_status(&self, status: ComplaintStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}
