//! Leave forms: metadata for a signed form a student has already uploaded to
//! file storage. Rows are write-once.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Largest accepted upload, in bytes.
pub const LEAVE_FORM_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types accepted for leave form uploads.
pub const LEAVE_FORM_CONTENT_TYPES: &[&str] =
    &["application/pdf", "image/png", "image/jpeg", "image/jpg"];

/// Validation failures for leave form submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveFormValidationError {
    EmptyFileReference,
    UnsupportedContentType { content_type: String },
    TooLarge { size_bytes: u64, max: u64 },
}

impl fmt::Display for LeaveFormValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFileReference => write!(f, "file reference must not be empty"),
            Self::UnsupportedContentType { content_type } => write!(
                f,
                "content type `{content_type}` is not accepted; upload a PDF or image"
            ),
            Self::TooLarge { size_bytes, max } => {
                write!(f, "file is {size_bytes} bytes; the limit is {max} bytes")
            }
        }
    }
}

impl std::error::Error for LeaveFormValidationError {}

/// Upload metadata supplied by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveFormUpload {
    pub file_reference: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// A stored leave form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveForm {
    id: Uuid,
    student_id: UserId,
    file_reference: String,
    uploaded_at: DateTime<Utc>,
}

impl LeaveForm {
    /// Validate upload metadata and build the record.
    pub fn submit(
        student_id: UserId,
        upload: LeaveFormUpload,
        uploaded_at: DateTime<Utc>,
    ) -> Result<Self, LeaveFormValidationError> {
        let LeaveFormUpload {
            file_reference,
            content_type,
            size_bytes,
        } = upload;
        let file_reference = file_reference.trim();
        if file_reference.is_empty() {
            return Err(LeaveFormValidationError::EmptyFileReference);
        }
        let normalised = content_type.trim().to_ascii_lowercase();
        if !LEAVE_FORM_CONTENT_TYPES.contains(&normalised.as_str()) {
            return Err(LeaveFormValidationError::UnsupportedContentType { content_type });
        }
        if size_bytes > LEAVE_FORM_MAX_BYTES {
            return Err(LeaveFormValidationError::TooLarge {
                size_bytes,
                max: LEAVE_FORM_MAX_BYTES,
            });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            student_id,
            file_reference: file_reference.to_owned(),
            uploaded_at,
        })
    }

    pub fn restore(
        id: Uuid,
        student_id: UserId,
        file_reference: String,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            student_id,
            file_reference,
            uploaded_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn student_id(&self) -> &UserId {
        &self.student_id
    }

    pub fn file_reference(&self) -> &str {
        &self.file_reference
    }

    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn upload(content_type: &str, size_bytes: u64) -> LeaveFormUpload {
        LeaveFormUpload {
            file_reference: "leave-forms/asha/form.pdf".to_owned(),
            content_type: content_type.to_owned(),
            size_bytes,
        }
    }

    #[rstest]
    #[case("application/pdf")]
    #[case("image/png")]
    #[case("IMAGE/JPEG")]
    #[case("image/jpg")]
    fn accepts_supported_types(#[case] content_type: &str) {
        let form = LeaveForm::submit(UserId::random(), upload(content_type, 1024), Utc::now());
        assert!(form.is_ok());
    }

    #[rstest]
    #[case("text/plain")]
    #[case("image/gif")]
    fn rejects_other_types(#[case] content_type: &str) {
        assert!(matches!(
            LeaveForm::submit(UserId::random(), upload(content_type, 1024), Utc::now()),
            Err(LeaveFormValidationError::UnsupportedContentType { .. })
        ));
    }

    #[rstest]
    #[case(LEAVE_FORM_MAX_BYTES, true)]
    #[case(LEAVE_FORM_MAX_BYTES + 1, false)]
    fn enforces_size_limit(#[case] size: u64, #[case] ok: bool) {
        let result =
            LeaveForm::submit(UserId::random(), upload("application/pdf", size), Utc::now());
        assert_eq!(result.is_ok(), ok);
    }

    #[rstest]
    fn rejects_blank_reference() {
        let mut upload = upload("application/pdf", 10);
        upload.file_reference = "  ".to_owned();
        assert_eq!(
            LeaveForm::submit(UserId::random(), upload, Utc::now()),
            Err(LeaveFormValidationError::EmptyFileReference)
        );
    }
}
