//! User identity, role and profile data.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors raised while building user values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    UnknownRole { value: String },
    EmptyName,
    EmptyUsername,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::UnknownRole { value } => {
                write!(f, "role must be `student` or `admin`, got `{value}`")
            }
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
///
/// The original string form is retained so that identifiers round-trip
/// through sessions unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an already parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Role attached to every account. Roles never change after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Admin,
}

impl UserRole {
    /// Wire and storage spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "student" => Ok(Self::Student),
            "admin" => Ok(Self::Admin),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

/// A hostel account.
///
/// ## Invariants
/// - `username` and `name` are non-blank.
/// - `role` is fixed for the lifetime of the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    username: String,
    name: String,
    room_number: Option<String>,
    phone: Option<String>,
    parent_phone: Option<String>,
    role: UserRole,
    created_at: DateTime<Utc>,
}

/// Input used to construct a [`User`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub room_number: Option<String>,
    pub phone: Option<String>,
    pub parent_phone: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a validated user.
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        let UserDraft {
            id,
            username,
            name,
            room_number,
            phone,
            parent_phone,
            role,
            created_at,
        } = draft;
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        let name = non_blank(name).ok_or(UserValidationError::EmptyName)?;
        Ok(Self {
            id,
            username,
            name,
            room_number: room_number.and_then(non_blank),
            phone: phone.and_then(non_blank),
            parent_phone: parent_phone.and_then(non_blank),
            role,
            created_at,
        })
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn room_number(&self) -> Option<&str> {
        self.room_number.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn parent_phone(&self) -> Option<&str> {
        self.parent_phone.as_deref()
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Student summary joined onto list views.
    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            name: self.name.clone(),
            username: self.username.clone(),
            room_number: self.room_number.clone(),
        }
    }

    /// Return a copy with the editable profile fields replaced.
    ///
    /// Username, role and creation time are carried over untouched.
    pub fn with_profile(&self, update: &ProfileUpdate) -> Self {
        Self {
            name: update.name.clone(),
            room_number: update.room_number.clone(),
            phone: update.phone.clone(),
            parent_phone: update.parent_phone.clone(),
            ..self.clone()
        }
    }
}

/// Student details shown next to requests in list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub name: String,
    pub username: String,
    pub room_number: Option<String>,
}

/// A record paired with the summary of the student who owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithStudent<T> {
    #[serde(flatten)]
    pub record: T,
    pub student: StudentSummary,
}

/// Validated profile changes a student may make to their own account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    name: String,
    room_number: Option<String>,
    phone: Option<String>,
    parent_phone: Option<String>,
}

impl ProfileUpdate {
    /// Trim inputs, dropping blank optional fields.
    pub fn new(
        name: impl Into<String>,
        room_number: Option<String>,
        phone: Option<String>,
        parent_phone: Option<String>,
    ) -> Result<Self, UserValidationError> {
        let name = non_blank(name.into()).ok_or(UserValidationError::EmptyName)?;
        Ok(Self {
            name,
            room_number: room_number.and_then(non_blank),
            phone: phone.and_then(non_blank),
            parent_phone: parent_phone.and_then(non_blank),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn room_number(&self) -> Option<&str> {
        self.room_number.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn parent_phone(&self) -> Option<&str> {
        self.parent_phone.as_deref()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
