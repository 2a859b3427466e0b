//! Request lifecycle engine shared by outpass requests and complaints.
//!
//! Each status enum declares, per current status, the statuses an
//! administrator may move it to. Students never transition anything. The
//! same tables drive service validation and the actions offered to clients,
//! so there is exactly one place that decides what is legal.
//!
//! | Entity  | From        | Admin may set                    |
//! |---------|-------------|----------------------------------|
//! | Outpass | Pending     | Approved, Rejected               |
//! | Outpass | Approved    | (terminal)                       |
//! | Outpass | Rejected    | (terminal)                       |
//! | Complaint | any       | Open, In Progress, Resolved      |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::{Error, UserRole};

/// A closed set of statuses governed by a transition table.
pub trait LifecycleStatus:
    Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Entity name used in errors and logs.
    const ENTITY: &'static str;

    /// Every status, in presentation order.
    const ALL: &'static [Self];

    /// Statuses an administrator may set from `self`.
    fn admin_targets(self) -> &'static [Self];
}

/// Errors produced when a requested transition is not allowed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The caller's role may not change this entity's status at all.
    #[error("role `{role}` may not change the status of a {entity}")]
    PermissionDenied { entity: &'static str, role: UserRole },
    /// The role is permitted but the table has no such edge.
    #[error("{entity} cannot move from `{from}` to `{to}`")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },
}

impl From<TransitionError> for Error {
    fn from(value: TransitionError) -> Self {
        match &value {
            TransitionError::PermissionDenied { .. } => Error::forbidden(value.to_string()),
            TransitionError::InvalidTransition { from, to, .. } => {
                Error::conflict(value.to_string()).with_details(json!({
                    "code": "invalid_transition",
                    "from": from,
                    "to": to,
                }))
            }
        }
    }
}

/// Statuses `role` may move an entity to from `current`.
///
/// # Examples
/// ```
/// use hostel::domain::{allowed_targets, OutpassStatus, UserRole};
///
/// assert_eq!(
///     allowed_targets(OutpassStatus::Pending, UserRole::Admin),
///     &[OutpassStatus::Approved, OutpassStatus::Rejected],
/// );
/// assert!(allowed_targets(OutpassStatus::Pending, UserRole::Student).is_empty());
/// ```
pub fn allowed_targets<S: LifecycleStatus>(current: S, role: UserRole) -> &'static [S] {
    match role {
        UserRole::Admin => current.admin_targets(),
        UserRole::Student => &[],
    }
}

/// Check that `role` may change statuses of `S` at all.
///
/// Services call this before reading the entity so that unauthorised callers
/// learn nothing about which identifiers exist.
pub fn authorise<S: LifecycleStatus>(role: UserRole) -> Result<(), TransitionError> {
    match role {
        UserRole::Admin => Ok(()),
        UserRole::Student => Err(TransitionError::PermissionDenied {
            entity: S::ENTITY,
            role,
        }),
    }
}

/// Validate a requested status change and return the resulting status.
///
/// The role is checked before the table, so a student always receives
/// [`TransitionError::PermissionDenied`] whatever the statuses involved.
///
/// # Examples
/// ```
/// use hostel::domain::{transition, ComplaintStatus, UserRole};
///
/// let next = transition(ComplaintStatus::Resolved, ComplaintStatus::Open, UserRole::Admin);
/// assert_eq!(next, Ok(ComplaintStatus::Open));
/// ```
pub fn transition<S: LifecycleStatus>(
    current: S,
    target: S,
    role: UserRole,
) -> Result<S, TransitionError> {
    authorise::<S>(role)?;
    if current.admin_targets().contains(&target) {
        Ok(target)
    } else {
        Err(TransitionError::InvalidTransition {
            entity: S::ENTITY,
            from: current.to_string(),
            to: target.to_string(),
        })
    }
}

/// Raised when a stored or submitted status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{value}` is not a valid {entity} status")]
pub struct ParseStatusError {
    pub entity: &'static str,
    pub value: String,
}

/// Outpass request status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum OutpassStatus {
    Pending,
    Approved,
    Rejected,
}

impl OutpassStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl LifecycleStatus for OutpassStatus {
    const ENTITY: &'static str = "outpass request";
    const ALL: &'static [Self] = &[Self::Pending, Self::Approved, Self::Rejected];

    fn admin_targets(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved | Self::Rejected => &[],
        }
    }
}

/// Complaint status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ComplaintStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl LifecycleStatus for ComplaintStatus {
    const ENTITY: &'static str = "complaint";
    const ALL: &'static [Self] = &[Self::Open, Self::InProgress, Self::Resolved];

    fn admin_targets(self) -> &'static [Self] {
        // Administrators may set any status, including the current one.
        Self::ALL
    }
}

macro_rules! status_strings {
    ($($status:ty),* $(,)?) => {
        $(
            impl fmt::Display for $status {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $status {
                type Err = ParseStatusError;

                fn from_str(value: &str) -> Result<Self, Self::Err> {
                    <$status as LifecycleStatus>::ALL
                        .iter()
                        .copied()
                        .find(|status| status.as_str() == value)
                        .ok_or_else(|| ParseStatusError {
                            entity: <$status as LifecycleStatus>::ENTITY,
                            value: value.to_owned(),
                        })
                }
            }
        )*
    };
}

status_strings!(OutpassStatus, ComplaintStatus);
