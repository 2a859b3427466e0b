//! Daily attendance marks. One row per student per date, never updated.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// How far back a student's history reaches: `today - 30 days` through today.
pub const ATTENDANCE_HISTORY_DAYS: u64 = 30;

/// Validation failures for attendance coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum AttendanceValidationError {
    LatitudeOutOfRange { value: f64 },
    LongitudeOutOfRange { value: f64 },
}

impl fmt::Display for AttendanceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LatitudeOutOfRange { value } => {
                write!(f, "latitude {value} must be between -90 and 90")
            }
            Self::LongitudeOutOfRange { value } => {
                write!(f, "longitude {value} must be between -180 and 180")
            }
        }
    }
}

impl std::error::Error for AttendanceValidationError {}

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, AttendanceValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(AttendanceValidationError::LatitudeOutOfRange { value: latitude });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(AttendanceValidationError::LongitudeOutOfRange { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Location string as stored, six decimal places each.
    ///
    /// # Examples
    /// ```
    /// use hostel::domain::Coordinates;
    ///
    /// let here = Coordinates::new(12.9716, 77.5946).unwrap();
    /// assert_eq!(here.to_location_string(), "12.971600, 77.594600");
    /// ```
    pub fn to_location_string(&self) -> String {
        format!("{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// A stored attendance mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    id: Uuid,
    date: NaiveDate,
    student_id: UserId,
    location: String,
    marked_by: UserId,
    created_at: DateTime<Utc>,
}

impl Attendance {
    /// Build a self-marked attendance row for `date`.
    pub fn mark(
        student_id: UserId,
        date: NaiveDate,
        coordinates: Coordinates,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            marked_by: student_id.clone(),
            student_id,
            location: coordinates.to_location_string(),
            created_at,
        }
    }

    pub fn restore(
        id: Uuid,
        date: NaiveDate,
        student_id: UserId,
        location: String,
        marked_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            date,
            student_id,
            location,
            marked_by,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn student_id(&self) -> &UserId {
        &self.student_id
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn marked_by(&self) -> &UserId {
        &self.marked_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
