//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs carry raw strings; these helpers turn them into domain values
//! and report failures as `invalid_request` errors whose details name the
//! offending field.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Machine-readable reason attached to validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reason {
    MissingField,
    InvalidUuid,
    InvalidTimestamp,
    InvalidDate,
    InvalidValue,
}

impl Reason {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidDate => "invalid_date",
            Self::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }
}

fn field_error(field: FieldName, reason: Reason, message: String, value: Option<&str>) -> Error {
    let mut details = json!({ "field": field.0, "code": reason.as_str() });
    if let (Some(value), Some(map)) = (value, details.as_object_mut()) {
        map.insert("value".to_owned(), json!(value));
    }
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        Reason::MissingField,
        format!("missing required field: {}", field.0),
        None,
    )
}

/// Require an optional body field to be present.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        field_error(
            field,
            Reason::InvalidUuid,
            format!("{} must be a valid UUID", field.0),
            Some(value),
        )
    })
}

pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            field_error(
                field,
                Reason::InvalidTimestamp,
                format!("{} must be an RFC 3339 timestamp", field.0),
                Some(value),
            )
        })
}

/// Parse an optional `YYYY-MM-DD` date.
pub(crate) fn parse_optional_date(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    value
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                field_error(
                    field,
                    Reason::InvalidDate,
                    format!("{} must be a date in YYYY-MM-DD form", field.0),
                    Some(raw),
                )
            })
        })
        .transpose()
}

/// Parse a value through its `FromStr` implementation, e.g. a status label.
pub(crate) fn parse_value<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err: T::Err| {
        field_error(field, Reason::InvalidValue, err.to_string(), Some(value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ComplaintStatus, ErrorCode};
    use rstest::rstest;

    const DATE: FieldName = FieldName::new("date");
    const STATUS: FieldName = FieldName::new("status");

    #[rstest]
    fn missing_fields_name_the_field() {
        let err = require::<String>(None, FieldName::new("reason")).expect_err("missing");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "reason", "code": "missing_field"}))
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("2024-01-10"), NaiveDate::from_ymd_opt(2024, 1, 10))]
    fn dates_parse_when_present(#[case] raw: Option<&str>, #[case] expected: Option<NaiveDate>) {
        assert_eq!(parse_optional_date(raw, DATE).expect("valid"), expected);
    }

    #[rstest]
    #[case("10/01/2024")]
    #[case("2024-02-30")]
    fn malformed_dates_are_rejected(#[case] raw: &str) {
        let err = parse_optional_date(Some(raw), DATE).expect_err("invalid");
        assert_eq!(
            err.details().and_then(|d| d.get("code")),
            Some(&json!("invalid_date"))
        );
    }

    #[rstest]
    fn status_labels_use_their_wire_spelling() {
        let status: ComplaintStatus = parse_value("In Progress", STATUS).expect("known label");
        assert_eq!(status, ComplaintStatus::InProgress);
        let err = parse_value::<ComplaintStatus>("Closed", STATUS).expect_err("unknown");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn timestamps_are_normalised_to_utc() {
        let parsed =
            parse_rfc3339_timestamp("2024-01-10T14:30:00+05:30", FieldName::new("leaveTime"))
                .expect("valid timestamp");
        assert_eq!(parsed.to_rfc3339(), "2024-01-10T09:00:00+00:00");
    }
}
