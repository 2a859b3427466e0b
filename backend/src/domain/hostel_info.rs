//! Daily hostel notice board: mess menu, notice and warden contacts.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation failures for hostel info updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostelInfoValidationError {
    BlankWardenField { index: usize, field: &'static str },
}

impl fmt::Display for HostelInfoValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankWardenField { index, field } => {
                write!(f, "warden contact {index} has a blank {field}")
            }
        }
    }
}

impl std::error::Error for HostelInfoValidationError {}

/// A warden's published contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WardenContact {
    pub name: String,
    pub phone: String,
    pub position: String,
}

impl WardenContact {
    fn normalised(self, index: usize) -> Result<Self, HostelInfoValidationError> {
        let field = |value: String, field: &'static str| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(HostelInfoValidationError::BlankWardenField { index, field })
            } else {
                Ok(trimmed.to_owned())
            }
        };
        Ok(Self {
            name: field(self.name, "name")?,
            phone: field(self.phone, "phone")?,
            position: field(self.position, "position")?,
        })
    }
}

/// Content an administrator publishes for a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostelInfoContent {
    pub mess_menu: String,
    pub notice: String,
    pub warden_contacts: Vec<WardenContact>,
}

/// The notice board for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostelInfo {
    id: Uuid,
    date: NaiveDate,
    mess_menu: String,
    notice: String,
    warden_contacts: Vec<WardenContact>,
    created_at: DateTime<Utc>,
}

impl HostelInfo {
    /// Build a new record for `date`.
    pub fn publish(
        date: NaiveDate,
        content: HostelInfoContent,
        created_at: DateTime<Utc>,
    ) -> Result<Self, HostelInfoValidationError> {
        let HostelInfoContent {
            mess_menu,
            notice,
            warden_contacts,
        } = content;
        let warden_contacts = warden_contacts
            .into_iter()
            .enumerate()
            .map(|(index, contact)| contact.normalised(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            id: Uuid::new_v4(),
            date,
            mess_menu,
            notice,
            warden_contacts,
            created_at,
        })
    }

    /// Replace the content of an existing record, keeping its identity.
    pub fn revise(&self, content: HostelInfoContent) -> Result<Self, HostelInfoValidationError> {
        let fresh = Self::publish(self.date, content, self.created_at)?;
        Ok(Self { id: self.id, ..fresh })
    }

    pub fn restore(
        id: Uuid,
        date: NaiveDate,
        mess_menu: String,
        notice: String,
        warden_contacts: Vec<WardenContact>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            date,
            mess_menu,
            notice,
            warden_contacts,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn mess_menu(&self) -> &str {
        &self.mess_menu
    }

    pub fn notice(&self) -> &str {
        &self.notice
    }

    pub fn warden_contacts(&self) -> &[WardenContact] {
        &self.warden_contacts
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
