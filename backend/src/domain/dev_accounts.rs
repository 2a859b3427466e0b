//! Development accounts seeded at startup when enabled.
//!
//! The identifiers are fixed so that sessions survive restarts of a dev
//! server backed by the in-memory store.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserId, UserRole};

struct Seed {
    id: &'static str,
    username: &'static str,
    name: &'static str,
    room_number: Option<&'static str>,
    role: UserRole,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "6f1c2a4e-1d1b-4b8e-9a55-2f0f6c1e0a01",
        username: "warden",
        name: "Chief Warden",
        room_number: None,
        role: UserRole::Admin,
    },
    Seed {
        id: "6f1c2a4e-1d1b-4b8e-9a55-2f0f6c1e0a02",
        username: "asha",
        name: "Asha Rao",
        room_number: Some("B-204"),
        role: UserRole::Student,
    },
    Seed {
        id: "6f1c2a4e-1d1b-4b8e-9a55-2f0f6c1e0a03",
        username: "ravi",
        name: "Ravi Kumar",
        room_number: Some("A-112"),
        role: UserRole::Student,
    },
];

/// Errors raised while seeding development accounts.
#[derive(Debug, thiserror::Error)]
pub enum DevAccountSeedError {
    #[error("invalid seed account `{username}`: {message}")]
    InvalidSeed {
        username: &'static str,
        message: String,
    },
    #[error(transparent)]
    Persistence(#[from] UserPersistenceError),
}

/// Build the development accounts.
pub fn dev_accounts(created_at: DateTime<Utc>) -> Result<Vec<User>, DevAccountSeedError> {
    SEEDS
        .iter()
        .map(|seed| {
            let invalid = |message: String| DevAccountSeedError::InvalidSeed {
                username: seed.username,
                message,
            };
            let id = UserId::new(seed.id).map_err(|err| invalid(err.to_string()))?;
            User::new(UserDraft {
                id,
                username: seed.username.to_owned(),
                name: seed.name.to_owned(),
                room_number: seed.room_number.map(str::to_owned),
                phone: None,
                parent_phone: None,
                role: seed.role,
                created_at,
            })
            .map_err(|err| invalid(err.to_string()))
        })
        .collect()
}

/// Insert the development accounts that are not stored yet.
///
/// Existing rows are left alone so profile edits survive a restart. Returns
/// how many accounts were inserted.
pub async fn seed_dev_accounts<R>(
    users: &R,
    created_at: DateTime<Utc>,
) -> Result<usize, DevAccountSeedError>
where
    R: UserRepository + ?Sized,
{
    let accounts = dev_accounts(created_at)?;
    let mut inserted = 0;
    for account in &accounts {
        if users.insert_if_absent(account).await? {
            inserted += 1;
        }
    }
    info!(
        inserted,
        existing = accounts.len() - inserted,
        "development accounts seeded"
    );
    Ok(inserted)
}
