//! Builds the HTTP handler state over the configured storage backend.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use hostel::domain::ports::UserRepository;
use hostel::domain::seed_dev_accounts;
use hostel::inbound::http::state::{HttpState, Repositories};
use hostel::outbound::memory::MemoryStore;
use hostel::outbound::persistence::{
    DbPool, DieselAttendanceRepository, DieselComplaintRepository, DieselHostelInfoRepository,
    DieselLeaveFormRepository, DieselOutpassRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Build handler state from `config`.
///
/// A configured pool selects the Diesel repositories; otherwise one
/// [`MemoryStore`] backs every port. Missing development accounts are
/// inserted first when enabled.
///
/// # Errors
///
/// Returns [`std::io::Error`] when seeding the development accounts fails.
pub(crate) async fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let password = config.login_password.as_str();
    match &config.db_pool {
        Some(pool) => {
            let repos = diesel_repositories(pool);
            seed_if_enabled(config, repos.users.as_ref(), clock.as_ref()).await?;
            info!("serving from PostgreSQL");
            Ok(HttpState::from_repositories(repos, clock, password))
        }
        None => {
            let store = Arc::new(MemoryStore::new());
            seed_if_enabled(config, store.as_ref(), clock.as_ref()).await?;
            warn!("no database configured; data is kept in memory and lost on restart");
            Ok(HttpState::from_repositories(
                Repositories {
                    users: store.clone(),
                    outpasses: store.clone(),
                    complaints: store.clone(),
                    leave_forms: store.clone(),
                    attendance: store.clone(),
                    hostel_info: store,
                },
                clock,
                password,
            ))
        }
    }
}

type DieselRepositories = Repositories<
    DieselUserRepository,
    DieselOutpassRepository,
    DieselComplaintRepository,
    DieselLeaveFormRepository,
    DieselAttendanceRepository,
    DieselHostelInfoRepository,
>;

fn diesel_repositories(pool: &DbPool) -> DieselRepositories {
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        outpasses: Arc::new(DieselOutpassRepository::new(pool.clone())),
        complaints: Arc::new(DieselComplaintRepository::new(pool.clone())),
        leave_forms: Arc::new(DieselLeaveFormRepository::new(pool.clone())),
        attendance: Arc::new(DieselAttendanceRepository::new(pool.clone())),
        hostel_info: Arc::new(DieselHostelInfoRepository::new(pool.clone())),
    }
}

async fn seed_if_enabled<R>(
    config: &ServerConfig,
    users: &R,
    clock: &dyn Clock,
) -> std::io::Result<()>
where
    R: UserRepository + ?Sized,
{
    if !config.seed_dev_accounts {
        return Ok(());
    }
    seed_dev_accounts(users, clock.utc())
        .await
        .map(|_| ())
        .map_err(|err| std::io::Error::other(format!("seeding development accounts failed: {err}")))
}
