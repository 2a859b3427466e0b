//! Shared wiring for the hostel integration suites.
//!
//! Every suite runs against a fresh in-memory store seeded with the
//! development accounts and a clock pinned to 2024-01-10T08:00:00Z.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use hostel::domain::seed_dev_accounts;
use hostel::inbound::http::state::{HttpState, Repositories};
use hostel::outbound::memory::MemoryStore;
use mockable::{Clock, MockClock};

pub const PASSWORD: &str = "hostel-dev";

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn fixed_clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now());
    Arc::new(clock)
}

pub async fn seeded_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
    seed_dev_accounts(store.as_ref(), now())
        .await
        .expect("seed dev accounts");
    HttpState::from_repositories(
        Repositories {
            users: store.clone(),
            outpasses: store.clone(),
            complaints: store.clone(),
            leave_forms: store.clone(),
            attendance: store.clone(),
            hostel_info: store,
        },
        fixed_clock(),
        PASSWORD,
    )
}
