//! Hostel notice board service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{HostelInfoRepository, HostelInfoRepositoryError, HostelInfoService};
use crate::domain::{Caller, Error, HostelInfo, HostelInfoContent};

fn map_repository_error(error: HostelInfoRepositoryError) -> Error {
    match error {
        HostelInfoRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("hostel info repository unavailable: {message}"))
        }
        HostelInfoRepositoryError::Query { message } => {
            Error::internal(format!("hostel info repository error: {message}"))
        }
    }
}

#[derive(Clone)]
pub struct HostelInfoServiceImpl<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> HostelInfoServiceImpl<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> HostelInfoService for HostelInfoServiceImpl<R>
where
    R: HostelInfoRepository,
{
    async fn get(
        &self,
        _caller: &Caller,
        date: Option<NaiveDate>,
    ) -> Result<Option<HostelInfo>, Error> {
        let date = date.unwrap_or_else(|| self.clock.utc().date_naive());
        self.repo
            .find_by_date(date)
            .await
            .map_err(map_repository_error)
    }

    async fn publish(
        &self,
        caller: &Caller,
        date: Option<NaiveDate>,
        content: HostelInfoContent,
    ) -> Result<HostelInfo, Error> {
        caller.require_admin("update hostel information")?;
        let now = self.clock.utc();
        let date = date.unwrap_or_else(|| now.date_naive());

        let existing = self
            .repo
            .find_by_date(date)
            .await
            .map_err(map_repository_error)?;
        let info = match existing {
            Some(current) => current.revise(content),
            None => HostelInfo::publish(date, content, now),
        }
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.repo.upsert(&info).await.map_err(map_repository_error)?;
        info!(%date, actor = %caller.user_id(), "hostel info published");

        self.repo
            .find_by_date(date)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::internal(format!("hostel info for {date} missing after upsert")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockHostelInfoRepository;
    use crate::domain::{ErrorCode, UserId, WardenContact};
    use chrono::{TimeZone, Utc};
    use mockable::MockClock;
    use rstest::rstest;
    use std::sync::Mutex;

    fn clock() -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(
            Utc.with_ymd_and_hms(2024, 1, 10, 7, 0, 0)
                .single()
                .expect("valid timestamp"),
        );
        Arc::new(clock)
    }

    fn content(menu: &str) -> HostelInfoContent {
        HostelInfoContent {
            mess_menu: menu.to_owned(),
            notice: "Water supply off 2-4pm".to_owned(),
            warden_contacts: vec![WardenContact {
                name: "Mr. Iyer".to_owned(),
                phone: "+91 90000 00000".to_owned(),
                position: "Chief Warden".to_owned(),
            }],
        }
    }

    #[rstest]
    #[tokio::test]
    async fn get_defaults_to_today_and_tolerates_absence() {
        let mut repo = MockHostelInfoRepository::new();
        repo.expect_find_by_date()
            .times(1)
            .withf(|date| *date == NaiveDate::from_ymd_opt(2024, 1, 10).expect("date"))
            .returning(|_| Ok(None));

        let service = HostelInfoServiceImpl::new(Arc::new(repo), clock());
        let info = service
            .get(&Caller::student(UserId::random()), None)
            .await
            .expect("read succeeds");
        assert!(info.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn publish_replaces_existing_record_in_place() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).expect("date");
        let original =
            HostelInfo::publish(date, content("Poha"), Utc::now()).expect("valid content");
        let original_id = original.id();
        let store = Arc::new(Mutex::new(Some(original)));
        let read_store = Arc::clone(&store);
        let write_store = Arc::clone(&store);

        let mut repo = MockHostelInfoRepository::new();
        repo.expect_find_by_date()
            .times(2)
            .returning(move |_| Ok(read_store.lock().expect("lock").clone()));
        repo.expect_upsert().times(1).returning(move |info| {
            *write_store.lock().expect("lock") = Some(info.clone());
            Ok(())
        });

        let service = HostelInfoServiceImpl::new(Arc::new(repo), clock());
        let info = service
            .publish(&Caller::admin(UserId::random()), None, content("Upma"))
            .await
            .expect("publish succeeds");
        assert_eq!(info.id(), original_id);
        assert_eq!(info.mess_menu(), "Upma");
    }

    #[rstest]
    #[tokio::test]
    async fn students_cannot_publish() {
        let mut repo = MockHostelInfoRepository::new();
        repo.expect_upsert().times(0);
        let service = HostelInfoServiceImpl::new(Arc::new(repo), clock());
        let err = service
            .publish(&Caller::student(UserId::random()), None, content("Upma"))
            .await
            .expect_err("admin only");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
