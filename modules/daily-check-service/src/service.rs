//! Day-level operations on top of the repository.

use crate::day::{day_key, day_readable, parse_day};
use crate::error::Result;
use crate::repository::Repository;
use chrono::NaiveDate;
use daily_check_types::DayRecord;

/// Source of "today" for the write path.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

pub struct DayService {
    repo: Repository,
    clock: Box<dyn Clock>,
}

impl DayService {
    pub fn new(repo: Repository, clock: Box<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Loads a member's day and recomputes its readable label from `day`.
    pub fn get_day(&self, member_id: &str, date: NaiveDate) -> Result<DayRecord> {
        let mut record = self.repo.get(member_id, date)?;
        let parsed = parse_day(&record.day)?;
        record.day_readable = day_readable(parsed);
        Ok(record)
    }

    /// Records today's ratings; any `day` sent by the caller is replaced.
    pub fn add_day(&self, member_id: &str, mut record: DayRecord) -> Result<DayRecord> {
        record.day = day_key(self.today());
        self.repo.save(member_id, record)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::DailyCheckError;
    use crate::store::Store;
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};

    pub(crate) struct FixedClock(pub NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    pub(crate) fn jan_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    pub(crate) fn service_on(date: NaiveDate) -> (TempDir, Arc<Store>, DayService) {
        let dir = tempdir().unwrap();
        let store = Arc::new(Store::open(dir.path().join("test.db")).unwrap());
        let service = DayService::new(
            Repository::new(store.clone()),
            Box::new(FixedClock(date)),
        );
        (dir, store, service)
    }

    #[test]
    fn test_add_then_get_round_trip() {
        let (_dir, _store, service) = service_on(jan_10());
        let saved = service
            .add_day(
                "alice",
                DayRecord {
                    sleep: 3,
                    energy: 4,
                    serenity: 2,
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(saved.day, "2024-01-10");

        let loaded = service.get_day("alice", jan_10()).unwrap();
        assert_eq!(loaded.day_readable, "Wednesday, January 10 2024");
        assert_eq!(
            DayRecord {
                day_readable: String::new(),
                ..loaded
            },
            saved
        );
    }

    #[test]
    fn test_add_ignores_caller_day() {
        let (_dir, _store, service) = service_on(jan_10());
        let saved = service
            .add_day(
                "alice",
                DayRecord {
                    day: "1999-12-31".into(),
                    work: 5,
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(saved.day, "2024-01-10");

        let old = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        assert_eq!(service.get_day("alice", old).unwrap().work, 0);
        assert_eq!(service.get_day("alice", jan_10()).unwrap().work, 5);
    }

    #[test]
    fn test_get_unwritten_day_is_zero_valued() {
        let (_dir, _store, service) = service_on(jan_10());
        let date = NaiveDate::from_ymd_opt(2023, 7, 4).unwrap();
        let loaded = service.get_day("bob", date).unwrap();
        assert_eq!(loaded.day, "2023-07-04");
        assert_eq!(loaded.day_readable, "Tuesday, July 4 2023");
        assert_eq!(loaded.sleep + loaded.energy + loaded.work, 0);
    }

    #[test]
    fn test_add_twice_keeps_latest() {
        let (_dir, _store, service) = service_on(jan_10());
        service
            .add_day("alice", DayRecord { sleep: 1, intellect: 9, ..Default::default() })
            .unwrap();
        service
            .add_day("alice", DayRecord { sleep: 2, ..Default::default() })
            .unwrap();

        let loaded = service.get_day("alice", jan_10()).unwrap();
        assert_eq!(loaded.sleep, 2);
        assert_eq!(loaded.intellect, 0);
    }

    #[test]
    fn test_readable_label_depends_only_on_day() {
        let (_dir, _store, service) = service_on(jan_10());
        service
            .add_day("alice", DayRecord { sleep: 1, ..Default::default() })
            .unwrap();
        let first = service.get_day("alice", jan_10()).unwrap();

        service
            .add_day("alice", DayRecord { family: 8, ..Default::default() })
            .unwrap();
        let second = service.get_day("alice", jan_10()).unwrap();

        assert_eq!(first.day_readable, second.day_readable);
    }

    #[test]
    fn test_unparsable_stored_day_is_invalid_date() {
        let (_dir, store, service) = service_on(jan_10());
        let alice = store.ensure_namespace("alice").unwrap();
        store
            .update(&alice, |tx| {
                tx.insert("2024-01-10", r#"{"day":"someday","sleep":1}"#)?;
                Ok(())
            })
            .unwrap();

        assert!(matches!(
            service.get_day("alice", jan_10()),
            Err(DailyCheckError::InvalidDate { .. })
        ));
    }
}
