//! Day records stored as JSON under `member → YYYY-MM-DD`.

use crate::day::{blank_day, day_key};
use crate::error::{DailyCheckError, Result};
use crate::store::Store;
use chrono::NaiveDate;
use daily_check_types::DayRecord;
use std::sync::Arc;

pub struct Repository {
    store: Arc<Store>,
}

impl Repository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Upserts `record` under its own `day` key.
    pub fn save(&self, member_id: &str, record: DayRecord) -> Result<DayRecord> {
        let tree = self.store.ensure_namespace(member_id)?;

        let bytes = serde_json::to_vec(&record)?;
        self.store.update(&tree, |tx| {
            tx.insert(record.day.as_bytes(), bytes.as_slice())?;
            Ok(())
        })?;

        Ok(record)
    }

    /// Returns the stored record, or a zero-valued one stamped with `date`.
    pub fn get(&self, member_id: &str, date: NaiveDate) -> Result<DayRecord> {
        let tree = self.store.ensure_namespace(member_id)?;

        let key = day_key(date);
        let stored = self.store.view(&tree, |tree| Ok(tree.get(key.as_bytes())?))?;

        match stored {
            Some(bytes) => {
                let mut record: DayRecord =
                    serde_json::from_slice(&bytes).map_err(DailyCheckError::Encoding)?;
                if record.day.is_empty() {
                    record.day = key;
                }
                Ok(record)
            }
            None => Ok(blank_day(date)),
        }
    }
}
