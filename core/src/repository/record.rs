use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};

use crate::calendar::month_bounds;
use crate::model::document::{AttendanceDocument, Settings};
use crate::model::record::{Attendance, DayRecord};
use crate::model::stats::{LicenseEntry, MonthRecordSet, MonthStats};
use crate::repository::traits::KeyValueStore;

pub const DEFAULT_STORE_KEY: &str = "presencia60_data";

/// Day records of one user, persisted as a single document under one key.
///
/// Every mutation loads the whole document, applies one change and writes it
/// back. The store does not check for weekends; callers do.
pub struct RecordStore<S: KeyValueStore> {
    kv: S,
    key: String,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn open(kv: S) -> Result<Self> {
        Self::open_with_key(kv, DEFAULT_STORE_KEY)
    }

    /// Opens the store, persisting a fresh document if the key is empty.
    pub fn open_with_key(kv: S, key: &str) -> Result<Self> {
        let store = Self {
            kv,
            key: key.to_string(),
        };
        if store.kv.get(&store.key)?.is_none() {
            info!("initializing attendance document under '{}'", store.key);
            store.save(&AttendanceDocument::default())?;
        }
        Ok(store)
    }

    /// Loads the document, substituting a default one when it is absent or
    /// is not valid JSON. Unreadable individual records are skipped.
    pub fn document(&self) -> Result<AttendanceDocument> {
        let Some(raw) = self.kv.get(&self.key)? else {
            debug!("no document under '{}', using defaults", self.key);
            return Ok(AttendanceDocument::default());
        };
        match serde_json::from_str(&raw) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                warn!("discarding unparseable document under '{}': {}", self.key, e);
                Ok(AttendanceDocument::default())
            }
        }
    }

    fn save(&self, doc: &AttendanceDocument) -> Result<()> {
        let raw = serde_json::to_string(doc)?;
        self.kv.set(&self.key, &raw)
    }

    pub fn settings(&self) -> Result<Settings> {
        Ok(self.document()?.settings)
    }

    pub fn get(&self, date: NaiveDate) -> Result<Option<DayRecord>> {
        Ok(self.document()?.records.remove(&date))
    }

    /// Inserts or overwrites the record for `date`.
    pub fn set(&self, date: NaiveDate, attendance: Attendance) -> Result<DayRecord> {
        let mut doc = self.document()?;
        let record = DayRecord::new(attendance);
        info!("set {} -> {}", date, record.kind());
        doc.records.insert(date, record.clone());
        self.save(&doc)?;
        Ok(record)
    }

    /// Removes the record for `date`; returns whether one existed.
    pub fn delete(&self, date: NaiveDate) -> Result<bool> {
        let mut doc = self.document()?;
        if doc.records.remove(&date).is_none() {
            debug!("delete {}: nothing registered", date);
            return Ok(false);
        }
        info!("deleted {}", date);
        self.save(&doc)?;
        Ok(true)
    }

    pub fn month_records(&self, year: i32, month: u32) -> Result<MonthRecordSet> {
        let Some((first, last)) = month_bounds(year, month) else {
            return Ok(MonthRecordSet::new());
        };
        let doc = self.document()?;
        Ok(doc
            .records_between(first, last)
            .map(|(date, record)| (*date, record.clone()))
            .collect())
    }

    pub fn month_stats(&self, year: i32, month: u32) -> Result<MonthStats> {
        let records = self.month_records(year, month)?;
        Ok(MonthStats::from_records(records.values()))
    }

    /// Licenses of the month in ascending date order.
    pub fn month_licenses(&self, year: i32, month: u32) -> Result<Vec<LicenseEntry>> {
        let records = self.month_records(year, month)?;
        Ok(records
            .into_iter()
            .filter_map(|(date, record)| match record.attendance {
                Attendance::License { category } => Some(LicenseEntry { date, category }),
                _ => None,
            })
            .collect())
    }

    pub fn today_record(&self) -> Result<Option<DayRecord>> {
        self.get(Local::now().date_naive())
    }
}
