use anyhow::Result;
use chrono::NaiveDate;
use log::info;

use crate::calendar::is_weekend;
use crate::error::AttendanceError;
use crate::model::record::{Attendance, DayRecord, WorkMode};
use crate::repository::{KeyValueStore, RecordStore};

#[derive(Debug, Clone, PartialEq)]
pub enum CheckIn {
    Registered(DayRecord),
    /// The day already had the same mode, so it was cleared.
    Removed,
}

/// Applies user actions to the record store, enforcing the rules the store
/// itself does not: no weekend registrations, and check-ins toggle.
pub struct AttendanceService<S: KeyValueStore> {
    store: RecordStore<S>,
}

impl<S: KeyValueStore> AttendanceService<S> {
    pub fn new(store: RecordStore<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn check_in(&self, date: NaiveDate, mode: WorkMode) -> Result<CheckIn> {
        ensure_working_day(date)?;

        let existing = self.store.get(date)?;
        if existing.is_some_and(|r| r.attendance == Attendance::from(mode)) {
            self.store.delete(date)?;
            info!("{} toggled off for {}", mode, date);
            return Ok(CheckIn::Removed);
        }

        let record = self.store.set(date, mode.into())?;
        Ok(CheckIn::Registered(record))
    }

    pub fn register_license(&self, date: NaiveDate, category: Option<String>) -> Result<DayRecord> {
        ensure_working_day(date)?;
        self.store.set(date, Attendance::license(category))
    }

    /// Removes the license on `date`. Office and remote records are left alone.
    pub fn remove_license(&self, date: NaiveDate) -> Result<bool> {
        match self.store.get(date)? {
            Some(record) if record.attendance.license_category().is_some() => {
                self.store.delete(date)
            }
            _ => Ok(false),
        }
    }

    pub fn clear(&self, date: NaiveDate) -> Result<bool> {
        self.store.delete(date)
    }
}

fn ensure_working_day(date: NaiveDate) -> Result<()> {
    if is_weekend(date) {
        return Err(AttendanceError::WeekendDate(date).into());
    }
    Ok(())
}
