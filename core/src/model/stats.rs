use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::record::{Attendance, DayRecord};

/// Records of one year-month, ordered by date.
pub type MonthRecordSet = BTreeMap<NaiveDate, DayRecord>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthStats {
    pub office_days: u32,
    pub remote_days: u32,
    pub license_days: u32,
    /// Office plus remote; licenses are excused and not counted.
    pub total_registered: u32,
}

impl MonthStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a DayRecord>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.add(&record.attendance);
        }
        stats
    }

    pub fn add(&mut self, attendance: &Attendance) {
        match attendance {
            Attendance::Office => self.office_days += 1,
            Attendance::Remote => self.remote_days += 1,
            Attendance::License { .. } => self.license_days += 1,
        }
        self.total_registered = self.office_days + self.remote_days;
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LicenseEntry {
    pub date: NaiveDate,
    #[serde(rename = "licenseType")]
    pub category: String,
}
