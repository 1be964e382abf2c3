use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LICENSE_CATEGORY: &str = "Other";

fn default_license_category() -> String {
    DEFAULT_LICENSE_CATEGORY.to_string()
}

/// What the user did on a working day.
///
/// Persisted internally tagged, e.g. `{"type":"license","licenseType":"Vacation"}`,
/// so a license category can only exist on a license record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Attendance {
    Office,
    Remote,
    License {
        #[serde(rename = "licenseType", default = "default_license_category")]
        category: String,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceKind {
    Office,
    Remote,
    License,
}

/// The two modes a working day can be checked in as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkMode {
    Office,
    Remote,
}

impl Attendance {
    pub fn license(category: Option<String>) -> Self {
        let category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(default_license_category);
        Attendance::License { category }
    }

    pub fn kind(&self) -> AttendanceKind {
        match self {
            Attendance::Office => AttendanceKind::Office,
            Attendance::Remote => AttendanceKind::Remote,
            Attendance::License { .. } => AttendanceKind::License,
        }
    }

    pub fn license_category(&self) -> Option<&str> {
        match self {
            Attendance::License { category } => Some(category),
            _ => None,
        }
    }
}

impl From<WorkMode> for Attendance {
    fn from(mode: WorkMode) -> Self {
        match mode {
            WorkMode::Office => Attendance::Office,
            WorkMode::Remote => Attendance::Remote,
        }
    }
}

impl From<WorkMode> for AttendanceKind {
    fn from(mode: WorkMode) -> Self {
        match mode {
            WorkMode::Office => AttendanceKind::Office,
            WorkMode::Remote => AttendanceKind::Remote,
        }
    }
}

impl fmt::Display for AttendanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttendanceKind::Office => "office",
            AttendanceKind::Remote => "remote",
            AttendanceKind::License => "license",
        };
        f.write_str(s)
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&AttendanceKind::from(*self), f)
    }
}

/// A single day's registration. The date is the key it is stored under.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DayRecord {
    #[serde(flatten)]
    pub attendance: Attendance,
    pub timestamp: DateTime<Utc>,
}

impl DayRecord {
    pub fn new(attendance: Attendance) -> Self {
        Self {
            attendance,
            timestamp: Utc::now(),
        }
    }

    pub fn kind(&self) -> AttendanceKind {
        self.attendance.kind()
    }
}
