use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::{AlertStatus, OfficeDaysNeeded, TomorrowSuggestion};
use crate::model::stats::MonthStats;

/// Everything the dashboard shows for one month.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub stats: MonthStats,
    pub total_working_days: u32,
    /// Working days minus license days.
    pub effective_working_days: u32,
    pub elapsed_working_days: u32,
    pub calendar_days_left: u32,
    pub percentage: f64,
    pub remaining: OfficeDaysNeeded,
    pub projected: f64,
    pub on_track: bool,
    pub suggestion: TomorrowSuggestion,
    pub alert: AlertStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DayStatus {
    Weekend,
    Office,
    Remote,
    License { category: String },
    /// A working day with nothing registered.
    Open,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub status: DayStatus,
    pub is_today: bool,
}

/// Monday-first month grid; `None` cells pad the first and last week.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[Option<CalendarDay>; 7]>,
}

impl MonthCalendar {
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flatten().flatten()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days().find(|d| d.date == date)
    }
}
