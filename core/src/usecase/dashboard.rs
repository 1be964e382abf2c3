use anyhow::Result;
use chrono::NaiveDate;

use crate::analytics::{
    alert_status, presence_percentage, project_final_percentage, remaining_office_days_needed,
    suggest_tomorrow, TARGET_PERCENTAGE,
};
use crate::calendar::{
    count_working_days_in_month, is_weekend, month_grid, remaining_working_days_after,
    working_days_until,
};
use crate::model::record::Attendance;
use crate::repository::{KeyValueStore, RecordStore};
use crate::service::dto::{CalendarDay, DayStatus, MonthCalendar, MonthSummary};

pub struct DashboardUseCase<'a, S: KeyValueStore> {
    store: &'a RecordStore<S>,
}

impl<'a, S: KeyValueStore> DashboardUseCase<'a, S> {
    pub fn new(store: &'a RecordStore<S>) -> Self {
        Self { store }
    }

    pub fn month_summary(&self, year: i32, month: u32, today: NaiveDate) -> Result<MonthSummary> {
        let stats = self.store.month_stats(year, month)?;

        // 1. Calendar counts
        let total_working_days = count_working_days_in_month(year, month) as u32;
        let effective_working_days = total_working_days.saturating_sub(stats.license_days);
        let elapsed_working_days = working_days_until(year, month, today).len() as u32;
        let calendar_days_left = remaining_working_days_after(year, month, today).len() as u32;

        // 2. Metrics
        let percentage = presence_percentage(stats.office_days, stats.total_registered);
        let remaining = remaining_office_days_needed(
            stats.office_days,
            effective_working_days,
            stats.total_registered,
        );
        let projected = project_final_percentage(
            stats.office_days,
            stats.remote_days,
            remaining.remaining_days.max(0) as u32,
        );
        let suggestion = suggest_tomorrow(
            stats.office_days,
            stats.remote_days,
            total_working_days,
            stats.license_days,
        );
        let alert = alert_status(percentage, projected, remaining.possible);

        Ok(MonthSummary {
            year,
            month,
            stats,
            total_working_days,
            effective_working_days,
            elapsed_working_days,
            calendar_days_left,
            percentage,
            remaining,
            projected,
            on_track: projected >= TARGET_PERCENTAGE || percentage >= TARGET_PERCENTAGE,
            suggestion,
            alert,
        })
    }

    pub fn month_calendar(&self, year: i32, month: u32, today: NaiveDate) -> Result<MonthCalendar> {
        let records = self.store.month_records(year, month)?;

        let weeks = month_grid(year, month)
            .into_iter()
            .map(|week| {
                week.map(|cell| {
                    cell.map(|date| {
                        let status = if is_weekend(date) {
                            DayStatus::Weekend
                        } else {
                            match records.get(&date).map(|r| &r.attendance) {
                                Some(Attendance::Office) => DayStatus::Office,
                                Some(Attendance::Remote) => DayStatus::Remote,
                                Some(Attendance::License { category }) => DayStatus::License {
                                    category: category.clone(),
                                },
                                None => DayStatus::Open,
                            }
                        };
                        CalendarDay {
                            date,
                            status,
                            is_today: date == today,
                        }
                    })
                })
            })
            .collect();

        Ok(MonthCalendar { year, month, weeks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{AlertStatus, Suggestion};
    use crate::repository::MemoryKeyValueStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> RecordStore<MemoryKeyValueStore> {
        RecordStore::open(MemoryKeyValueStore::new()).unwrap()
    }

    #[test]
    fn test_empty_month_summary() {
        let store = store();
        let usecase = DashboardUseCase::new(&store);

        let summary = usecase.month_summary(2024, 2, date(2024, 2, 14)).unwrap();

        assert_eq!(summary.total_working_days, 21);
        assert_eq!(summary.effective_working_days, 21);
        assert_eq!(summary.elapsed_working_days, 10);
        assert_eq!(summary.calendar_days_left, 11);
        assert_eq!(summary.percentage, 0.0);
        assert_eq!(summary.remaining.target_total, 13);
        assert_eq!(summary.remaining.remaining_days, 21);
        assert_eq!(summary.projected, TARGET_PERCENTAGE);
        assert!(summary.on_track);
        assert_eq!(summary.suggestion.suggestion, Suggestion::Any);
        assert_eq!(summary.alert, AlertStatus::Success);
    }

    #[test]
    fn test_summary_with_licenses_and_remote_streak() {
        let store = store();
        // first two weeks of February 2024, all remote, plus two licenses
        for d in [1, 2, 5, 6, 7, 8, 9, 12] {
            store.set(date(2024, 2, d), Attendance::Remote).unwrap();
        }
        store.set(date(2024, 2, 13), Attendance::license(None)).unwrap();
        store.set(date(2024, 2, 14), Attendance::license(None)).unwrap();

        let usecase = DashboardUseCase::new(&store);
        let summary = usecase.month_summary(2024, 2, date(2024, 2, 14)).unwrap();

        // 19 effective days, target 12, 11 days left
        assert_eq!(summary.effective_working_days, 19);
        assert_eq!(summary.remaining.target_total, 12);
        assert_eq!(summary.remaining.remaining_days, 11);
        assert!(!summary.remaining.possible);
        assert_eq!(summary.projected, 0.0);
        assert!(!summary.on_track);
        assert_eq!(summary.alert, AlertStatus::Danger);
        assert_eq!(summary.suggestion.suggestion, Suggestion::Office);
    }

    #[test]
    fn test_month_calendar_classifies_days() {
        let store = store();
        store.set(date(2024, 9, 2), Attendance::Office).unwrap();
        store.set(date(2024, 9, 3), Attendance::Remote).unwrap();
        store
            .set(date(2024, 9, 4), Attendance::license(Some("Medical".to_string())))
            .unwrap();

        let usecase = DashboardUseCase::new(&store);
        let calendar = usecase.month_calendar(2024, 9, date(2024, 9, 3)).unwrap();

        // September 2024 starts on a Sunday
        assert_eq!(calendar.weeks[0][6].as_ref().map(|d| d.date), Some(date(2024, 9, 1)));
        assert_eq!(calendar.day(date(2024, 9, 1)).unwrap().status, DayStatus::Weekend);
        assert_eq!(calendar.day(date(2024, 9, 2)).unwrap().status, DayStatus::Office);
        assert!(calendar.day(date(2024, 9, 3)).unwrap().is_today);
        assert_eq!(
            calendar.day(date(2024, 9, 4)).unwrap().status,
            DayStatus::License {
                category: "Medical".to_string()
            }
        );
        assert_eq!(calendar.day(date(2024, 9, 5)).unwrap().status, DayStatus::Open);
        assert_eq!(calendar.days().count(), 30);
    }
}
