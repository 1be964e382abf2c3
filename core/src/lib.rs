pub mod analytics;
pub mod calendar;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use analytics::{AlertStatus, OfficeDaysNeeded, Suggestion, TomorrowSuggestion, TARGET_PERCENTAGE};
pub use config::Config;
pub use error::AttendanceError;
pub use model::document::{AttendanceDocument, Settings};
pub use model::record::{Attendance, AttendanceKind, DayRecord, WorkMode};
pub use model::stats::{LicenseEntry, MonthRecordSet, MonthStats};
pub use repository::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, RecordStore};
pub use input::{expand_key, parse_work_mode};
pub use time::{parse_day, parse_month, shift_month};
pub use service::attendance_service::{AttendanceService, CheckIn};
pub use service::dto::{CalendarDay, DayStatus, MonthCalendar, MonthSummary};
pub use usecase::dashboard::DashboardUseCase;
