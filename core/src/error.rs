use chrono::NaiveDate;
use thiserror::Error;

/// Requests rejected before they reach the record store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttendanceError {
    #[error("{0} is a weekend; only working days can be registered")]
    WeekendDate(NaiveDate),
}
