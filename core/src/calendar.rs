use chrono::{Datelike, Local, NaiveDate, Weekday};

/// Returns true for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First and last calendar day of the month, or `None` for an invalid month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    month_bounds(year, month)
        .map(|(_, last)| last.day())
        .unwrap_or(0)
}

/// All Monday-Friday dates of the month in ascending order.
///
/// An invalid month (0 or > 12) has no working days.
pub fn working_days_in_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some((first, last)) = month_bounds(year, month) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| *d <= last)
        .filter(|d| !is_weekend(*d))
        .collect()
}

pub fn count_working_days_in_month(year: i32, month: u32) -> usize {
    working_days_in_month(year, month).len()
}

/// Working days of the month up to and including `today`.
pub fn working_days_until(year: i32, month: u32, today: NaiveDate) -> Vec<NaiveDate> {
    working_days_in_month(year, month)
        .into_iter()
        .filter(|d| *d <= today)
        .collect()
}

/// Working days of the month strictly after `today`.
///
/// Together with [`working_days_until`] this partitions the month, so a day
/// already acted upon is never also counted as remaining.
pub fn remaining_working_days_after(year: i32, month: u32, today: NaiveDate) -> Vec<NaiveDate> {
    working_days_in_month(year, month)
        .into_iter()
        .filter(|d| *d > today)
        .collect()
}

pub fn working_days_until_today(year: i32, month: u32) -> Vec<NaiveDate> {
    working_days_until(year, month, Local::now().date_naive())
}

pub fn remaining_working_days(year: i32, month: u32) -> Vec<NaiveDate> {
    remaining_working_days_after(year, month, Local::now().date_naive())
}

/// Number of empty cells before the 1st in a Monday-first week grid.
pub fn leading_blank_days(year: i32, month: u32) -> u32 {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        // Sunday wraps to the last column.
        Some(first) => first.weekday().num_days_from_monday(),
        None => 0,
    }
}

/// Monday-first weeks of the month; cells outside the month are `None`.
pub fn month_grid(year: i32, month: u32) -> Vec<[Option<NaiveDate>; 7]> {
    let Some((first, last)) = month_bounds(year, month) else {
        return Vec::new();
    };

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut column = leading_blank_days(year, month) as usize;

    for date in first.iter_days().take_while(|d| *d <= last) {
        week[column] = Some(date);
        column += 1;
        if column == 7 {
            weeks.push(week);
            week = [None; 7];
            column = 0;
        }
    }
    if column > 0 {
        weeks.push(week);
    }
    weeks
}
