use chrono::{Datelike, Duration, NaiveDate, Weekday};
use anyhow::{anyhow, Result};

/// Parses a day relative to `today`.
///
/// Accepts `today`, `yesterday`, `tomorrow`, `+Nd`/`-Nd`/`+Nw`/`-Nw`,
/// weekday names (`fri` is the most recent Friday on or before today,
/// `2:fri` the one before that) and `YYYY-MM-DD`.
pub fn parse_day(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yest" => return today.pred_opt().ok_or_else(|| out_of_range(input)),
        "tomorrow" | "tom" => return today.succ_opt().ok_or_else(|| out_of_range(input)),
        _ => {}
    }

    // 2. Relative format (+Nd, -Nw)
    if input.starts_with('+') || input.starts_with('-') {
        let (sign, rest) = input.split_at(1);
        if rest.len() < 2 {
            return Err(anyhow!("Invalid relative format: {}", input));
        }
        let (num_str, unit) = rest.split_at(rest.len() - 1);
        let count: i64 = num_str
            .parse()
            .map_err(|_| anyhow!("Invalid relative format: {}", input))?;
        let count = if sign == "-" { count.checked_neg() } else { Some(count) };

        let offset = match unit {
            "d" => count.and_then(Duration::try_days),
            "w" => count.and_then(Duration::try_weeks),
            _ => return Err(anyhow!("Unknown unit in relative time: {}", unit)),
        };
        return offset
            .and_then(|offset| today.checked_add_signed(offset))
            .ok_or_else(|| out_of_range(input));
    }

    // 3. Weekday format (fri, 2:fri)
    if let Some((count, day_str)) = parse_weekday_token(input) {
        if let Ok(target_weekday) = parse_weekday_str(day_str) {
            if count < 1 {
                return Err(anyhow!("Weekday count must be positive: {}", input));
            }
            let mut days_back = today.weekday().num_days_from_monday() as i64
                - target_weekday.num_days_from_monday() as i64;
            if days_back < 0 {
                days_back += 7;
            }
            return (count - 1)
                .checked_mul(7)
                .and_then(|weeks| weeks.checked_add(days_back))
                .and_then(Duration::try_days)
                .and_then(|back| today.checked_sub_signed(back))
                .ok_or_else(|| out_of_range(input));
        }
    }

    // 4. Fallback to ISO date
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| anyhow!("Could not parse date: {}", input))
}

fn out_of_range(input: &str) -> anyhow::Error {
    anyhow!("Date out of range: {}", input)
}

/// Parses a year-month relative to `today`: `this`, `prev`, `next` or `YYYY-MM`.
pub fn parse_month(input: &str, today: NaiveDate) -> Result<(i32, u32)> {
    let current = (today.year(), today.month());
    match input.trim().to_lowercase().as_str() {
        "this" | "cur" | "current" => return Ok(current),
        "prev" | "last" => return Ok(shift_month(current.0, current.1, -1)),
        "next" => return Ok(shift_month(current.0, current.1, 1)),
        _ => {}
    }

    let (year_str, month_str) = input
        .trim()
        .split_once('-')
        .ok_or_else(|| anyhow!("Could not parse month: {}", input))?;
    let year: i32 = year_str
        .parse()
        .map_err(|_| anyhow!("Invalid year: {}", year_str))?;
    let month: u32 = month_str
        .parse()
        .map_err(|_| anyhow!("Invalid month: {}", month_str))?;
    if !(1..=12).contains(&month) {
        return Err(anyhow!("Month out of range: {}", month));
    }
    Ok((year, month))
}

/// Moves a 1-based year-month by `delta` months.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

fn parse_weekday_token(input: &str) -> Option<(i64, &str)> {
    if input.contains(':') {
        let parts: Vec<&str> = input.split(':').collect();
        if parts.len() == 2 {
            if let Ok(count) = parts[0].parse::<i64>() {
                return Some((count, parts[1]));
            }
        }
    } else {
        // Just "fri" means 1:fri
        return Some((1, input));
    }
    None
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Invalid weekday")),
    }
}
