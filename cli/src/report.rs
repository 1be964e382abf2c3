use chrono::{Datelike, NaiveDate};
use presencia_core::{
    AlertStatus, CheckIn, DayStatus, LicenseEntry, MonthCalendar, MonthSummary, Suggestion,
    TomorrowSuggestion, WorkMode, TARGET_PERCENTAGE,
};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct LicenseRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    weekday: String,
    #[tabled(rename = "Type")]
    category: String,
}

pub fn month_title(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{:04}-{:02}", year, month))
}

pub fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

pub fn suggestion_reason(suggestion: &TomorrowSuggestion) -> String {
    let remaining = suggestion.remaining_days;
    let needed = suggestion.needed_office_days;
    match suggestion.suggestion {
        Suggestion::None => "No working days left this month".to_string(),
        Suggestion::Remote => format!(
            "Target reached! You can work remotely the remaining {} days",
            remaining
        ),
        Suggestion::Office if needed >= remaining => format!(
            "You need the office on all {} remaining days to reach 60%",
            remaining
        ),
        Suggestion::Office => format!(
            "Tight margin: {} office days needed out of {} remaining",
            needed, remaining
        ),
        Suggestion::Any => format!(
            "Free choice. You need {} office days and have {} days left",
            needed, remaining
        ),
    }
}

pub fn suggestion_label(suggestion: Suggestion) -> &'static str {
    match suggestion {
        Suggestion::Office => "Office",
        Suggestion::Remote => "Remote",
        Suggestion::Any => "Either",
        Suggestion::None => "-",
    }
}

pub fn alert_message(summary: &MonthSummary) -> String {
    match summary.alert {
        AlertStatus::Success if summary.percentage >= TARGET_PERCENTAGE => {
            "Target met! Keep it up.".to_string()
        }
        AlertStatus::Success => format!("On track. Projection: {}", percent(summary.projected)),
        AlertStatus::Warning => format!(
            "Heads up: you need {} more office days",
            summary.remaining.needed
        ),
        AlertStatus::Danger => "Reaching 60% is no longer possible this month".to_string(),
    }
}

fn alert_color(alert: AlertStatus) -> &'static str {
    match alert {
        AlertStatus::Success => "\x1b[1;32m",
        AlertStatus::Warning => "\x1b[1;33m",
        AlertStatus::Danger => "\x1b[1;31m",
    }
}

pub fn print_check_in(date: NaiveDate, mode: WorkMode, outcome: &CheckIn) {
    match outcome {
        CheckIn::Registered(_) => match mode {
            WorkMode::Office => println!("Office registered: {}", date),
            WorkMode::Remote => println!("Remote registered: {}", date),
        },
        CheckIn::Removed => println!("Record removed: {}", date),
    }
}

pub fn print_summary(summary: &MonthSummary) {
    let stats = &summary.stats;

    println!("\n\x1b[1;36m{}\x1b[0m", month_title(summary.year, summary.month));
    println!("  Presence:        {}", percent(summary.percentage));
    println!("  Office days:     {}", stats.office_days);
    println!("  Remote days:     {}", stats.remote_days);
    println!("  License days:    {}", stats.license_days);
    println!(
        "  Working days:    {} ({} effective, {} elapsed)",
        summary.total_working_days, summary.effective_working_days, summary.elapsed_working_days
    );
    println!(
        "  Office target:   {} ({} still needed)",
        summary.remaining.target_total, summary.remaining.needed
    );
    println!("  Days to decide:  {}", summary.remaining.remaining_days.max(0));
    println!("  Projection:      {}", percent(summary.projected));
    println!();
    println!(
        "{}{}\x1b[0m",
        alert_color(summary.alert),
        alert_message(summary)
    );
    println!(
        "Tomorrow: {} - {}",
        suggestion_label(summary.suggestion.suggestion),
        suggestion_reason(&summary.suggestion)
    );
}

fn cell_marker(status: &DayStatus) -> &'static str {
    match status {
        DayStatus::Office => "O",
        DayStatus::Remote => "R",
        DayStatus::License { .. } => "L",
        DayStatus::Weekend | DayStatus::Open => " ",
    }
}

pub fn print_calendar(calendar: &MonthCalendar) {
    println!("\n\x1b[1;36m{}\x1b[0m", month_title(calendar.year, calendar.month));
    println!(" Mo   Tu   We   Th   Fr   Sa   Su");

    for week in &calendar.weeks {
        let line: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(day) => {
                    let text = format!("{:>2}{:<2}", day.date.day(), cell_marker(&day.status));
                    match (&day.status, day.is_today) {
                        (_, true) => format!("\x1b[7m{}\x1b[0m", text),
                        (DayStatus::Weekend, _) => format!("\x1b[2m{}\x1b[0m", text),
                        _ => text,
                    }
                }
                None => "    ".to_string(),
            })
            .collect();
        println!(" {}", line.join(" "));
    }
    println!("\nO office  R remote  L license");
}

pub fn print_licenses(year: i32, month: u32, licenses: &[LicenseEntry]) {
    if licenses.is_empty() {
        println!("No licenses registered in {}.", month_title(year, month));
        return;
    }

    let rows: Vec<LicenseRow> = licenses
        .iter()
        .map(|l| LicenseRow {
            date: l.date.format("%Y-%m-%d").to_string(),
            weekday: l.date.format("%a").to_string(),
            category: l.category.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.modify(Rows::first(), Color::FG_CYAN); // Header color

    println!("\n\x1b[1;36mLicenses, {}\x1b[0m", month_title(year, month));
    println!("{}", table);
}
