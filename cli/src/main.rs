mod report;
mod tui;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use log::debug;
use presencia_core::{
    parse_day, parse_month, parse_work_mode, AttendanceError, AttendanceService, Config,
    DashboardUseCase, FileKeyValueStore, RecordStore, WorkMode,
};

#[derive(Parser)]
#[command(name = "presencia")]
#[command(about = "Track hybrid work attendance against the 60% office target", long_about = None)]
struct Cli {
    /// Directory holding the attendance data (default: $PRESENCIA_HOME or ~/.presencia60)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Toggle an office day (default: today)
    Office { day: Option<String> },
    /// Toggle a remote day (default: today)
    Remote { day: Option<String> },
    /// Toggle a day by mode name or prefix (usage: check o fri)
    Check {
        mode: String,
        day: Option<String>,
    },
    /// Register a license (usage: license 2024-02-05 Vacation)
    License {
        day: String,
        category: Option<String>,
    },
    /// Remove the license on a day
    Unlicense { day: String },
    /// Remove whatever is registered on a day
    Clear { day: String },
    /// Show the month dashboard (usage: status 2024-02 | prev | next)
    Status {
        month: Option<String>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the month as a Monday-first calendar
    Calendar { month: Option<String> },
    /// List the licenses of a month
    Licenses { month: Option<String> },
    /// Open the Terminal User Interface
    Tui,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn resolve_day(day: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match day {
        Some(d) => parse_day(d, today),
        None => Ok(today),
    }
}

fn resolve_month(month: Option<&str>, today: NaiveDate) -> Result<(i32, u32)> {
    parse_month(month.unwrap_or("this"), today)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::resolve(cli.data_dir)?;
    debug!("using data directory {}", config.data_dir.display());
    let kv = FileKeyValueStore::new(Some(config.data_dir.clone()))?;
    let service = AttendanceService::new(RecordStore::open_with_key(kv, &config.store_key)?);
    let today = Local::now().date_naive();

    let result = match cli.command {
        Some(Commands::Office { day }) => {
            check_in(&service, day.as_deref(), WorkMode::Office, today)
        }
        Some(Commands::Remote { day }) => {
            check_in(&service, day.as_deref(), WorkMode::Remote, today)
        }
        Some(Commands::Check { mode, day }) => {
            let mode = parse_work_mode(&mode)?;
            check_in(&service, day.as_deref(), mode, today)
        }
        Some(Commands::License { day, category }) => {
            let date = parse_day(&day, today)?;
            service.register_license(date, category).map(|record| {
                let category = record.attendance.license_category().unwrap_or_default();
                println!("License registered: {} ({})", date, category);
            })
        }
        Some(Commands::Unlicense { day }) => {
            let date = parse_day(&day, today)?;
            if service.remove_license(date)? {
                println!("License removed: {}", date);
            } else {
                println!("No license registered on {}.", date);
            }
            Ok(())
        }
        Some(Commands::Clear { day }) => {
            let date = parse_day(&day, today)?;
            if service.clear(date)? {
                println!("Record removed: {}", date);
            } else {
                println!("Nothing registered on {}.", date);
            }
            Ok(())
        }
        Some(Commands::Status { month, json }) => {
            let (year, month) = resolve_month(month.as_deref(), today)?;
            let summary = DashboardUseCase::new(service.store()).month_summary(year, month, today)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                report::print_summary(&summary);
            }
            Ok(())
        }
        Some(Commands::Calendar { month }) => {
            let (year, month) = resolve_month(month.as_deref(), today)?;
            let calendar = DashboardUseCase::new(service.store()).month_calendar(year, month, today)?;
            report::print_calendar(&calendar);
            Ok(())
        }
        Some(Commands::Licenses { month }) => {
            let (year, month) = resolve_month(month.as_deref(), today)?;
            let licenses = service.store().month_licenses(year, month)?;
            report::print_licenses(year, month, &licenses);
            Ok(())
        }
        Some(Commands::Tui) | None => tui::run(&service),
    };

    // Weekend registrations are a user mistake, not a failure.
    match result {
        Err(err) => match err.downcast_ref::<AttendanceError>() {
            Some(e) => {
                println!("Error: {}", e);
                Ok(())
            }
            None => Err(err),
        },
        ok => ok,
    }
}

fn check_in(
    service: &AttendanceService<FileKeyValueStore>,
    day: Option<&str>,
    mode: WorkMode,
    today: NaiveDate,
) -> Result<()> {
    let date = resolve_day(day, today)?;
    let outcome = service.check_in(date, mode)?;
    report::print_check_in(date, mode, &outcome);
    Ok(())
}
