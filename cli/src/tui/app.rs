use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use presencia_core::{
    shift_month, AttendanceError, AttendanceService, CheckIn, DashboardUseCase, KeyValueStore,
    LicenseEntry, MonthCalendar, MonthSummary, WorkMode,
};

pub enum InputMode {
    Normal,
    License,
}

pub struct App<'a, S: KeyValueStore> {
    pub service: &'a AttendanceService<S>,
    pub today: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub selected: NaiveDate,
    pub calendar: MonthCalendar,
    pub summary: MonthSummary,
    pub licenses: Vec<LicenseEntry>,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub message: Option<String>,
}

impl<'a, S: KeyValueStore> App<'a, S> {
    pub fn new(service: &'a AttendanceService<S>, today: NaiveDate) -> Result<Self> {
        let usecase = DashboardUseCase::new(service.store());
        let (year, month) = (today.year(), today.month());
        Ok(App {
            service,
            today,
            year,
            month,
            selected: today,
            calendar: usecase.month_calendar(year, month, today)?,
            summary: usecase.month_summary(year, month, today)?,
            licenses: service.store().month_licenses(year, month)?,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            message: None,
        })
    }

    fn reload(&mut self) {
        let usecase = DashboardUseCase::new(self.service.store());
        let loaded = usecase
            .month_calendar(self.year, self.month, self.today)
            .and_then(|calendar| {
                let summary = usecase.month_summary(self.year, self.month, self.today)?;
                let licenses = self.service.store().month_licenses(self.year, self.month)?;
                Ok((calendar, summary, licenses))
            });
        match loaded {
            Ok((calendar, summary, licenses)) => {
                self.calendar = calendar;
                self.summary = summary;
                self.licenses = licenses;
            }
            Err(e) => self.message = Some(format!("Could not load month: {}", e)),
        }
    }

    /// Moves the selection; crossing a month boundary switches months.
    pub fn move_selection(&mut self, days: i64) {
        self.message = None;
        self.selected += Duration::days(days);
        if (self.selected.year(), self.selected.month()) != (self.year, self.month) {
            self.year = self.selected.year();
            self.month = self.selected.month();
            self.reload();
        }
    }

    pub fn next_month(&mut self) {
        self.shift_month(1);
    }

    pub fn previous_month(&mut self) {
        self.shift_month(-1);
    }

    fn shift_month(&mut self, delta: i32) {
        let (year, month) = shift_month(self.year, self.month, delta);
        self.year = year;
        self.month = month;
        self.selected = if (year, month) == (self.today.year(), self.today.month()) {
            self.today
        } else {
            NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(self.today)
        };
        self.reload();
    }

    pub fn toggle(&mut self, mode: WorkMode) {
        self.message = Some(match self.service.check_in(self.selected, mode) {
            Ok(CheckIn::Registered(_)) => format!("{} registered for {}", mode, self.selected),
            Ok(CheckIn::Removed) => format!("Record removed for {}", self.selected),
            Err(e) => error_message(e),
        });
        self.reload();
    }

    pub fn clear_selected(&mut self) {
        self.message = Some(match self.service.clear(self.selected) {
            Ok(true) => format!("Record removed for {}", self.selected),
            Ok(false) => format!("Nothing registered on {}", self.selected),
            Err(e) => error_message(e),
        });
        self.reload();
    }

    pub fn enter_license_mode(&mut self) {
        self.input_mode = InputMode::License;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Registers a license on the selected day with the typed category.
    pub fn submit_license(&mut self) {
        let category = Some(self.input.trim().to_string()).filter(|c| !c.is_empty());
        self.message = Some(match self.service.register_license(self.selected, category) {
            Ok(record) => format!(
                "License registered for {} ({})",
                self.selected,
                record.attendance.license_category().unwrap_or_default()
            ),
            Err(e) => error_message(e),
        });
        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
        self.reload();
    }
}

fn error_message(err: anyhow::Error) -> String {
    match err.downcast_ref::<AttendanceError>() {
        Some(e) => e.to_string(),
        None => format!("Error: {}", err),
    }
}
