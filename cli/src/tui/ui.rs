use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};
use presencia_core::{AlertStatus, CalendarDay, DayStatus, KeyValueStore, TARGET_PERCENTAGE};

use crate::report::{alert_message, month_title, percent, suggestion_label, suggestion_reason};
use crate::tui::app::{App, InputMode};

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    office: Color,
    remote: Color,
    license: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    office: Color::Green,
    remote: Color::Blue,
    license: Color::Magenta,
};

pub fn draw<S: KeyValueStore>(f: &mut Frame, app: &App<S>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    // Header
    let header = Paragraph::new(Line::from(vec![
        Span::styled("PRESENCIA60  ", Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD)),
        Span::styled(" < ", Style::default().fg(THEME.muted)),
        Span::styled(month_title(app.year, app.month), Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
        Span::styled(" > ", Style::default().fg(THEME.muted)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55),
            Constraint::Percentage(45),
        ])
        .split(main_chunks[1]);

    draw_calendar(f, app, content_chunks[0]);
    draw_summary(f, app, content_chunks[1]);

    // Footer
    match app.input_mode {
        InputMode::Normal => {
            let help = app.message.clone().unwrap_or_else(|| {
                "←/→/↑/↓: Move | o: Office | r: Remote | l: License | d: Clear | [/]: Month | q: Quit".to_string()
            });
            let footer = Paragraph::new(help)
                .style(Style::default().fg(THEME.muted))
                .alignment(Alignment::Center);
            f.render_widget(footer, main_chunks[2]);
        }
        InputMode::License => {
            let prompt = "License type: ";
            let footer = Paragraph::new(format!("{}{}", prompt, app.input))
                .style(Style::default().fg(THEME.license));
            f.render_widget(footer, main_chunks[2]);
            f.set_cursor_position((
                main_chunks[2].x + (prompt.chars().count() + app.cursor_position) as u16,
                main_chunks[2].y,
            ));
        }
    }
}

fn day_cell<'a, S: KeyValueStore>(app: &App<S>, day: &CalendarDay) -> Cell<'a> {
    let (marker, color) = match &day.status {
        DayStatus::Office => ("O", THEME.office),
        DayStatus::Remote => ("R", THEME.remote),
        DayStatus::License { .. } => ("L", THEME.license),
        DayStatus::Weekend => (" ", THEME.muted),
        DayStatus::Open => (" ", THEME.text),
    };

    let mut style = Style::default().fg(color);
    if day.is_today {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    if day.date == app.selected {
        style = style.add_modifier(Modifier::REVERSED);
    }

    Cell::from(Span::styled(format!("{:>2} {}", day.date.day(), marker), style))
}

fn draw_calendar<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let header = Row::new(["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"].map(|d| {
        Cell::from(Span::styled(d, Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD)))
    }))
    .bottom_margin(1);

    let rows: Vec<Row> = app
        .calendar
        .weeks
        .iter()
        .map(|week| {
            Row::new(week.iter().map(|cell| match cell {
                Some(day) => day_cell(app, day),
                None => Cell::from(""),
            }))
            .bottom_margin(1)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(6); 7])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.muted))
                .title(" Calendar "),
        );
    f.render_widget(table, area);
}

fn draw_summary<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let summary = &app.summary;
    let stats = &summary.stats;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Gauge
            Constraint::Length(11), // Stats
            Constraint::Min(3),     // Licenses
        ])
        .split(area);

    // 1. Presence gauge
    let gauge_color = if summary.on_track { THEME.office } else { Color::Red };
    let gauge = Gauge::default()
        .block(Block::default().title(" Presence ").borders(Borders::ALL).border_type(BorderType::Rounded).border_style(Style::default().fg(THEME.muted)))
        .gauge_style(Style::default().fg(gauge_color))
        .ratio(summary.percentage.clamp(0.0, 1.0))
        .label(format!("{} (target {})", percent(summary.percentage), percent(TARGET_PERCENTAGE)));
    f.render_widget(gauge, chunks[0]);

    // 2. Overview
    let alert_color = match summary.alert {
        AlertStatus::Success => THEME.office,
        AlertStatus::Warning => Color::Yellow,
        AlertStatus::Danger => Color::Red,
    };
    let info_text = vec![
        Line::from(vec![
            Span::styled("Office:      ", Style::default().fg(THEME.muted)),
            Span::styled(stats.office_days.to_string(), Style::default().fg(THEME.office).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("Remote:      ", Style::default().fg(THEME.muted)),
            Span::styled(stats.remote_days.to_string(), Style::default().fg(THEME.remote).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("Still needed:", Style::default().fg(THEME.muted)),
            Span::styled(format!(" {}", summary.remaining.needed), Style::default().fg(THEME.text)),
        ]),
        Line::from(vec![
            Span::styled("Days left:   ", Style::default().fg(THEME.muted)),
            Span::styled(summary.remaining.remaining_days.max(0).to_string(), Style::default().fg(THEME.text)),
        ]),
        Line::from(vec![
            Span::styled("Projection:  ", Style::default().fg(THEME.muted)),
            Span::styled(percent(summary.projected), Style::default().fg(THEME.text)),
        ]),
        Line::from(""),
        Line::from(Span::styled(alert_message(summary), Style::default().fg(alert_color))),
        Line::from(vec![
            Span::styled(format!("Tomorrow: {} ", suggestion_label(summary.suggestion.suggestion)), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(suggestion_reason(&summary.suggestion)),
        ]),
    ];
    let overview = Paragraph::new(info_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded).border_style(Style::default().fg(THEME.muted)).title(" Summary "));
    f.render_widget(overview, chunks[1]);

    // 3. Licenses
    let license_lines: Vec<Line> = if app.licenses.is_empty() {
        vec![Line::from(Span::styled("No licenses this month", Style::default().fg(THEME.muted)))]
    } else {
        app.licenses
            .iter()
            .map(|l| {
                Line::from(vec![
                    Span::styled(l.date.format("%a %d  ").to_string(), Style::default().fg(THEME.muted)),
                    Span::styled(l.category.clone(), Style::default().fg(THEME.license)),
                ])
            })
            .collect()
    };
    let licenses = Paragraph::new(license_lines)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded).border_style(Style::default().fg(THEME.muted)).title(" Licenses "));
    f.render_widget(licenses, chunks[2]);
}
