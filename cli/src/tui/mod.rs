pub mod app;
pub mod ui;

use std::io;

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use presencia_core::{AttendanceService, KeyValueStore, WorkMode};

use crate::tui::app::{App, InputMode};

pub fn run<S: KeyValueStore>(service: &AttendanceService<S>) -> Result<()> {
    let mut app = App::new(service, Local::now().date_naive())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend, S: KeyValueStore>(terminal: &mut Terminal<B>, app: &mut App<S>) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.input_mode {
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Left => app.move_selection(-1),
                        KeyCode::Right => app.move_selection(1),
                        KeyCode::Up => app.move_selection(-7),
                        KeyCode::Down => app.move_selection(7),
                        KeyCode::Char('[') => app.previous_month(),
                        KeyCode::Char(']') => app.next_month(),
                        KeyCode::Char('o') => app.toggle(WorkMode::Office),
                        KeyCode::Char('r') => app.toggle(WorkMode::Remote),
                        KeyCode::Char('l') => app.enter_license_mode(),
                        KeyCode::Char('d') | KeyCode::Delete => app.clear_selected(),
                        _ => {}
                    },
                    InputMode::License => match key.code {
                        KeyCode::Enter => app.submit_license(),
                        KeyCode::Esc => app.exit_input_mode(),
                        KeyCode::Char(c) => app.input_char(c),
                        KeyCode::Backspace => app.delete_char(),
                        KeyCode::Left => app.move_cursor_left(),
                        KeyCode::Right => app.move_cursor_right(),
                        _ => {}
                    },
                }
            }
        }
    }
}
