use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tracing::{debug, info};

use wheelpick_core::{date::DateField, AppConfig};
use wheelpick_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{StatusBarWidget, WheelWidget},
};

pub async fn run(config: AppConfig) -> Result<()> {
    // Create app state before touching the terminal so config errors print cleanly
    let mut app = App::new(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("wheelpick"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::new(config.ui.tick_rate_ms, config.wheel.frame_interval_ms);
    info!("Date picker started");

    let result = main_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result?;

    if let Some(date) = app.confirmed {
        println!("{}", date.format("%Y-%m-%d"));
    }
    Ok(())
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        // Advance any running wheels before drawing
        app.advance_frame(Instant::now());

        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: wheels + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Ratio(2, 5), // Year
                    Constraint::Ratio(3, 10), // Month
                    Constraint::Ratio(3, 10), // Day
                ])
                .split(main_layout[0]);

            let areas: [Rect; 3] = [columns[0], columns[1], columns[2]];
            app.set_wheel_areas(areas);

            for (field, area) in DateField::ALL.into_iter().zip(areas) {
                WheelWidget::render(frame, area, app, field);
            }
            StatusBarWidget::render(frame, main_layout[1], app);
        })?;

        // Poll at the frame interval while any wheel wants frames
        if let Some(event) = event_handler.next(app.needs_fast_update())? {
            match event {
                AppEvent::Key(key) => {
                    app.status_message = None;
                    let action = handle_key_event(key, &app.keymap);
                    app.apply_action(action);
                }
                AppEvent::Mouse(mouse) => app.on_mouse(mouse),
                AppEvent::Resize(width, height) => {
                    debug!(width, height, "Terminal resized");
                }
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
