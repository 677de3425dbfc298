use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tracing::{debug, info};
use wheelpick_core::date::{DateField, DatePicker};
use wheelpick_core::wheel::SharedFrameFlag;
use wheelpick_core::AppConfig;

use crate::input::Action;
use crate::keymap::Keymap;
use crate::theme::Theme;

/// Vertical band of `visible` rows centered inside a wheel's outer area
///
/// The outer area includes the one-cell border drawn around each wheel.
pub fn band_area(outer: Rect, visible: u16) -> Rect {
    let inner = Rect {
        x: outer.x.saturating_add(1),
        y: outer.y.saturating_add(1),
        width: outer.width.saturating_sub(2),
        height: outer.height.saturating_sub(2),
    };
    let height = visible.min(inner.height);
    Rect {
        x: inner.x,
        y: inner.y + (inner.height - height) / 2,
        width: inner.width,
        height,
    }
}

/// Main application state
pub struct App {
    pub picker: DatePicker<SharedFrameFlag>,
    /// Set by the wheels whenever they want another frame
    pub frames: SharedFrameFlag,
    pub focus: DateField,
    pub theme: Theme,
    pub keymap: Keymap,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Date accepted with the confirm key
    pub confirmed: Option<NaiveDate>,
    /// Terminal rows are scaled to this many pixels for the wheel engines
    pub row_height_px: i32,
    pub half_visible_count: i32,
    /// Outer areas of the three wheels from the last draw
    wheel_areas: [Rect; 3],
    /// Wheel holding the current mouse press
    drag: Option<DateField>,
    clock: Instant,
    last_frame: Option<Instant>,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let frames = SharedFrameFlag::new();
        let mut picker = DatePicker::with_scheduler(&config.wheel, &config.date, frames.clone())?;

        let row_height_px = config.ui.row_height_px;
        let half_visible_count = config.wheel.half_visible_count;
        // One terminal row per item
        picker.set_viewport(row_height_px * (2 * half_visible_count + 1), 0)?;

        let today = Local::now().date_naive();
        if picker.set_date(today).is_err() {
            debug!(%today, "Today is outside the configured year range");
        }

        Ok(Self {
            picker,
            frames,
            focus: DateField::Year,
            theme: Theme::from_config(&config.ui.theme),
            keymap: Keymap::from_config(&config.keymap),
            should_quit: false,
            status_message: None,
            confirmed: None,
            row_height_px,
            half_visible_count,
            wheel_areas: [Rect::default(); 3],
            drag: None,
            clock: Instant::now(),
            last_frame: None,
        })
    }

    pub fn visible_rows(&self) -> u16 {
        (2 * self.half_visible_count + 1) as u16
    }

    /// Record where each wheel was laid out, for mouse hit-testing
    pub fn set_wheel_areas(&mut self, areas: [Rect; 3]) {
        self.wheel_areas = areas;
    }

    fn field_at(&self, column: u16, row: u16) -> Option<DateField> {
        DateField::ALL
            .into_iter()
            .zip(self.wheel_areas)
            .find(|(_, area)| area.contains(Position::new(column, row)))
            .map(|(field, _)| field)
    }

    fn field_index(field: DateField) -> usize {
        match field {
            DateField::Year => 0,
            DateField::Month => 1,
            DateField::Day => 2,
        }
    }

    /// Pixel position of a terminal row relative to a wheel's band
    fn row_to_px(&self, field: DateField, row: u16) -> f64 {
        let band = band_area(self.wheel_areas[Self::field_index(field)], self.visible_rows());
        let rows = row as i32 - band.y as i32;
        (rows * self.row_height_px + self.row_height_px / 2) as f64
    }

    pub fn focus_left(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn focus_right(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            DateField::Day => DateField::Year,
            other => other.next(),
        };
    }

    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusLeft => self.focus_left(),
            Action::FocusRight => self.focus_right(),
            Action::CycleFocus => self.cycle_focus(),
            Action::NextItem => self.picker.engine_mut(self.focus).scroll_by_items(1),
            Action::PrevItem => self.picker.engine_mut(self.focus).scroll_by_items(-1),
            Action::NextPage => {
                let page = self.visible_rows() as i64;
                self.picker.engine_mut(self.focus).scroll_by_items(page);
            }
            Action::PrevPage => {
                let page = self.visible_rows() as i64;
                self.picker.engine_mut(self.focus).scroll_by_items(-page);
            }
            Action::Confirm => self.confirm(),
            Action::Today => self.jump_to_today(),
            Action::None => {}
        }
    }

    fn confirm(&mut self) {
        match self.picker.selected_date() {
            Some(date) => {
                info!(%date, "Date confirmed");
                self.confirmed = Some(date);
                self.should_quit = true;
            }
            None => self.status_message = Some("Wheels are still moving".to_string()),
        }
    }

    fn jump_to_today(&mut self) {
        let today = Local::now().date_naive();
        if let Err(e) = self.picker.set_date(today) {
            self.status_message = Some(format!("Cannot select today: {}", e));
        } else {
            self.status_message = None;
        }
    }

    /// Feed a mouse event to the wheel under the pointer
    pub fn on_mouse(&mut self, event: MouseEvent) {
        let timestamp = self.clock.elapsed();
        self.on_mouse_at(event, timestamp);
    }

    /// Same as [`App::on_mouse`] with an explicit gesture timestamp
    pub fn on_mouse_at(&mut self, event: MouseEvent, timestamp: Duration) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(field) = self.field_at(event.column, event.row) else {
                    return;
                };
                self.focus = field;
                self.drag = Some(field);
                let y = self.row_to_px(field, event.row);
                self.picker.engine_mut(field).on_press_start(y, timestamp);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(field) = self.drag {
                    let y = self.row_to_px(field, event.row);
                    self.picker.engine_mut(field).on_press_move(y, timestamp);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(field) = self.drag.take() {
                    self.picker.engine_mut(field).on_press_end(timestamp);
                    self.picker.sync_day_count();
                }
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                let field = self.field_at(event.column, event.row).unwrap_or(self.focus);
                let items = if event.kind == MouseEventKind::ScrollDown { 1 } else { -1 };
                self.picker.engine_mut(field).scroll_by_items(items);
            }
            _ => {}
        }
    }

    /// Whether the event loop should poll at the frame interval
    pub fn needs_fast_update(&self) -> bool {
        self.frames.is_pending() || self.picker.is_animating()
    }

    /// Advance running wheels to `now`; returns whether anything moved
    pub fn advance_frame(&mut self, now: Instant) -> bool {
        if !self.needs_fast_update() {
            self.last_frame = None;
            return false;
        }
        self.frames.take();
        let elapsed = self
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_frame = Some(now);

        if self.picker.tick(elapsed) {
            self.last_frame = None;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use wheelpick_core::config::DateConfig;

    fn app() -> App {
        let config = AppConfig {
            date: DateConfig {
                start_year: 2000,
                end_year: 2030,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut app = App::new(&config).unwrap();
        app.picker
            .set_date(NaiveDate::from_ymd_opt(2020, 6, 15).unwrap())
            .unwrap();
        app.set_wheel_areas([
            Rect::new(0, 0, 10, 9),
            Rect::new(10, 0, 10, 9),
            Rect::new(20, 0, 10, 9),
        ]);
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn settle(app: &mut App) {
        let mut now = Instant::now();
        for _ in 0..1000 {
            now += Duration::from_millis(16);
            app.advance_frame(now);
            if !app.needs_fast_update() {
                return;
            }
        }
        panic!("app never settled");
    }

    #[test]
    fn test_one_row_per_item() {
        let app = app();
        for field in DateField::ALL {
            let state = app.picker.engine(field).state();
            assert_eq!(state.item_height(), app.row_height_px);
            assert_eq!(state.half_visible_count(), app.half_visible_count);
        }
    }

    #[test]
    fn test_band_area_centered() {
        // 9 rows tall with border leaves 7 inner rows; 5 visible rows start one row down
        let band = band_area(Rect::new(0, 0, 10, 9), 5);
        assert_eq!(band, Rect::new(1, 2, 8, 5));

        let tiny = band_area(Rect::new(0, 0, 10, 4), 5);
        assert_eq!(tiny.height, 2);
    }

    #[test]
    fn test_slow_drag_moves_two_months() {
        let mut app = app();
        let ms = Duration::from_millis;

        app.on_mouse_at(mouse(MouseEventKind::Down(MouseButton::Left), 15, 4), ms(0));
        assert_eq!(app.focus, DateField::Month);
        app.on_mouse_at(mouse(MouseEventKind::Drag(MouseButton::Left), 15, 2), ms(500));
        app.on_mouse_at(mouse(MouseEventKind::Up(MouseButton::Left), 15, 2), ms(1000));

        assert_eq!(app.picker.selected_month(), Some(8));
        assert!(!app.needs_fast_update());
    }

    #[test]
    fn test_drag_outside_wheels_is_ignored() {
        let mut app = app();
        app.on_mouse_at(
            mouse(MouseEventKind::Down(MouseButton::Left), 50, 4),
            Duration::ZERO,
        );
        app.on_mouse_at(
            mouse(MouseEventKind::Drag(MouseButton::Left), 50, 1),
            Duration::from_millis(200),
        );
        assert_eq!(
            app.picker.selected_date(),
            NaiveDate::from_ymd_opt(2020, 6, 15)
        );
    }

    #[test]
    fn test_key_scroll_animates_then_settles() {
        let mut app = app();
        app.apply_action(Action::NextItem);
        assert!(app.needs_fast_update());
        assert_eq!(app.picker.selected_year(), None);

        settle(&mut app);
        assert_eq!(app.picker.selected_year(), Some(2021));
    }

    #[test]
    fn test_mouse_wheel_scrolls_hovered_wheel() {
        let mut app = app();
        app.on_mouse_at(mouse(MouseEventKind::ScrollUp, 25, 4), Duration::ZERO);
        settle(&mut app);
        assert_eq!(app.picker.selected_day(), Some(14));
        assert_eq!(app.focus, DateField::Year);
    }

    #[test]
    fn test_confirm_waits_for_rest() {
        let mut app = app();
        app.apply_action(Action::NextItem);
        app.apply_action(Action::Confirm);
        assert!(!app.should_quit);
        assert!(app.status_message.is_some());

        settle(&mut app);
        app.apply_action(Action::Confirm);
        assert!(app.should_quit);
        assert_eq!(app.confirmed, NaiveDate::from_ymd_opt(2021, 6, 15));
    }

    #[test]
    fn test_focus_navigation() {
        let mut app = app();
        app.apply_action(Action::FocusLeft);
        assert_eq!(app.focus, DateField::Year);
        app.apply_action(Action::FocusRight);
        app.apply_action(Action::FocusRight);
        assert_eq!(app.focus, DateField::Day);
        app.apply_action(Action::CycleFocus);
        assert_eq!(app.focus, DateField::Year);
    }
}
