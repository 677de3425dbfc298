use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Event handler for terminal events
pub struct EventHandler {
    /// Poll timeout while nothing moves
    tick_rate: Duration,
    /// Poll timeout while a wheel is animating
    frame_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64, frame_interval_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            frame_rate: Duration::from_millis(frame_interval_ms.max(1)),
        }
    }

    /// Poll for the next event
    ///
    /// `animating` switches to the frame interval so trajectories advance
    /// smoothly; otherwise the slower tick rate keeps the loop idle.
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        let timeout = if animating { self.frame_rate } else { self.tick_rate };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse button or wheel activity
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}
