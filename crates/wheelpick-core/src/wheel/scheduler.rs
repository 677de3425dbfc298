//! Frame scheduling seam between the engine and its host
//!
//! The engine never sleeps or spawns. While a trajectory is running it asks
//! its scheduler for another frame; the host answers by calling `tick`.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};

use super::engine::{Phase, ScrollEngine};

/// Host-side timer the engine calls into
pub trait FrameScheduler {
    /// Ask for `tick` to be called after `delay`
    fn request_frame(&mut self, delay: Duration);
    /// Drop any outstanding request
    fn cancel(&mut self);
}

/// Scheduler for hosts that tick unconditionally
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScheduler;

impl FrameScheduler for NoopScheduler {
    fn request_frame(&mut self, _delay: Duration) {}
    fn cancel(&mut self) {}
}

/// Counts requests and remembers the last pending one
#[derive(Debug, Clone, Default)]
pub struct RecordingScheduler {
    pub requested: usize,
    pub cancelled: usize,
    pending: Option<Duration>,
}

impl RecordingScheduler {
    pub fn pending(&self) -> Option<Duration> {
        self.pending
    }

    pub fn take_pending(&mut self) -> Option<Duration> {
        self.pending.take()
    }
}

impl FrameScheduler for RecordingScheduler {
    fn request_frame(&mut self, delay: Duration) {
        self.requested += 1;
        self.pending = Some(delay);
    }

    fn cancel(&mut self) {
        self.cancelled += 1;
        self.pending = None;
    }
}

/// Cloneable single-threaded flag shared by several engines
///
/// Any clone requesting a frame marks the whole group as needing one; the
/// host drains it once per loop iteration. The shortest requested delay wins.
#[derive(Debug, Clone, Default)]
pub struct SharedFrameFlag {
    pending: Rc<Cell<Option<Duration>>>,
}

impl SharedFrameFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn take(&self) -> Option<Duration> {
        self.pending.take()
    }
}

impl FrameScheduler for SharedFrameFlag {
    fn request_frame(&mut self, delay: Duration) {
        let next = match self.pending.get() {
            Some(current) => current.min(delay),
            None => delay,
        };
        self.pending.set(Some(next));
    }

    // Other engines sharing the flag may still be animating, so a cancel
    // from one of them leaves the flag alone; the next drain clears it.
    fn cancel(&mut self) {}
}

/// Drive an engine with a periodic timer until its trajectory terminates
///
/// Helper for hosts already running on tokio that own a single engine and
/// have nothing else to do until it rests; hosts with their own event loop
/// tick from that loop instead (see [`SharedFrameFlag`]). Returns the
/// resting offset. An engine that is being dragged is returned
/// immediately since only a release can settle it.
pub async fn run_until_settled<S: FrameScheduler>(
    engine: &mut ScrollEngine<S>,
    frame: Duration,
) -> i32 {
    if engine.phase() == Phase::Dragging {
        return engine.scroll_offset();
    }

    let mut ticker = interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of a tokio interval completes immediately
    ticker.tick().await;

    loop {
        let result = engine.tick(frame);
        if result.settled {
            return result.scroll_offset;
        }
        ticker.tick().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WheelConfig;
    use crate::wheel::state::Geometry;

    #[test]
    fn test_recording_scheduler() {
        let mut scheduler = RecordingScheduler::default();
        scheduler.request_frame(Duration::from_millis(16));
        scheduler.request_frame(Duration::from_millis(16));
        assert_eq!(scheduler.requested, 2);
        assert_eq!(scheduler.pending(), Some(Duration::from_millis(16)));
        scheduler.cancel();
        assert_eq!(scheduler.pending(), None);
        assert_eq!(scheduler.cancelled, 1);
    }

    #[test]
    fn test_shared_flag_keeps_shortest_delay() {
        let flag = SharedFrameFlag::new();
        let mut a = flag.clone();
        let mut b = flag.clone();
        a.request_frame(Duration::from_millis(32));
        b.request_frame(Duration::from_millis(16));
        assert!(flag.is_pending());
        assert_eq!(flag.take(), Some(Duration::from_millis(16)));
        assert!(!flag.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_settled_drives_settle() {
        let mut engine = ScrollEngine::new(WheelConfig::default(), 5, false);
        engine.set_geometry(Geometry::new(40, 2, 200).unwrap()).unwrap();
        engine.on_press_start(0.0, Duration::ZERO);
        engine.on_press_move(-90.0, Duration::from_millis(300));
        engine.on_press_end(Duration::from_millis(600));

        let rest = run_until_settled(&mut engine, Duration::from_millis(16)).await;
        assert_eq!(rest, -80);
        assert_eq!(engine.current_selected_index(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_settled_returns_while_dragging() {
        let mut engine = ScrollEngine::new(WheelConfig::default(), 5, true);
        engine.set_geometry(Geometry::new(40, 2, 200).unwrap()).unwrap();
        engine.on_press_start(0.0, Duration::ZERO);
        engine.on_press_move(-30.0, Duration::from_millis(10));

        let offset = run_until_settled(&mut engine, Duration::from_millis(16)).await;
        assert_eq!(offset, -30);
        assert_eq!(engine.phase(), Phase::Dragging);
    }
}
