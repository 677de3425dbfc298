//! L2 Organism Layer: Scroll/fling engine
//!
//! Owns the scroll offset of one wheel. Pointer samples move the offset while
//! pressed; a release turns into either a fling or a settle trajectory that
//! always comes to rest on an item boundary. Ticks advance that trajectory.
//!
//! ```text
//! Idle --press--> Dragging --release--> Settling --terminates--> Idle
//!                    ^                     |
//!                    +-------press---------+
//! ```

use std::time::Duration;

use tracing::{debug, trace};

use super::limits::FlingLimits;
use super::mapper::{visible_items, MapperInput, VisibleItems};
use super::scheduler::{FrameScheduler, NoopScheduler};
use super::snap::distance_to_end_point;
use super::state::{Geometry, WheelState};
use super::trajectory::{DecayTrajectory, FlingPhysics};
use super::velocity::{cap_velocity, GestureSample, VelocityTracker};
use crate::config::WheelConfig;
use crate::{Error, Result};

/// Where the wheel is in its gesture lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// At rest on an item boundary
    Idle,
    /// Pointer is down
    Dragging,
    /// A fling or settle trajectory is running
    Settling,
}

/// Result of one animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    pub scroll_offset: i32,
    pub settled: bool,
}

/// Press bookkeeping, alive from press start to release
#[derive(Debug, Clone)]
struct Press {
    tracker: VelocityTracker,
    touch_down_y: i32,
    /// Last position applied to the offset (only moves once past the slop)
    last_y: i32,
    /// Last position reported, used for the release sample
    last_seen_y: f64,
}

/// Scroll/fling engine for one wheel
#[derive(Debug, Clone)]
pub struct ScrollEngine<S = NoopScheduler> {
    state: WheelState,
    config: WheelConfig,
    limits: FlingLimits,
    press: Option<Press>,
    trajectory: Option<DecayTrajectory>,
    scheduler: S,
}

impl ScrollEngine<NoopScheduler> {
    pub fn new(config: WheelConfig, data_count: usize, is_cyclic: bool) -> Self {
        Self::with_scheduler(config, data_count, is_cyclic, NoopScheduler)
    }
}

impl<S: FrameScheduler> ScrollEngine<S> {
    pub fn with_scheduler(
        config: WheelConfig,
        data_count: usize,
        is_cyclic: bool,
        scheduler: S,
    ) -> Self {
        let geometry = Geometry::unmeasured(config.half_visible_count);
        let state = WheelState::new(geometry, data_count, is_cyclic);
        let limits = FlingLimits::compute(&state);
        Self {
            state,
            config,
            limits,
            press: None,
            trajectory: None,
            scheduler,
        }
    }

    pub fn state(&self) -> &WheelState {
        &self.state
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn limits(&self) -> FlingLimits {
        self.limits
    }

    #[inline]
    pub fn scroll_offset(&self) -> i32 {
        self.state.scroll_offset
    }

    pub fn phase(&self) -> Phase {
        if self.press.is_some() {
            Phase::Dragging
        } else if self.trajectory.is_some() {
            Phase::Settling
        } else {
            Phase::Idle
        }
    }

    /// Whether a trajectory is waiting for ticks
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.trajectory.is_some()
    }

    /// Resting offset of the running trajectory, or the current offset
    pub fn target_offset(&self) -> i32 {
        self.trajectory
            .as_ref()
            .map(|t| t.final_offset())
            .unwrap_or(self.state.scroll_offset)
    }

    fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.config.frame_interval_ms.max(1))
    }

    fn physics(&self) -> FlingPhysics {
        FlingPhysics::new(self.config.friction, self.config.density)
    }

    // ---- setup -----------------------------------------------------------

    /// Install new row geometry, keeping the selected item centered
    pub fn set_geometry(&mut self, geometry: Geometry) -> Result<()> {
        geometry.validate()?;
        let selected = self.state.index_at_offset(self.target_offset());
        self.stop_motion();
        self.state.geometry = geometry;
        self.state.current_item_index = selected.unwrap_or(self.state.current_item_index);
        self.state.scroll_offset = 0;
        self.limits = FlingLimits::compute(&self.state);
        debug!(
            item_height = geometry.item_height,
            half_visible = geometry.half_visible_count,
            "Wheel geometry updated"
        );
        Ok(())
    }

    /// Derive geometry from a viewport height and the configured row count
    pub fn set_viewport(&mut self, viewport_height: i32, base_draw_y: i32) -> Result<()> {
        let geometry = Geometry::from_viewport(viewport_height, self.config.half_visible_count)?
            .with_base_draw_y(base_draw_y);
        self.set_geometry(geometry)
    }

    /// Replace the data set; selection returns to the first item
    pub fn set_data_count(&mut self, data_count: usize) {
        self.stop_motion();
        self.state.data_count = data_count;
        self.state.current_item_index = 0;
        self.state.scroll_offset = 0;
        self.limits = FlingLimits::compute(&self.state);
    }

    /// Center `index` immediately
    pub fn set_current_item_index(&mut self, index: usize) -> Result<()> {
        if self.state.data_count == 0 {
            return Err(Error::EmptyDataSet);
        }
        if index >= self.state.data_count {
            return Err(Error::OutOfRangeIndex {
                index,
                len: self.state.data_count,
            });
        }
        self.stop_motion();
        self.state.current_item_index = index;
        self.state.scroll_offset = 0;
        self.limits = FlingLimits::compute(&self.state);
        Ok(())
    }

    pub fn set_cyclic(&mut self, is_cyclic: bool) {
        if self.state.is_cyclic == is_cyclic {
            return;
        }
        let selected = self.state.index_at_offset(self.target_offset());
        self.stop_motion();
        self.state.is_cyclic = is_cyclic;
        if let Some(index) = selected {
            self.state.current_item_index = index;
            self.state.scroll_offset = 0;
        }
        self.limits = FlingLimits::compute(&self.state);
    }

    /// Cancel any trajectory or press without moving the offset
    fn stop_motion(&mut self) {
        if self.trajectory.take().is_some() {
            self.scheduler.cancel();
        }
        self.press = None;
    }

    // ---- gestures --------------------------------------------------------

    /// Pointer down: cancels any running trajectory and starts a new sample buffer
    pub fn on_press_start(&mut self, y: f64, timestamp: Duration) {
        if self.state.is_inert() {
            return;
        }
        if let Some(trajectory) = self.trajectory.take() {
            debug!(
                offset = self.state.scroll_offset,
                target = trajectory.final_offset(),
                "Press interrupted trajectory"
            );
            self.scheduler.cancel();
        }

        let horizon = Duration::from_millis(self.config.velocity_horizon_ms);
        let mut tracker = VelocityTracker::new(horizon);
        tracker.add(GestureSample::new(y, timestamp));
        let y_px = y.round() as i32;
        self.press = Some(Press {
            tracker,
            touch_down_y: y_px,
            last_y: y_px,
            last_seen_y: y,
        });
        self.limits = FlingLimits::compute(&self.state);
    }

    /// Pointer moved while pressed; returns whether the wheel needs a redraw
    ///
    /// Movement within the touch slop of the press point is treated as a tap
    /// and does not scroll. Dragging is never clamped.
    pub fn on_press_move(&mut self, y: f64, timestamp: Duration) -> bool {
        let slop = self.config.touch_slop;
        let Some(press) = self.press.as_mut() else {
            return false;
        };
        press.tracker.add(GestureSample::new(y, timestamp));
        press.last_seen_y = y;

        let y_px = y.round() as i32;
        if (y_px - press.touch_down_y).abs() < slop {
            return false;
        }
        let delta = y_px - press.last_y;
        press.last_y = y_px;
        self.state.scroll_offset = self.state.scroll_offset.saturating_add(delta);
        true
    }

    /// Pointer up: estimates the release velocity and settles or flings
    pub fn on_press_end(&mut self, timestamp: Duration) {
        let Some(mut press) = self.press.take() else {
            return;
        };
        press.tracker.add(GestureSample::new(press.last_seen_y, timestamp));
        let velocity = press.tracker.velocity();
        self.release(velocity);
    }

    /// Release with an externally measured velocity (px/s)
    pub fn release_with_velocity(&mut self, velocity: f64) {
        self.press = None;
        self.release(velocity);
    }

    fn release(&mut self, velocity: f64) {
        if self.state.is_inert() {
            return;
        }
        let height = self.state.item_height();
        let offset = self.state.scroll_offset;
        let velocity = cap_velocity(velocity, self.config.max_velocity);

        let mut trajectory = if velocity.abs() > self.config.min_velocity {
            let mut fling = DecayTrajectory::fling(offset, velocity, &self.physics());
            let natural = self.limits.clamp(fling.final_offset());
            let snapped = natural.saturating_add(distance_to_end_point(natural % height, height));
            fling.set_final_offset(snapped);
            debug!(
                velocity,
                from = offset,
                natural,
                duration_ms = fling.duration().as_millis() as u64,
                "Fling started"
            );
            fling
        } else {
            let target = offset.saturating_add(distance_to_end_point(offset % height, height));
            DecayTrajectory::settle(
                offset,
                target,
                Duration::from_millis(self.config.settle_duration_ms),
                self.config.easing,
            )
        };

        if !self.state.is_cyclic {
            trajectory.set_final_offset(self.limits.clamp(trajectory.final_offset()));
        }

        self.start_trajectory(trajectory);
    }

    /// Either finish immediately or hand the trajectory to the frame driver
    fn start_trajectory(&mut self, trajectory: DecayTrajectory) {
        if trajectory.is_finished() || trajectory.start_offset() == trajectory.final_offset() {
            self.state.scroll_offset = trajectory.final_offset();
            self.trajectory = None;
            debug!(offset = self.state.scroll_offset, "Snapped without animation");
            return;
        }
        self.trajectory = Some(trajectory);
        let frame = self.frame_interval();
        self.scheduler.request_frame(frame);
    }

    // ---- programmatic scrolling -----------------------------------------

    /// Animate so that `index` ends up centered
    pub fn scroll_to_index(&mut self, index: usize) -> Result<()> {
        if self.state.data_count == 0 {
            return Err(Error::EmptyDataSet);
        }
        if index >= self.state.data_count {
            return Err(Error::OutOfRangeIndex {
                index,
                len: self.state.data_count,
            });
        }
        let Some(current) = self.state.index_at_offset(self.target_offset()) else {
            return Ok(());
        };
        let steps = if self.state.is_cyclic {
            shortest_cyclic_steps(current, index, self.state.data_count)
        } else {
            index as i64 - current as i64
        };
        self.scroll_by_items(steps);
        Ok(())
    }

    /// Animate by `items` rows; positive values move toward later items
    pub fn scroll_by_items(&mut self, items: i64) {
        if self.state.is_inert() || self.press.is_some() || items == 0 {
            return;
        }
        let height = self.state.item_height();
        let base = self.rebased_target();
        let aligned = base.saturating_add(distance_to_end_point(base % height, height));
        let mut target = (aligned as i64 - items * height as i64)
            .clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        if !self.state.is_cyclic {
            self.limits = FlingLimits::compute(&self.state);
            target = self.limits.clamp(target);
        }
        let trajectory = DecayTrajectory::settle(
            self.state.scroll_offset,
            target,
            Duration::from_millis(self.config.settle_duration_ms),
            self.config.easing,
        );
        self.trajectory = None;
        self.start_trajectory(trajectory);
    }

    /// Resting offset of the running trajectory, moved by whole turns of a
    /// cyclic wheel to the copy nearest the current offset
    ///
    /// A fling's end point is not folded by `reduce_cyclic` while the offset
    /// itself is, so the two can be many turns apart.
    fn rebased_target(&self) -> i32 {
        let target = self.target_offset();
        if !self.state.is_cyclic || self.state.is_inert() {
            return target;
        }
        let period = self.state.item_height() as i64 * self.state.data_count as i64;
        let offset = self.state.scroll_offset as i64;
        let mut delta = (target as i64 - offset).rem_euclid(period);
        if delta * 2 > period {
            delta -= period;
        }
        (offset + delta) as i32
    }

    // ---- frames ----------------------------------------------------------

    /// Advance the running trajectory by `elapsed`
    ///
    /// Safe to call at any time: without a trajectory the offset is returned
    /// unchanged.
    pub fn tick(&mut self, elapsed: Duration) -> TickResult {
        let Some(trajectory) = self.trajectory.as_mut() else {
            return TickResult {
                scroll_offset: self.state.scroll_offset,
                settled: self.press.is_none(),
            };
        };

        let position = trajectory.advance(elapsed);
        let finished = trajectory.is_finished();
        self.state.scroll_offset = self.reduce_cyclic(position);
        trace!(offset = self.state.scroll_offset, finished, "Wheel tick");

        if finished {
            self.trajectory = None;
            debug!(
                offset = self.state.scroll_offset,
                index = ?self.state.index_at_offset(self.state.scroll_offset),
                "Wheel settled"
            );
        } else {
            let frame = self.frame_interval();
            self.scheduler.request_frame(frame);
        }

        TickResult {
            scroll_offset: self.state.scroll_offset,
            settled: finished,
        }
    }

    /// Fold a cyclic offset that drifted more than one traversal past the
    /// visible window back into `[0, count * height)`
    fn reduce_cyclic(&self, offset: i32) -> i32 {
        if !self.state.is_cyclic || self.state.is_inert() {
            return offset;
        }
        let height = self.state.item_height() as i64;
        let count = self.state.data_count as i64;
        let visible = self.state.geometry.visible_item_count() as i64;
        let offset = offset as i64;
        if offset > visible * height || offset < -(visible + count) * height {
            offset.rem_euclid(count * height) as i32
        } else {
            offset as i32
        }
    }

    // ---- queries ---------------------------------------------------------

    /// Item centered at rest; `None` while dragging, settling, or inert
    pub fn current_selected_index(&self) -> Option<usize> {
        if self.phase() != Phase::Idle {
            return None;
        }
        self.state.index_at_offset(self.state.scroll_offset)
    }

    /// Item nearest the center right now, regardless of phase
    pub fn centered_index(&self) -> Option<usize> {
        let height = self.state.item_height();
        if height <= 0 {
            return None;
        }
        let offset = self.state.scroll_offset;
        self.state
            .index_at_offset(offset.saturating_add(distance_to_end_point(offset % height, height)))
    }

    pub fn mapper_input(&self) -> MapperInput {
        MapperInput::new(
            self.state.absolute_offset(),
            self.state.item_height(),
            self.state.half_visible_count(),
            self.state.data_count,
            self.state.is_cyclic,
        )
        .with_base_draw_y(self.state.geometry.base_draw_y)
    }

    /// Rows to draw for the current offset
    pub fn visible_items(&self) -> VisibleItems {
        visible_items(self.mapper_input())
    }
}

/// Signed step count from `from` to `to` around a ring of `count` items,
/// taking the shorter way
fn shortest_cyclic_steps(from: usize, to: usize, count: usize) -> i64 {
    let count = count as i64;
    let forward = (to as i64 - from as i64).rem_euclid(count);
    if forward * 2 > count {
        forward - count
    } else {
        forward
    }
}
