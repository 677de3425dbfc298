//! L3 Molecular Layer: Time-parameterized offset trajectories
//!
//! A fling follows a spline-style deceleration: both its travel distance and
//! its duration grow as powers of the release velocity, and the remaining
//! distance shrinks as `(1 - t)^DECELERATION_RATE`. A settle is a short eased
//! move between two known offsets.

use std::time::Duration;

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp_i32, progress};

/// ln(0.78) / ln(0.9)
pub const DECELERATION_RATE: f64 = 2.358_201_815_425_945;

/// Tension point of the deceleration spline
const INFLEXION: f64 = 0.35;

/// Earth gravity (m/s^2)
const GRAVITY_EARTH: f64 = 9.80665;

/// Inches per meter
const INCHES_PER_METER: f64 = 39.37;

/// Base pixel density matching a density multiplier of 1.0
const BASE_PPI: f64 = 160.0;

/// Deceleration model parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingPhysics {
    pub friction: f64,
    pub density: f64,
}

impl Default for FlingPhysics {
    fn default() -> Self {
        Self {
            friction: 0.015,
            density: 1.0,
        }
    }
}

impl FlingPhysics {
    pub fn new(friction: f64, density: f64) -> Self {
        Self { friction, density }
    }

    fn physical_coeff(&self) -> f64 {
        GRAVITY_EARTH * INCHES_PER_METER * BASE_PPI * self.density * 0.84
    }

    /// ln of the velocity scaled by friction, shared by distance and duration
    fn spline_deceleration(&self, velocity: f64) -> f64 {
        (INFLEXION * velocity.abs() / (self.friction * self.physical_coeff())).ln()
    }

    /// Total travel in pixels for a release at `velocity` px/s
    pub fn distance(&self, velocity: f64) -> f64 {
        if velocity == 0.0 {
            return 0.0;
        }
        let l = self.spline_deceleration(velocity);
        let rate_minus_one = DECELERATION_RATE - 1.0;
        self.friction * self.physical_coeff() * (DECELERATION_RATE / rate_minus_one * l).exp()
    }

    /// Time until a fling at `velocity` px/s comes to rest
    pub fn duration(&self, velocity: f64) -> Duration {
        if velocity == 0.0 {
            return Duration::ZERO;
        }
        let l = self.spline_deceleration(velocity);
        let millis = 1000.0 * (l / (DECELERATION_RATE - 1.0)).exp();
        Duration::from_secs_f64(millis.max(0.0) / 1000.0)
    }
}

/// Curve a trajectory follows between its endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrajectoryKind {
    /// Velocity-driven deceleration
    Fling,
    /// Eased move onto a known boundary
    Settle(EasingType),
}

/// Offset as a function of elapsed time, ending at a resting offset
#[derive(Debug, Clone, PartialEq)]
pub struct DecayTrajectory {
    kind: TrajectoryKind,
    start: i32,
    end: i32,
    duration: Duration,
    elapsed: Duration,
}

impl DecayTrajectory {
    /// Start a fling at `start` with release `velocity` (px/s)
    ///
    /// The natural end point is `start` plus the decay distance in the
    /// direction of the velocity; callers clamp and snap it afterwards with
    /// `set_final_offset`.
    pub fn fling(start: i32, velocity: f64, physics: &FlingPhysics) -> Self {
        let distance = physics.distance(velocity).copysign(velocity);
        let end = (start as f64 + distance)
            .round()
            .clamp(i32::MIN as f64, i32::MAX as f64) as i32;
        Self {
            kind: TrajectoryKind::Fling,
            start,
            end,
            duration: physics.duration(velocity),
            elapsed: Duration::ZERO,
        }
    }

    pub fn settle(start: i32, end: i32, duration: Duration, easing: EasingType) -> Self {
        Self {
            kind: TrajectoryKind::Settle(easing),
            start,
            end,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    #[inline]
    pub fn kind(&self) -> TrajectoryKind {
        self.kind
    }

    #[inline]
    pub fn start_offset(&self) -> i32 {
        self.start
    }

    #[inline]
    pub fn final_offset(&self) -> i32 {
        self.end
    }

    /// Move the resting point; the curve rescales to the new distance
    pub fn set_final_offset(&mut self, end: i32) {
        self.end = end;
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Advance by one frame and return the offset reached
    pub fn advance(&mut self, delta: Duration) -> i32 {
        self.elapsed = self.elapsed.saturating_add(delta);
        self.position()
    }

    pub fn position(&self) -> i32 {
        self.position_at(self.elapsed)
    }

    pub fn position_at(&self, elapsed: Duration) -> i32 {
        if is_complete(elapsed, self.duration) {
            return self.end;
        }
        let t = progress(elapsed, self.duration);
        let fraction = match self.kind {
            TrajectoryKind::Fling => 1.0 - (1.0 - t).powf(DECELERATION_RATE),
            TrajectoryKind::Settle(easing) => easing.apply(t),
        };
        lerp_i32(self.start, self.end, fraction)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        is_complete(self.elapsed, self.duration)
    }
}
