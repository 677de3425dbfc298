//! L4 Atomic Layer: Release velocity estimation
//!
//! Velocity is a pure function of the recent pointer samples: a recency
//! weighted least-squares fit of position against time over a trailing
//! window.

use std::collections::VecDeque;
use std::time::Duration;

/// Samples retained between a press and its release
const HISTORY_SIZE: usize = 20;

/// Newer samples dominate the fit
const RECENCY_DECAY: f64 = 0.95;

/// A pointer that moved less than this over `ASSUME_STOPPED` has stopped
const MIN_MOVEMENT_PX: f64 = 2.0;
const ASSUME_STOPPED: Duration = Duration::from_millis(40);

/// One pointer position at a monotonic timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub y: f64,
    pub timestamp: Duration,
}

impl GestureSample {
    pub fn new(y: f64, timestamp: Duration) -> Self {
        Self { y, timestamp }
    }
}

/// Estimate velocity in px/s from timestamp-ordered samples
///
/// Only samples no older than `horizon` relative to the newest one take part.
/// Returns 0.0 with fewer than two usable samples or when the pointer has
/// come to rest.
pub fn estimate_velocity(samples: &[GestureSample], horizon: Duration) -> f64 {
    let Some(newest) = samples.last().copied() else {
        return 0.0;
    };

    let window: Vec<GestureSample> = samples
        .iter()
        .rev()
        .take_while(|s| newest.timestamp.saturating_sub(s.timestamp) <= horizon)
        .copied()
        .collect();

    if window.len() < 2 {
        return 0.0;
    }

    if let Some(oldest) = window.last() {
        let span = newest.timestamp.saturating_sub(oldest.timestamp);
        if span > ASSUME_STOPPED && (newest.y - oldest.y).abs() < MIN_MOVEMENT_PX {
            return 0.0;
        }
    }

    let mut sum_w = 0.0;
    let mut sum_t = 0.0;
    let mut sum_y = 0.0;
    let mut sum_tt = 0.0;
    let mut sum_ty = 0.0;

    for (i, sample) in window.iter().enumerate() {
        let w = RECENCY_DECAY.powi(i as i32);
        // seconds before the newest sample, as a negative time axis
        let t = -(newest.timestamp.saturating_sub(sample.timestamp)).as_secs_f64();
        sum_w += w;
        sum_t += w * t;
        sum_y += w * sample.y;
        sum_tt += w * t * t;
        sum_ty += w * t * sample.y;
    }

    let denominator = sum_w * sum_tt - sum_t * sum_t;
    if denominator.abs() < f64::EPSILON {
        return 0.0;
    }
    (sum_w * sum_ty - sum_t * sum_y) / denominator
}

/// Clamp a velocity's magnitude to `max`, keeping its sign
#[inline]
pub fn cap_velocity(velocity: f64, max: f64) -> f64 {
    velocity.clamp(-max.abs(), max.abs())
}

/// Bounded sample buffer for one press/release cycle
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    samples: VecDeque<GestureSample>,
    horizon: Duration,
}

impl VelocityTracker {
    pub fn new(horizon: Duration) -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_SIZE),
            horizon,
        }
    }

    /// Record a sample, dropping the oldest once the buffer is full
    pub fn add(&mut self, sample: GestureSample) {
        if self.samples.len() == HISTORY_SIZE {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn velocity(&self) -> f64 {
        let samples: Vec<GestureSample> = self.samples.iter().copied().collect();
        estimate_velocity(&samples, self.horizon)
    }
}
