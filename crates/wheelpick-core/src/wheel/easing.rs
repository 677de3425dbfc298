//! L4 Atomic Layer: Pure easing functions for settle animations
//!
//! Maps progress in [0, 1] to eased progress in [0, 1]. The fling curve lives
//! in `trajectory` because its shape is derived from the deceleration model
//! rather than picked by the user.

pub use crate::config::EasingType;

/// Extension trait for EasingType with calculation methods
pub trait EasingTypeExt {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value in range [0, 1]
    ///
    /// # Returns
    /// Eased value in range [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => if t < 1.0 { 0.0 } else { 1.0 },
            EasingType::Linear => t,
            EasingType::Cubic => power_ease_out(t, 3),
            EasingType::Quintic => power_ease_out(t, 5),
            EasingType::EaseOut => exponential_ease_out(t),
        }
    }
}

/// f(t) = 1 - (1-t)^n
#[inline]
fn power_ease_out(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

/// f(t) = 1 - 2^(-10t), pinned to 1 at t = 1
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 5] = [
        EasingType::None,
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            if easing != EasingType::None {
                assert!(easing.apply(0.0).abs() < 0.001, "{:?} at t=0", easing);
            }
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        assert_eq!(EasingType::Linear.apply(-0.5), 0.0);
        assert_eq!(EasingType::Cubic.apply(1.5), 1.0);
    }
}
