//! L4 Atomic Layer: Time calculation utilities for wheel animations
//!
//! Animations are driven by explicit elapsed time handed in by the frame
//! driver, so everything here is a pure function of durations.

use std::time::Duration;

/// Calculate animation progress (0.0 to 1.0) from elapsed time and duration
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if animation is complete
#[inline]
pub fn is_complete(elapsed: Duration, duration: Duration) -> bool {
    elapsed >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear interpolation for pixel offsets
#[inline]
pub fn lerp_i32(from: i32, to: i32, t: f64) -> i32 {
    lerp(from as f64, to as f64, t).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_lerp_i32_negative_range() {
        assert_eq!(lerp_i32(0, -80, 0.0), 0);
        assert_eq!(lerp_i32(0, -80, 0.5), -40);
        assert_eq!(lerp_i32(-90, -80, 1.0), -80);
    }

    #[test]
    fn test_progress() {
        let d = Duration::from_millis(200);
        assert!((progress(Duration::from_millis(50), d) - 0.25).abs() < 0.001);
        assert!((progress(Duration::from_millis(400), d) - 1.0).abs() < 0.001);
        assert!((progress(Duration::ZERO, Duration::ZERO) - 1.0).abs() < 0.001);
        assert!(is_complete(Duration::from_millis(200), d));
        assert!(!is_complete(Duration::from_millis(199), d));
    }
}
