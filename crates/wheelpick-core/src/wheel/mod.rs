//! Wheel selector physics core
//!
//! Turns pointer samples into a scroll offset, decays flings, snaps resting
//! offsets onto item boundaries, and maps offsets back onto (optionally
//! cyclic) data indices for drawing.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Settle easing curves
//! - `timing` - Progress and interpolation helpers
//! - `state` - Geometry and scroll state
//! - `limits` - Fling bounds
//! - `snap` - Boundary snapping
//! - `velocity` - Release velocity estimation
//! - `mapper` - Offset to visible rows
//!
//! ## L3 Molecular Layer
//! - `trajectory` - Fling and settle trajectories
//! - `scheduler` - Frame scheduling seam and async driver
//!
//! ## L2 Organism Layer
//! - `engine` - Gesture intake, fling/settle decisions, ticking
//!
//! # Usage
//!
//! ```ignore
//! use wheelpick_core::wheel::{Geometry, ScrollEngine};
//!
//! let mut engine = ScrollEngine::new(config.wheel.clone(), labels.len(), true);
//! engine.set_geometry(Geometry::from_viewport(200, 2)?)?;
//!
//! engine.on_press_start(y, now);
//! engine.on_press_move(y2, later);
//! engine.on_press_end(release);
//!
//! // Every frame until settled
//! let frame = engine.tick(Duration::from_millis(16));
//! for row in engine.visible_items() {
//!     draw(&labels[row.data_index], row.draw_offset);
//! }
//! ```

// L4 Atomic Layer
pub mod easing;
pub mod limits;
pub mod mapper;
pub mod snap;
pub mod state;
pub mod timing;
pub mod velocity;

// L3 Molecular Layer
pub mod scheduler;
pub mod trajectory;

// L2 Organism Layer
pub mod engine;

pub use easing::{EasingType, EasingTypeExt};
pub use engine::{Phase, ScrollEngine, TickResult};
pub use limits::FlingLimits;
pub use mapper::{visible_items, MapperInput, VisibleItem, VisibleItems};
pub use scheduler::{run_until_settled, FrameScheduler, NoopScheduler, RecordingScheduler, SharedFrameFlag};
pub use snap::{distance_to_end_point, snap_offset};
pub use state::{Geometry, WheelState};
pub use trajectory::{DecayTrajectory, FlingPhysics, TrajectoryKind};
pub use velocity::{estimate_velocity, GestureSample, VelocityTracker};

/// Host-side lookup from data index to display text
pub trait ItemSource {
    fn len(&self) -> usize;

    fn label(&self, index: usize) -> String;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: std::fmt::Display> ItemSource for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn label(&self, index: usize) -> String {
        self.get(index).map(|item| item.to_string()).unwrap_or_default()
    }
}

impl<T: std::fmt::Display> ItemSource for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn label(&self, index: usize) -> String {
        self.as_slice().label(index)
    }
}
