pub mod config;
pub mod date;
pub mod error;
pub mod wheel;

pub use config::{AppConfig, EasingType, WheelConfig};
pub use date::DatePicker;
pub use error::{Error, Result};
pub use wheel::{ScrollEngine, TickResult, VisibleItem};
