mod status_bar;
mod wheel;

pub use status_bar::StatusBarWidget;
pub use wheel::WheelWidget;
