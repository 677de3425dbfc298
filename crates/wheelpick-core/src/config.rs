use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub date: DateConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files live here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Easing curve used by settle animations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the end at the last frame
    None,
    Linear,
    /// f(t) = 1 - (1-t)^3
    #[default]
    Cubic,
    /// f(t) = 1 - (1-t)^5
    Quintic,
    /// f(t) = 1 - 2^(-10t)
    EaseOut,
}

/// Physics and gesture parameters for a single wheel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelConfig {
    /// Rows shown above and below the centered item
    #[serde(default = "default_half_visible_count")]
    pub half_visible_count: i32,
    /// Distance in pixels a press must travel before it counts as a drag
    #[serde(default = "default_touch_slop")]
    pub touch_slop: i32,
    /// Release velocity (px/s) at or below which no fling starts
    #[serde(default = "default_min_velocity")]
    pub min_velocity: f64,
    /// Release velocity magnitude cap (px/s)
    #[serde(default = "default_max_velocity")]
    pub max_velocity: f64,
    /// Scroll friction coefficient for fling decay
    #[serde(default = "default_friction")]
    pub friction: f64,
    /// Display density multiplier (1.0 = 160 ppi)
    #[serde(default = "default_density")]
    pub density: f64,
    /// Duration of the snap animation after a slow release (0 = instant)
    #[serde(default = "default_settle_duration")]
    pub settle_duration_ms: u64,
    /// Easing for the snap animation
    #[serde(default)]
    pub easing: EasingType,
    /// Interval between animation frames
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
    /// Trailing window of pointer samples used for velocity estimation
    #[serde(default = "default_velocity_horizon")]
    pub velocity_horizon_ms: u64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            half_visible_count: default_half_visible_count(),
            touch_slop: default_touch_slop(),
            min_velocity: default_min_velocity(),
            max_velocity: default_max_velocity(),
            friction: default_friction(),
            density: default_density(),
            settle_duration_ms: default_settle_duration(),
            easing: EasingType::default(),
            frame_interval_ms: default_frame_interval(),
            velocity_horizon_ms: default_velocity_horizon(),
        }
    }
}

impl WheelConfig {
    /// Reject values the physics core cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.half_visible_count < 1 {
            return Err(crate::Error::Config(format!(
                "wheel.half_visible_count must be at least 1, got {}",
                self.half_visible_count
            )));
        }
        if self.touch_slop < 0 {
            return Err(crate::Error::Config(format!(
                "wheel.touch_slop must not be negative, got {}",
                self.touch_slop
            )));
        }
        if self.min_velocity < 0.0 || self.max_velocity < self.min_velocity {
            return Err(crate::Error::Config(format!(
                "wheel velocity range is invalid: min {} max {}",
                self.min_velocity, self.max_velocity
            )));
        }
        if self.friction <= 0.0 || self.density <= 0.0 {
            return Err(crate::Error::Config(
                "wheel.friction and wheel.density must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateConfig {
    /// First selectable year
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    /// Last selectable year
    #[serde(default = "default_end_year")]
    pub end_year: i32,
    /// Whether the month wheel wraps around
    #[serde(default = "default_true")]
    pub cyclic_month: bool,
    /// Whether the day wheel wraps around
    #[serde(default = "default_true")]
    pub cyclic_day: bool,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            end_year: default_end_year(),
            cyclic_month: default_true(),
            cyclic_day: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while nothing is animating
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Virtual pixels per terminal row, used to feed pointer positions to the wheels
    #[serde(default = "default_row_height_px")]
    pub row_height_px: i32,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            row_height_px: default_row_height_px(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Color overrides, each a hex string (e.g., "#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub dimmed: Option<String>,
    pub selection: Option<String>,
    pub accent: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-c>" (Ctrl+c), "<CR>" (Enter), "<Esc>", "<Tab>", "<S-Tab>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    #[serde(default = "default_key_next_item")]
    pub next_item: String,
    #[serde(default = "default_key_prev_item")]
    pub prev_item: String,
    #[serde(default = "default_key_focus_left")]
    pub focus_left: String,
    #[serde(default = "default_key_focus_right")]
    pub focus_right: String,
    #[serde(default = "default_key_confirm")]
    pub confirm: String,
    #[serde(default = "default_key_today")]
    pub today: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next_item: default_key_next_item(),
            prev_item: default_key_prev_item(),
            focus_left: default_key_focus_left(),
            focus_right: default_key_focus_right(),
            confirm: default_key_confirm(),
            today: default_key_today(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_next_item() -> String { "j".to_string() }
fn default_key_prev_item() -> String { "k".to_string() }
fn default_key_focus_left() -> String { "h".to_string() }
fn default_key_focus_right() -> String { "l".to_string() }
fn default_key_confirm() -> String { "<CR>".to_string() }
fn default_key_today() -> String { "t".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wheelpick")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_half_visible_count() -> i32 {
    2
}

fn default_touch_slop() -> i32 {
    8
}

fn default_min_velocity() -> f64 {
    50.0
}

fn default_max_velocity() -> f64 {
    10_000.0
}

fn default_friction() -> f64 {
    0.015
}

fn default_density() -> f64 {
    1.0
}

fn default_settle_duration() -> u64 {
    250
}

fn default_frame_interval() -> u64 {
    16 // ~60fps
}

fn default_velocity_horizon() -> u64 {
    100
}

fn default_start_year() -> i32 {
    1900
}

fn default_end_year() -> i32 {
    2100
}

fn default_tick_rate() -> u64 {
    100
}

fn default_row_height_px() -> i32 {
    20
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        self.wheel.validate()?;
        if self.date.start_year > self.date.end_year {
            return Err(crate::Error::Config(format!(
                "date.start_year ({}) is after date.end_year ({})",
                self.date.start_year, self.date.end_year
            )));
        }
        if self.ui.row_height_px <= 0 {
            return Err(crate::Error::Config(
                "ui.row_height_px must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/wheelpick/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("wheelpick")
            .join("config.toml")
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("wheelpick.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
