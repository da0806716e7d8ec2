//! Configuration file support for the picker.
//!
//! A picker is built from a [`PickerConfig`], which can be written to and
//! read from JSON so demo setups can be shared.

use std::time::Duration;

use huewheel_core::constants::{
    DEFAULT_SPRING_DAMPING, DEFAULT_SPRING_MASS, DEFAULT_SPRING_STIFFNESS, DEFAULT_THUMB_SIZE,
    PULSE_DURATION,
};
use huewheel_core::{
    AnimationDriver, ColorError, Hsv, InteractionOptions, Orientation, Rgb, SpringConfig,
};
use serde::{Deserialize, Serialize};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show drag and update decisions
    Debug,
    /// Show every sample and animation step
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Thumb animation tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Length of the track release pulse in milliseconds
    pub pulse_ms: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            stiffness: DEFAULT_SPRING_STIFFNESS,
            damping: DEFAULT_SPRING_DAMPING,
            mass: DEFAULT_SPRING_MASS,
            pulse_ms: PULSE_DURATION.as_millis() as u64,
        }
    }
}

/// Picker configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Starting color as `#rrggbb`
    #[serde(default = "default_initial_color")]
    pub initial_color: String,

    /// Diameter of the wheel thumb
    #[serde(default = "default_thumb_size")]
    pub thumb_size: f32,

    /// Snap saturation to 0/100 when a wheel drag ends near the center or edge
    #[serde(default = "default_snap")]
    pub snap: bool,

    /// Lay the picker out in a row, which turns the value track vertical
    #[serde(default)]
    pub row: bool,

    /// Quantize the value track
    #[serde(default)]
    pub discrete: bool,

    #[serde(default)]
    pub animation: AnimationSettings,

    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_initial_color() -> String {
    "#ffffff".to_string()
}

fn default_thumb_size() -> f32 {
    DEFAULT_THUMB_SIZE
}

fn default_snap() -> bool {
    true
}

impl PickerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            initial_color: default_initial_color(),
            thumb_size: default_thumb_size(),
            snap: default_snap(),
            row: false,
            discrete: false,
            animation: AnimationSettings::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Load configuration from a JSON file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Replace the starting color, rejecting anything that is not `#rrggbb`.
    pub fn set_initial_color(&mut self, hex: &str) -> Result<(), ConfigError> {
        let rgb: Rgb = hex.parse()?;
        self.initial_color = rgb.to_hex();
        Ok(())
    }

    /// The starting color. A malformed `initial_color` falls back to white.
    pub fn initial_hsv(&self) -> Hsv {
        match self.initial_color.parse::<Rgb>() {
            Ok(rgb) => rgb.to_hsv(),
            Err(e) => {
                log::warn!("{}, falling back to white", e);
                Hsv::WHITE
            }
        }
    }

    pub fn track_orientation(&self) -> Orientation {
        if self.row {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    pub fn interaction_options(&self) -> InteractionOptions {
        InteractionOptions {
            snap: self.snap,
            discrete: self.discrete,
        }
    }

    pub fn spring_config(&self) -> SpringConfig {
        SpringConfig::new(
            self.animation.stiffness,
            self.animation.damping,
            self.animation.mass,
        )
    }

    pub fn pulse_duration(&self) -> Duration {
        Duration::from_millis(self.animation.pulse_ms)
    }

    /// An animation driver tuned by these settings.
    pub fn animation_driver(&self) -> AnimationDriver {
        AnimationDriver::new()
            .with_spring(self.spring_config())
            .with_pulse_duration(self.pulse_duration())
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A color setting is not `#rrggbb`
    #[error(transparent)]
    InvalidColor(#[from] ColorError),
}

#[cfg(test)]
mod tests {
    use huewheel_core::constants::SPRING_STIFFNESS_RANGE;
    use huewheel_core::Channel;

    use super::*;

    #[test]
    fn test_default_round_trip() {
        let config = PickerConfig::default();
        let json = config.to_json().unwrap();
        let back = PickerConfig::from_json(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = PickerConfig::from_json(r##"{"version": 1, "row": true}"##).unwrap();
        assert_eq!(config.initial_color, "#ffffff");
        assert_eq!(config.thumb_size, DEFAULT_THUMB_SIZE);
        assert!(config.snap);
        assert!(!config.discrete);
        assert_eq!(config.animation, AnimationSettings::default());
        assert_eq!(config.track_orientation(), Orientation::Vertical);
    }

    #[test]
    fn test_partial_animation_settings() {
        let config =
            PickerConfig::from_json(r#"{"version": 1, "animation": {"pulse_ms": 250}}"#).unwrap();
        assert_eq!(config.pulse_duration(), Duration::from_millis(250));
        assert_eq!(config.spring_config(), SpringConfig::default());
    }

    #[test]
    fn test_extreme_spring_settings_are_clamped() {
        let config =
            PickerConfig::from_json(r#"{"version": 1, "animation": {"stiffness": 1e18}}"#).unwrap();
        let spring = config.spring_config();
        assert_eq!(spring.stiffness(), SPRING_STIFFNESS_RANGE.1);

        let mut driver = config.animation_driver();
        driver.animate_to(Channel::WheelX, 30.0);
        driver.advance(Duration::from_millis(16));
        assert!(driver.value(Channel::WheelX).is_finite());
    }

    #[test]
    fn test_version_too_new_is_rejected() {
        let err = PickerConfig::from_json(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = PickerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_log_level_names() {
        let config = PickerConfig::from_json(r#"{"version": 1, "log_level": "trace"}"#).unwrap();
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Trace);
    }

    #[test]
    fn test_initial_hsv_falls_back_to_white() {
        let mut config = PickerConfig::new();
        config.initial_color = "red".to_string();
        assert_eq!(config.initial_hsv(), Hsv::WHITE);

        config.initial_color = "#FF0000".to_string();
        assert_eq!(config.initial_hsv(), Hsv::new(0.0, 100.0, 100.0));
    }

    #[test]
    fn test_set_initial_color_validates() {
        let mut config = PickerConfig::new();
        config.set_initial_color("#00FF00").unwrap();
        assert_eq!(config.initial_color, "#00ff00");

        let err = config.set_initial_color("#00ff0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor(_)));
        assert_eq!(config.initial_color, "#00ff00");
    }

    #[test]
    fn test_interaction_options() {
        let mut config = PickerConfig::new();
        config.snap = false;
        config.discrete = true;
        let options = config.interaction_options();
        assert!(!options.snap);
        assert!(options.discrete);
    }
}
