mod validation;

use hex_color::HexColor;
use serde::Deserialize;

use crate::geometry::{Image, Size};

pub use validation::ConfigValidationError;

pub const DEFAULT_CONFIG_FILE_PATH: &str = "~/.config/deskclock/config.toml";

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level:    String,
    #[serde(default)]
    pub analog_clock: AnalogClockConfig,
    #[serde(default)]
    pub world_clock:  WorldClockConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level:    default_log_level(),
            analog_clock: AnalogClockConfig::default(),
            world_clock:  WorldClockConfig::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

/// Image resource reference with its natural size.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ImageConfig {
    pub name:   String,
    pub width:  u32,
    pub height: u32,
}

impl ImageConfig {
    fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_owned(),
            width,
            height,
        }
    }

    pub fn to_image(&self) -> Image {
        Image::new(self.name.as_str(), Size::new(self.width, self.height))
    }
}

/// Small dot drawn below the top edge of the dial.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct JewelConfig {
    pub radius: f32,
    pub offset: f32,
    pub color:  HexColor,
}

impl Default for JewelConfig {
    fn default() -> Self {
        Self {
            radius: 0.0,
            offset: 0.0,
            color:  HexColor::rgb(255, 255, 255),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AnalogClockConfig {
    /// Zone override; the system zone is used when absent.
    pub time_zone:        Option<String>,
    pub show_seconds:     bool,
    pub tick_interval_ms: u64,
    /// Laid-out surface size used by hosts without their own layout pass.
    pub width:            u32,
    pub height:           u32,
    pub dial:             ImageConfig,
    pub hour_hand:        ImageConfig,
    pub minute_hand:      ImageConfig,
    pub second_hand:      Option<ImageConfig>,
    pub jewel:            JewelConfig,
}

impl Default for AnalogClockConfig {
    fn default() -> Self {
        Self {
            time_zone:        None,
            show_seconds:     true,
            tick_interval_ms: 1000,
            width:            400,
            height:           400,
            dial:             ImageConfig::new("clock_analog_dial", 368, 368),
            hour_hand:        ImageConfig::new("clock_analog_hour", 24, 368),
            minute_hand:      ImageConfig::new("clock_analog_minute", 24, 368),
            second_hand:      Some(ImageConfig::new("clock_analog_second", 12, 368)),
            jewel:            JewelConfig::default(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct WorldClockConfig {
    pub preferences_path: String,
}

impl Default for WorldClockConfig {
    fn default() -> Self {
        Self {
            preferences_path: "~/.config/deskclock/cities.toml".to_owned(),
        }
    }
}
