//! Board configuration
//!
//! Reads/writes the board description from ~/.config/grovekit/board.toml.
//! Every sample starts from these defaults; the file only needs to exist when
//! the target board differs from what platform detection picks.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::board::Platform;

/// Board description: where the GPIO chip, I2C bus, ADC, and PWM controller
/// live, plus the shield pin offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// GPIO character device the digital pins are on
    #[serde(default = "default_gpio_chip")]
    pub gpio_chip: String,

    /// I2C bus number (/dev/i2c-N)
    #[serde(default)]
    pub i2c_bus: u8,

    /// IIO device index for analog inputs (iio:deviceN)
    #[serde(default)]
    pub aio_device: u32,

    /// ADC resolution in bits; raw full scale is (1 << adc_bits) - 1
    #[serde(default = "default_adc_bits")]
    pub adc_bits: u8,

    /// PWM controller index (pwmchipN)
    #[serde(default)]
    pub pwm_chip: u32,

    /// Fixed addend applied to every connector number when an add-on shield
    /// remaps the physical connectors (0 = no shield)
    #[serde(default)]
    pub pin_offset: u32,

    /// Local iot-agent endpoint for samples that publish readings
    #[serde(default = "default_agent_addr")]
    pub agent_addr: String,
}

fn default_gpio_chip() -> String {
    "/dev/gpiochip0".to_string()
}

fn default_adc_bits() -> u8 {
    10
}

fn default_agent_addr() -> String {
    "127.0.0.1:41234".to_string()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            gpio_chip: default_gpio_chip(),
            i2c_bus: 0,
            aio_device: 0,
            adc_bits: default_adc_bits(),
            pwm_chip: 0,
            pin_offset: 0,
            agent_addr: default_agent_addr(),
        }
    }
}

impl BoardConfig {
    /// Get the config file path
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("grovekit").join("board.toml"))
    }

    /// Load config from file, or fall back to platform defaults.
    pub fn load(platform: Platform) -> Self {
        let Some(path) = Self::path() else {
            tracing::warn!("Could not determine config directory, using defaults");
            return Self::for_platform(platform);
        };

        if !path.exists() {
            tracing::info!(
                "No board config at {:?}, using defaults for {}",
                path,
                platform.label()
            );
            return Self::for_platform(platform);
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded board config from {:?}", path);
                    config
                }
                Err(e) => {
                    tracing::error!("Failed to parse board config: {}", e);
                    Self::for_platform(platform)
                }
            },
            Err(e) => {
                tracing::error!("Failed to read board config: {}", e);
                Self::for_platform(platform)
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> anyhow::Result<()> {
        let path =
            Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        tracing::info!("Saved board config to {:?}", path);
        Ok(())
    }

    /// Defaults for a detected platform. An UP Squared behind a Grove Pi
    /// shield keeps the historic 512 connector offset.
    pub fn for_platform(platform: Platform) -> Self {
        let mut config = Self::default();
        match platform {
            Platform::UpSquared => {
                config.pin_offset = 512;
            }
            Platform::Up
            | Platform::MinnowboardMax
            | Platform::JouleExpansion
            | Platform::IeiTank
            | Platform::Unknown => {}
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.gpio_chip, "/dev/gpiochip0");
        assert_eq!(config.adc_bits, 10);
        assert_eq!(config.pin_offset, 0);
        assert_eq!(config.agent_addr, "127.0.0.1:41234");
    }

    #[test]
    fn test_up_squared_gets_shield_offset() {
        let config = BoardConfig::for_platform(Platform::UpSquared);
        assert_eq!(config.pin_offset, 512);

        let config = BoardConfig::for_platform(Platform::Unknown);
        assert_eq!(config.pin_offset, 0);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: BoardConfig = toml::from_str("i2c_bus = 1\npin_offset = 512\n").unwrap();
        assert_eq!(config.i2c_bus, 1);
        assert_eq!(config.pin_offset, 512);
        assert_eq!(config.gpio_chip, "/dev/gpiochip0");
    }

    #[test]
    fn test_round_trip() {
        let mut config = BoardConfig::default();
        config.aio_device = 2;
        let text = toml::to_string_pretty(&config).unwrap();
        let back: BoardConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.aio_device, 2);
    }
}
