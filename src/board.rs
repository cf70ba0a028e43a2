//! Platform detection and connector resolution
//!
//! Every sample opens a [`Board`] first: it detects which single-board
//! computer we are on, loads the board config, and resolves logical connector
//! numbers (the D4 / A0 silkscreen numbers) into GPIO line offsets by applying
//! the shield pin addend.

use std::fs;
use std::os::unix::fs::MetadataExt;

use crate::config::BoardConfig;

/// Boards the samples have known-good pinouts for. Anything else still runs,
/// it just skips the platform-specific defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    UpSquared,
    Up,
    MinnowboardMax,
    JouleExpansion,
    IeiTank,
    Unknown,
}

impl Platform {
    pub fn label(&self) -> &'static str {
        match self {
            Platform::UpSquared => "UP Squared",
            Platform::Up => "UP",
            Platform::MinnowboardMax => "Minnowboard MAX",
            Platform::JouleExpansion => "Joule Expansion",
            Platform::IeiTank => "IEI Tank",
            Platform::Unknown => "unrecognized platform",
        }
    }

    fn from_board_name(name: &str) -> Self {
        let name = name.trim();
        if name.contains("UP-APL") || name.contains("UP Squared") {
            Platform::UpSquared
        } else if name.contains("UP-CHT") || name == "UP" {
            Platform::Up
        } else if name.contains("Minnowboard") || name.contains("Turbot") {
            Platform::MinnowboardMax
        } else if name.contains("Joule") {
            Platform::JouleExpansion
        } else if name.contains("IEI") || name.contains("TANK") {
            Platform::IeiTank
        } else {
            Platform::Unknown
        }
    }
}

/// Detect the platform from the DMI board name. Failure to read it is not
/// fatal; the sample keeps going with generic settings, like the originals
/// which only printed a warning on unknown hardware.
pub fn detect_platform() -> Platform {
    match fs::read_to_string("/sys/class/dmi/id/board_name") {
        Ok(name) => {
            let platform = Platform::from_board_name(&name);
            if platform == Platform::Unknown {
                tracing::warn!(
                    board = name.trim(),
                    "This sample runs on an unrecognized platform; \
                     you may need a board config for I/O to work properly"
                );
            }
            platform
        }
        Err(e) => {
            tracing::warn!("Could not read DMI board name: {}", e);
            Platform::Unknown
        }
    }
}

/// An opened board: detected platform plus the effective config.
#[derive(Debug, Clone)]
pub struct Board {
    platform: Platform,
    config: BoardConfig,
}

impl Board {
    /// Detect the platform, load the board config, and warn about missing
    /// privileges. Never fails: I/O errors surface later when a pin is opened.
    pub fn open() -> Self {
        let platform = detect_platform();
        let config = BoardConfig::load(platform);
        warn_if_not_root();
        tracing::info!(platform = platform.label(), "board ready");
        Self { platform, config }
    }

    /// Build a board from an explicit config (tests, unusual setups).
    pub fn with_config(platform: Platform, config: BoardConfig) -> Self {
        Self { platform, config }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Apply the shield addend to a logical connector number.
    pub fn resolve_pin(&self, pin: u32) -> u32 {
        pin + self.config.pin_offset
    }
}

/// The I/O below usually needs root; warn once up front instead of failing
/// with an opaque permission error later.
fn warn_if_not_root() {
    match fs::metadata("/proc/self") {
        Ok(meta) if meta.uid() != 0 => {
            tracing::warn!(
                "These samples use I/O operations that may require root \
                 privileges; running as a non-root user, operations below \
                 might fail"
            );
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_name_mapping() {
        assert_eq!(Platform::from_board_name("UP-APL01"), Platform::UpSquared);
        assert_eq!(Platform::from_board_name("UP-CHT01\n"), Platform::Up);
        assert_eq!(
            Platform::from_board_name("Minnowboard Turbot"),
            Platform::MinnowboardMax
        );
        assert_eq!(Platform::from_board_name("Broxton-P"), Platform::Unknown);
    }

    #[test]
    fn test_shield_offset_applied() {
        let board = Board::with_config(
            Platform::UpSquared,
            BoardConfig::for_platform(Platform::UpSquared),
        );
        // D4 behind a Grove Pi shield lands at line 516
        assert_eq!(board.resolve_pin(4), 516);

        let board = Board::with_config(Platform::Unknown, BoardConfig::default());
        assert_eq!(board.resolve_pin(4), 4);
    }
}
