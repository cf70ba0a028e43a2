//! Onboard LEDs via /sys/class/leds
//!
//! The UP Squared exposes its four color LEDs as LED-class devices; the names
//! vary between kernels ("blue" vs "upboard:blue:"), so lookup scans the
//! class directory for a name containing the color.

use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};

const LED_CLASS: &str = "/sys/class/leds";

/// A kernel LED-class device.
pub struct OnboardLed {
    dir: PathBuf,
    max_brightness: u32,
}

impl OnboardLed {
    /// Open the LED whose device name contains `name`.
    pub fn open(name: &str) -> Result<Self> {
        let dir = find_led(name)?;
        let max_path = dir.join("max_brightness");
        let max_brightness = fs::read_to_string(&max_path)
            .map_err(|e| Error::sysfs(max_path, e))?
            .trim()
            .parse()
            .unwrap_or(255);
        Ok(Self {
            dir,
            max_brightness,
        })
    }

    pub fn max_brightness(&self) -> u32 {
        self.max_brightness
    }

    pub fn set_brightness(&self, value: u32) -> Result<()> {
        let path = self.dir.join("brightness");
        fs::write(&path, value.min(self.max_brightness).to_string())
            .map_err(|e| Error::sysfs(path, e))
    }

    pub fn on(&self) -> Result<()> {
        self.set_brightness(self.max_brightness)
    }

    pub fn off(&self) -> Result<()> {
        self.set_brightness(0)
    }
}

fn find_led(name: &str) -> Result<PathBuf> {
    let entries = fs::read_dir(LED_CLASS).map_err(|e| Error::sysfs(LED_CLASS, e))?;
    for entry in entries.flatten() {
        if entry.file_name().to_string_lossy().contains(name) {
            return Ok(entry.path());
        }
    }
    Err(Error::InvalidValue(format!(
        "no LED matching {:?} under {}",
        name, LED_CLASS
    )))
}
