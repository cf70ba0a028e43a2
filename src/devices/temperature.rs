//! Grove temperature sensor (NTC thermistor on an analog pin)

use crate::board::Board;
use crate::error::Result;
use crate::hal::Aio;

// Thermistor constants from the Grove sensor datasheet
const B: f32 = 3975.0;
const R0: f32 = 10_000.0;
const T0_KELVIN: f32 = 298.15;
const ZERO_CELSIUS: f32 = 273.15;

pub struct TempSensor {
    pin: Aio,
}

impl TempSensor {
    pub fn open(board: &Board, channel: u32) -> Result<Self> {
        Ok(Self {
            pin: Aio::open(board, channel)?,
        })
    }

    /// Temperature in whole degrees Celsius.
    pub fn value(&self) -> Result<i32> {
        let raw = self.pin.read()?;
        Ok(raw_to_celsius(raw, self.pin.full_scale()).round() as i32)
    }
}

/// Convert a raw ADC reading from the thermistor divider to degrees Celsius
/// using the B-parameter equation.
pub fn raw_to_celsius(raw: u16, full_scale: u16) -> f32 {
    let raw = (raw.max(1) as f32).min(full_scale as f32 - 1.0);
    let resistance = (full_scale as f32 - raw) * R0 / raw;
    let kelvin = 1.0 / ((resistance / R0).ln() / B + 1.0 / T0_KELVIN);
    kelvin - ZERO_CELSIUS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_is_nominal() {
        // At half scale the thermistor equals R0, which is 25 degrees
        let t = raw_to_celsius(512, 1023);
        assert!((t - 25.0).abs() < 0.5, "got {}", t);
    }

    #[test]
    fn test_monotonic() {
        // Higher readings mean lower divider resistance, hence warmer
        let cold = raw_to_celsius(300, 1023);
        let warm = raw_to_celsius(700, 1023);
        assert!(warm > cold);
    }

    #[test]
    fn test_extremes_finite() {
        assert!(raw_to_celsius(0, 1023).is_finite());
        assert!(raw_to_celsius(1023, 1023).is_finite());
    }
}
