//! Grove light sensor (LDR on an analog pin), read in approximate lux

use crate::board::Board;
use crate::error::Result;
use crate::hal::Aio;

pub struct LightSensor {
    pin: Aio,
}

impl LightSensor {
    pub fn open(board: &Board, channel: u32) -> Result<Self> {
        Ok(Self {
            pin: Aio::open(board, channel)?,
        })
    }

    /// Approximate illuminance in lux.
    pub fn value(&self) -> Result<i32> {
        let raw = self.pin.read()?;
        Ok(raw_to_lux(raw, self.pin.full_scale()).round() as i32)
    }

    pub fn raw(&self) -> Result<u16> {
        self.pin.read()
    }
}

/// Convert a raw LDR divider reading to approximate lux via the sensor's
/// power-law response curve.
pub fn raw_to_lux(raw: u16, full_scale: u16) -> f32 {
    let raw = (raw.max(1) as f32).min(full_scale as f32 - 1.0);
    // LDR resistance in kilo-ohms against a 10k divider
    let resistance = (full_scale as f32 - raw) * 10.0 / raw;
    10_000.0 / (resistance * 15.0).powf(4.0 / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brighter_is_more_lux() {
        let dim = raw_to_lux(200, 1023);
        let bright = raw_to_lux(900, 1023);
        assert!(bright > dim);
    }

    #[test]
    fn test_extremes_finite() {
        assert!(raw_to_lux(0, 1023).is_finite());
        assert!(raw_to_lux(1023, 1023).is_finite());
    }
}
