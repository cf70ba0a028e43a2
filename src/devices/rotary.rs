//! Grove rotary angle sensor (300-degree potentiometer on an analog pin)

use crate::board::Board;
use crate::error::Result;
use crate::hal::Aio;

const FULL_ROTATION_DEG: f32 = 300.0;

pub struct RotaryAngle {
    pin: Aio,
}

impl RotaryAngle {
    pub fn open(board: &Board, channel: u32) -> Result<Self> {
        Ok(Self {
            pin: Aio::open(board, channel)?,
        })
    }

    /// Absolute knob position in degrees, 0..=300.
    pub fn abs_deg(&self) -> Result<f32> {
        let raw = self.pin.read()?;
        Ok(raw_to_degrees(raw, self.pin.full_scale()))
    }
}

pub fn raw_to_degrees(raw: u16, full_scale: u16) -> f32 {
    raw as f32 * FULL_ROTATION_DEG / full_scale as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_range() {
        assert_eq!(raw_to_degrees(0, 1023), 0.0);
        assert_eq!(raw_to_degrees(1023, 1023), 300.0);
        assert!((raw_to_degrees(511, 1023) - 149.85).abs() < 0.1);
    }
}
