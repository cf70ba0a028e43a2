//! Grove voltage divider (analog in), used to watch battery packs

use std::time::Duration;

use crate::board::Board;
use crate::error::Result;
use crate::hal::Aio;

const VREF: f32 = 5.0;

pub struct VoltageDivider {
    pin: Aio,
}

impl VoltageDivider {
    pub fn open(board: &Board, channel: u32) -> Result<Self> {
        Ok(Self {
            pin: Aio::open(board, channel)?,
        })
    }

    /// Average raw reading over `samples` reads, 2 ms apart. At least one
    /// sample is always taken.
    pub async fn value(&self, samples: u32) -> Result<u16> {
        let samples = samples.max(1) as u64;
        let mut sum: u64 = 0;
        for _ in 0..samples {
            sum += self.pin.read()? as u64;
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        Ok((sum / samples) as u16)
    }

    /// Input voltage for a raw reading at the given divider gain.
    pub fn computed_value(&self, gain: u8, raw: u16) -> f32 {
        computed_value(gain, raw, self.pin.full_scale())
    }
}

pub fn computed_value(gain: u8, raw: u16, full_scale: u16) -> f32 {
    gain as f32 * raw as f32 * VREF / full_scale as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computed_value() {
        // Full scale at 3x gain and 5V reference is 15V
        assert!((computed_value(3, 1023, 1023) - 15.0).abs() < 1e-4);
        assert_eq!(computed_value(3, 0, 1023), 0.0);
        // A 2-cell LiPo at storage voltage reads around midscale
        let v = computed_value(3, 512, 1023);
        assert!(v > 7.0 && v < 8.0);
    }
}
