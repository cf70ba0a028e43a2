//! GUVA-S12D UV sensor (analog in)
//!
//! Reports the averaged output voltage over a sample burst; callers scale to
//! intensity with the sensor coefficient for their supply voltage.

use std::time::Duration;

use crate::board::Board;
use crate::error::Result;
use crate::hal::Aio;

pub struct UvSensor {
    pin: Aio,
    aref: f32,
}

impl UvSensor {
    /// Open the sensor; `aref` is the board's analog reference voltage.
    pub fn open(board: &Board, channel: u32, aref: f32) -> Result<Self> {
        Ok(Self {
            pin: Aio::open(board, channel)?,
            aref,
        })
    }

    /// Averaged output voltage over `samples` reads. At least one sample is
    /// always taken.
    pub async fn volts(&self, samples: u32) -> Result<f32> {
        let samples = samples.max(1);
        let mut sum: u64 = 0;
        for _ in 0..samples {
            sum += self.pin.read()? as u64;
            tokio::time::sleep(Duration::from_micros(100)).await;
        }
        let average = sum as f32 / samples as f32;
        Ok(average * self.aref / self.pin.full_scale() as f32)
    }
}
