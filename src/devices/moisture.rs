//! Grove moisture sensor (analog in)
//!
//! Readings are used raw: 0-300 dry soil or air, 300-600 humid soil,
//! above 600 sensor in water.

use crate::board::Board;
use crate::error::Result;
use crate::hal::Aio;

pub struct MoistureSensor {
    pin: Aio,
}

impl MoistureSensor {
    pub fn open(board: &Board, channel: u32) -> Result<Self> {
        Ok(Self {
            pin: Aio::open(board, channel)?,
        })
    }

    pub fn value(&self) -> Result<u16> {
        self.pin.read()
    }
}
