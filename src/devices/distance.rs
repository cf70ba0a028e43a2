//! RFR359F IR distance interrupter (digital in)
//!
//! The sensor pulls its output low while an object sits inside its fixed
//! detection range.

use crate::board::Board;
use crate::error::Result;
use crate::hal::Gpio;

pub struct DistanceInterrupter {
    pin: Gpio,
}

impl DistanceInterrupter {
    pub fn open(board: &Board, pin: u32) -> Result<Self> {
        Ok(Self {
            pin: Gpio::input(board, pin)?,
        })
    }

    pub fn object_detected(&self) -> Result<bool> {
        Ok(self.pin.read()? == 0)
    }
}
