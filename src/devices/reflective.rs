//! RPR220 IR reflective sensor (digital in)
//!
//! Output goes high over a black (non-reflective) surface.

use crate::board::Board;
use crate::error::Result;
use crate::hal::Gpio;

pub struct ReflectiveSensor {
    pin: Gpio,
}

impl ReflectiveSensor {
    pub fn open(board: &Board, pin: u32) -> Result<Self> {
        Ok(Self {
            pin: Gpio::input(board, pin)?,
        })
    }

    pub fn black_detected(&self) -> Result<bool> {
        Ok(self.pin.read()? == 1)
    }
}
