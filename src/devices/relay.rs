//! Grove relay (digital out); drives pumps and similar loads

use crate::board::Board;
use crate::error::Result;
use crate::hal::Gpio;

pub struct Relay {
    pin: Gpio,
}

impl Relay {
    pub fn open(board: &Board, pin: u32) -> Result<Self> {
        Ok(Self {
            pin: Gpio::output(board, pin)?,
        })
    }

    pub fn on(&self) -> Result<()> {
        self.pin.write(1)
    }

    pub fn off(&self) -> Result<()> {
        self.pin.write(0)
    }
}
